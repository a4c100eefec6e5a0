use crate::cmd_sprint::*;
use clap::*;
use sprint::libs::process::{process_hsps, ProcessMode};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("process-hsps")
        .about("Suppresses HSPs on overrepresented residues")
        .after_help(
            r###"
This command counts, for every residue, how many HSP windows of --kmer
residues start on it. A residue starting more than --t-count windows is
overrepresented.

Modes:
* default: HSPs touching an overrepresented residue are dropped. The
  output is a subset of the input and processing it again changes nothing.
* --truncate: HSPs are cut around overrepresented residues and the pieces
  kept. Pieces may be absent from the input.

Examples:
1. Process merged shard outputs:
   sprint process-hsps proteome.fa raw.txt -o hsps.txt

2. A stricter threshold:
   sprint process-hsps proteome.fa raw.txt -c 20 -o hsps.txt

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Protein FASTA file"),
        )
        .arg(
            Arg::new("hsps")
                .required(true)
                .index(2)
                .help("HSP file"),
        )
        .arg(arg_t_count())
        .arg(arg_kmer())
        .arg(arg_truncate())
        .arg(arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let t = thresholds(args)?;
    let mode = if args.get_flag("truncate") {
        ProcessMode::Truncate
    } else {
        ProcessMode::Remove
    };

    let set = sprint::load_proteins(args.get_one::<String>("infile").unwrap())?;
    let hsps = sprint::load_hsps(args.get_one::<String>("hsps").unwrap(), &set)?;

    let processed = process_hsps(&set, &hsps, &t, mode);

    let mut writer = sprint::writer(args.get_one::<String>("outfile").unwrap())?;
    sprint::write_hsps(&mut writer, &processed, &set)?;

    Ok(())
}
