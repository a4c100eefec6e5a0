use crate::cmd_sprint::*;
use clap::*;
use sprint::libs::extract::extract_peptide_hsps;
use sprint::libs::score::{score_interactions, Layout};
use sprint::libs::Shard;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("score-peptides")
        .about("Scores peptides and proteins against known interactions")
        .after_help(
            r###"
This command extracts the HSPs between proteins and peptides, adds them to
the protein HSPs, and scores every protein and peptide against every
protein.

Output:
* rows are the proteins followed by the peptides, columns the proteins
* with --self, a peptide resembling one member of a training pair scores
  against the other member

Examples:
1. Score peptides:
   sprint score-peptides proteome.fa peptides.fa hsps.txt pairs.txt --self -o pred.bin

2. Query a peptide afterwards:
   sprint query pred.bin --name pep1 --format dict

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Protein FASTA file"),
        )
        .arg(
            Arg::new("peptides")
                .required(true)
                .index(2)
                .help("Peptide FASTA file"),
        )
        .arg(
            Arg::new("hsps")
                .required(true)
                .index(3)
                .help("Processed protein HSP file"),
        )
        .arg(
            Arg::new("pairs")
                .required(true)
                .index(4)
                .help("Training pairs"),
        )
        .arg(arg_t_sim())
        .arg(arg_t_hsp())
        .arg(arg_kmer())
        .arg(arg_self())
        .args(args_shard())
        .arg(arg_parallel())
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .required(true)
                .num_args(1)
                .help("Output prediction file"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let t = thresholds(args)?;
    let shard = shard(args)?;
    set_parallel(args)?;

    let proteins = sprint::load_proteins(args.get_one::<String>("infile").unwrap())?;
    let peptides = sprint::read_fasta(args.get_one::<String>("peptides").unwrap())?;
    let set = proteins.with_peptides(&peptides)?;

    let mut hsps = sprint::load_hsps(args.get_one::<String>("hsps").unwrap(), &set)?;
    // every shard needs all peptide HSPs
    let peptide_hsps = extract_peptide_hsps(&set, &t, Shard::single())?;
    log::info!("{} peptide HSPs", peptide_hsps.len());
    hsps.extend(peptide_hsps);

    let pairs = sprint::load_pairs(args.get_one::<String>("pairs").unwrap())?;
    let matrix = score_interactions(&set, &hsps, &pairs, &t, Layout::Peptides, shard)?;

    matrix.save(args.get_one::<String>("outfile").unwrap())?;

    Ok(())
}
