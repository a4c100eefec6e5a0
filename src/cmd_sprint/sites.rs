use crate::cmd_sprint::*;
use clap::*;
use sprint::libs::extract::extract_peptide_hsps;
use sprint::libs::score::contributions;
use sprint::libs::Shard;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("sites")
        .about("Per-residue contributions of a target to its peptide scores")
        .after_help(
            r###"
This command spreads the score of a target protein with each peptide over
the target residues covered by the HSPs that produced it.

Output:
* CSV with a header: peptide,target_position,contribution
* positions are 1-based

Examples:
1. Binding sites of P12345 for every peptide:
   sprint sites proteome.fa peptides.fa hsps.txt pairs.txt --target P12345 --self -o sites.csv

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
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .required(true)
                .num_args(1)
                .help("Name of the target protein"),
        )
        .arg(arg_t_sim())
        .arg(arg_t_hsp())
        .arg(arg_kmer())
        .arg(arg_self())
        .arg(arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let t = thresholds(args)?;
    let target = args.get_one::<String>("target").unwrap();

    let proteins = sprint::load_proteins(args.get_one::<String>("infile").unwrap())?;
    let peptides = sprint::read_fasta(args.get_one::<String>("peptides").unwrap())?;
    let set = proteins.with_peptides(&peptides)?;

    let mut hsps = sprint::load_hsps(args.get_one::<String>("hsps").unwrap(), &set)?;
    hsps.extend(extract_peptide_hsps(&set, &t, Shard::single())?);

    let pairs = sprint::load_pairs(args.get_one::<String>("pairs").unwrap())?;
    let sites = contributions(target, &set, &hsps, &pairs, &t)?;

    let mut writer = sprint::writer(args.get_one::<String>("outfile").unwrap())?;
    writer.write_fmt(format_args!("peptide,target_position,contribution\n"))?;
    for (peptide, residues) in &sites {
        for (i, value) in residues.iter().enumerate() {
            writer.write_fmt(format_args!("{},{},{}\n", peptide, i + 1, value))?;
        }
    }
    writer.flush()?;

    Ok(())
}
