use crate::cmd_sprint::*;
use clap::*;
use sprint::libs::extract::extract_peptide_hsps;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("peptide-hsps")
        .about("Extracts HSPs between proteins and peptides")
        .after_help(
            r###"
This command runs the HSP extraction on protein-peptide pairs only. No HSP
links two proteins or two peptides.

--t-sim plays the role of the peptide s-mer threshold (t_smer).

Examples:
1. Default thresholds:
   sprint peptide-hsps proteome.fa peptides.fa -o peptide_hsps.txt

2. A looser s-mer threshold:
   sprint peptide-hsps proteome.fa peptides.fa -s 12 -o peptide_hsps.txt

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
        .arg(arg_t_sim())
        .arg(arg_t_hsp())
        .arg(arg_kmer())
        .args(args_shard())
        .arg(arg_parallel())
        .arg(arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let t = thresholds(args)?;
    let shard = shard(args)?;
    set_parallel(args)?;

    let proteins = sprint::load_proteins(args.get_one::<String>("infile").unwrap())?;
    let peptides = sprint::read_fasta(args.get_one::<String>("peptides").unwrap())?;
    let set = proteins.with_peptides(&peptides)?;
    log::info!(
        "{} proteins and {} peptides loaded",
        proteins.len(),
        peptides.len()
    );

    let hsps = extract_peptide_hsps(&set, &t, shard)?;

    let mut writer = sprint::writer(args.get_one::<String>("outfile").unwrap())?;
    sprint::write_hsps(&mut writer, &hsps, &set)?;

    Ok(())
}
