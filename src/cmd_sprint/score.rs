use crate::cmd_sprint::*;
use clap::*;
use sprint::libs::score::{score_interactions, Layout};
use sprint::libs::shard::scatter_gather;
use sprint::libs::PredictionMatrix;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("score")
        .about("Scores every protein pair against known interactions")
        .after_help(
            r###"
This command scores all protein pairs. A pair (X, Y) gains evidence when X
shares an HSP with a training interactor A, Y shares an HSP with B, and A-B
is a training pair.

Input:
* training pairs: two names per line, separated by blanks or a comma
* pairs naming an unknown protein are skipped with a warning

Output:
* a binary prediction file, gzipped when the name ends with .gz
* `sprint query` reads it back

Notes:
* With --world-size N each process scores a block of rows;
  `sprint merge-scores` assembles the blocks
* Without an HSP chain a pair scores zero, training pairs included
* --self lets every interactor count as its own homologue, so training
  pairs and direct homologues of one interactor also score

Examples:
1. Score a proteome:
   sprint score proteome.fa hsps.txt pairs.txt -o pred.bin

2. Two of eight row blocks:
   sprint score proteome.fa hsps.txt pairs.txt --rank 2 --world-size 8 -o block2.bin

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
                .help("Processed HSP file"),
        )
        .arg(
            Arg::new("pairs")
                .required(true)
                .index(3)
                .help("Training pairs"),
        )
        .arg(arg_kmer())
        .arg(arg_self())
        .args(args_shard())
        .arg(arg_workers())
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
    //----------------------------
    // Args
    //----------------------------
    let t = thresholds(args)?;
    let shard = shard(args)?;
    let opt_workers = *args.get_one::<usize>("workers").unwrap();
    set_parallel(args)?;

    //----------------------------
    // Ops
    //----------------------------
    let set = sprint::load_proteins(args.get_one::<String>("infile").unwrap())?;
    let hsps = sprint::load_hsps(args.get_one::<String>("hsps").unwrap(), &set)?;
    let pairs = sprint::load_pairs(args.get_one::<String>("pairs").unwrap())?;

    let matrix = if opt_workers > 1 {
        let blocks = scatter_gather(
            opt_workers,
            |s| score_interactions(&set, &hsps, &pairs, &t, Layout::AllToAll, s).map(|m| vec![m]),
            vec![],
            |mut acc, block| {
                acc.extend(block);
                acc
            },
        )?;
        PredictionMatrix::assemble(blocks)?
    } else {
        score_interactions(&set, &hsps, &pairs, &t, Layout::AllToAll, shard)?
    };

    //----------------------------
    // Output
    //----------------------------
    matrix.save(args.get_one::<String>("outfile").unwrap())?;

    Ok(())
}
