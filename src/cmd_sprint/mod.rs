//! Subcommand modules for the `sprint` binary.

pub mod extract_hsps;
pub mod merge_hsps;
pub mod merge_scores;
pub mod peptide_hsps;
pub mod process_hsps;
pub mod query;
pub mod score;
pub mod score_peptides;
pub mod sites;

use clap::*;
use sprint::libs::{Shard, Thresholds};

pub fn arg_outfile() -> Arg {
    Arg::new("outfile")
        .long("outfile")
        .short('o')
        .num_args(1)
        .default_value("stdout")
        .help("Output filename. [stdout] for screen")
}

pub fn arg_kmer() -> Arg {
    Arg::new("kmer")
        .long("kmer")
        .short('k')
        .num_args(1)
        .default_value("20")
        .value_parser(value_parser!(usize))
        .help("Window size of HSPs, also their minimal length")
}

pub fn arg_t_sim() -> Arg {
    Arg::new("t_sim")
        .long("t-sim")
        .short('s')
        .num_args(1)
        .default_value("15")
        .value_parser(value_parser!(i32))
        .help("Minimal PAM120 score of two similar s-mers")
}

pub fn arg_t_hsp() -> Arg {
    Arg::new("t_hsp")
        .long("t-hsp")
        .short('p')
        .num_args(1)
        .default_value("35")
        .value_parser(value_parser!(i32))
        .help("Minimal PAM120 score of every window of an HSP")
}

pub fn arg_t_count() -> Arg {
    Arg::new("t_count")
        .long("t-count")
        .short('c')
        .num_args(1)
        .default_value("40")
        .value_parser(value_parser!(u32))
        .help("Residues starting more HSP windows than this are overrepresented")
}

pub fn arg_truncate() -> Arg {
    Arg::new("truncate")
        .long("truncate")
        .action(ArgAction::SetTrue)
        .help("Cut HSPs around overrepresented residues instead of dropping them")
}

pub fn arg_self() -> Arg {
    Arg::new("self")
        .long("self")
        .action(ArgAction::SetTrue)
        .help("Let every interactor count as its own homologue")
}

pub fn args_shard() -> [Arg; 2] {
    [
        Arg::new("rank")
            .long("rank")
            .num_args(1)
            .default_value("0")
            .value_parser(value_parser!(usize))
            .help("Rank of this process among --world-size"),
        Arg::new("world_size")
            .long("world-size")
            .num_args(1)
            .default_value("1")
            .value_parser(value_parser!(usize))
            .help("Number of processes sharing the work"),
    ]
}

pub fn arg_workers() -> Arg {
    Arg::new("workers")
        .long("workers")
        .num_args(1)
        .default_value("1")
        .value_parser(value_parser!(usize))
        .help("Number of in-process shards, gathered before writing")
}

pub fn arg_parallel() -> Arg {
    Arg::new("parallel")
        .long("parallel")
        .num_args(1)
        .default_value("1")
        .value_parser(value_parser!(usize))
        .help("Number of threads for parallel processing")
}

/// Thresholds from whichever of the threshold arguments a command defines
pub fn thresholds(args: &ArgMatches) -> anyhow::Result<Thresholds> {
    let mut t = Thresholds::default();
    if let Ok(Some(&kmer)) = args.try_get_one::<usize>("kmer") {
        t = t.with_kmer_size(kmer);
    }
    if let Ok(Some(&t_sim)) = args.try_get_one::<i32>("t_sim") {
        t = t.with_t_sim(t_sim);
    }
    if let Ok(Some(&t_hsp)) = args.try_get_one::<i32>("t_hsp") {
        t = t.with_t_hsp(t_hsp);
    }
    if let Ok(Some(&t_count)) = args.try_get_one::<u32>("t_count") {
        t = t.with_t_count(t_count);
    }
    if let Ok(Some(&true)) = args.try_get_one::<bool>("self") {
        t = t.with_self_evidence(true);
    }
    t.validate()?;
    Ok(t)
}

pub fn shard(args: &ArgMatches) -> anyhow::Result<Shard> {
    let rank = *args.get_one::<usize>("rank").unwrap();
    let world_size = *args.get_one::<usize>("world_size").unwrap();
    let shard = Shard::new(rank, world_size)?;
    if matches!(args.try_get_one::<usize>("workers"), Ok(Some(&w)) if w > 1) && world_size > 1 {
        anyhow::bail!("--workers and --world-size can not be combined");
    }
    Ok(shard)
}

pub fn set_parallel(args: &ArgMatches) -> anyhow::Result<()> {
    let parallel = *args.get_one::<usize>("parallel").unwrap();
    rayon::ThreadPoolBuilder::new()
        .num_threads(parallel)
        .build_global()?;
    Ok(())
}
