use crate::cmd_sprint::*;
use clap::*;
use sprint::libs::extract::extract_hsps;
use sprint::libs::process::{process_hsps, ProcessMode};
use sprint::libs::shard::scatter_gather;
use sprint::libs::HspSet;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("extract-hsps")
        .about("Extracts High-Scoring Segment Pairs between all proteins")
        .after_help(
            r###"
This command finds every gapless High-Scoring Segment Pair (HSP) between two
different proteins of a FASTA file.

Process:
1. Index the s-mers of every protein under four spaced seeds
2. Pair occurrences whose s-mers score >= --t-sim under PAM120
3. Find a --kmer window around each pair scoring >= --t-hsp
4. Extend it both ways while the sliding window keeps scoring >= --t-hsp
5. Suppress HSPs on overrepresented residues (unless --no-process)

Output:
* One HSP per line: protein1 protein2 pos1 pos2 length
* protein1 <= protein2, positions are 0-based, lines sorted

Notes:
* Supports both plain text and gzipped (.gz) files
* With --world-size N, run N processes with --rank 0..N-1, then
  `sprint merge-hsps` and `sprint process-hsps`; processing needs every
  HSP and is skipped in sharded runs
* --workers N runs N shards inside this process

Examples:
1. Extract and process HSPs:
   sprint extract-hsps proteome.fa -o hsps.txt

2. Raw HSPs with custom thresholds:
   sprint extract-hsps proteome.fa -s 16 -p 40 --no-process -o raw.txt

3. Second of four processes:
   sprint extract-hsps proteome.fa --rank 1 --world-size 4 -o part1.txt

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Protein FASTA file"),
        )
        .arg(arg_t_sim())
        .arg(arg_t_hsp())
        .arg(arg_kmer())
        .arg(arg_t_count())
        .arg(
            Arg::new("no_process")
                .long("no-process")
                .action(ArgAction::SetTrue)
                .help("Write the HSPs as extracted"),
        )
        .arg(arg_truncate())
        .args(args_shard())
        .arg(arg_workers())
        .arg(arg_parallel())
        .arg(arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let t = thresholds(args)?;
    let shard = shard(args)?;
    let opt_workers = *args.get_one::<usize>("workers").unwrap();
    let is_process = !args.get_flag("no_process");
    let mode = if args.get_flag("truncate") {
        ProcessMode::Truncate
    } else {
        ProcessMode::Remove
    };
    set_parallel(args)?;

    //----------------------------
    // Ops
    //----------------------------
    let set = sprint::load_proteins(infile)?;
    log::info!("{} proteins loaded", set.len());

    let hsps = if opt_workers > 1 {
        scatter_gather(
            opt_workers,
            |s| extract_hsps(&set, &t, s),
            HspSet::default(),
            |mut acc, part| {
                acc.extend(part);
                acc
            },
        )?
    } else {
        extract_hsps(&set, &t, shard)?
    };

    let hsps = if is_process && shard.world_size() == 1 {
        process_hsps(&set, &hsps, &t, mode)
    } else {
        if is_process {
            log::warn!("Sharded run, processing left to `sprint process-hsps`");
        }
        hsps
    };

    //----------------------------
    // Output
    //----------------------------
    let mut writer = sprint::writer(args.get_one::<String>("outfile").unwrap())?;
    sprint::write_hsps(&mut writer, &hsps, &set)?;

    Ok(())
}
