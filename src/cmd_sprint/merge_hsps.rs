use crate::cmd_sprint::*;
use clap::*;
use std::collections::BTreeSet;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("merge-hsps")
        .about("Merges HSP files")
        .after_help(
            r###"
This command writes the union of HSP files, such as the outputs of a
sharded `sprint extract-hsps`. Records are canonicalized (protein1 <=
protein2), deduplicated and sorted. Self pairs are dropped.

Examples:
1. Gather four shards:
   sprint merge-hsps part0.txt part1.txt part2.txt part3.txt -o raw.txt

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("HSP files to merge"),
        )
        .arg(arg_outfile())
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut records = BTreeSet::new();

    for infile in args.get_many::<String>("infiles").unwrap() {
        let reader = sprint::reader(infile)?;
        for record in sprint::read_hsp_records(reader)? {
            if !record.is_self_pair() {
                records.insert(record.canonical());
            }
        }
    }
    log::info!("{} HSPs after merging", records.len());

    let mut writer = sprint::writer(args.get_one::<String>("outfile").unwrap())?;
    for record in &records {
        writer.write_fmt(format_args!("{}\n", record))?;
    }
    writer.flush()?;

    Ok(())
}
