use clap::*;
use sprint::libs::PredictionMatrix;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("merge-scores")
        .about("Assembles row blocks of a sharded prediction")
        .after_help(
            r###"
This command puts together the prediction files written by
`sprint score --rank r --world-size n`. Every block must be given once; a
missing or repeated block is an error.

Examples:
1. Gather four blocks:
   sprint merge-scores block0.bin block1.bin block2.bin block3.bin -o pred.bin

"###,
        )
        .arg(
            Arg::new("infiles")
                .required(true)
                .num_args(1..)
                .index(1)
                .help("Prediction blocks"),
        )
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
    let blocks = args
        .get_many::<String>("infiles")
        .unwrap()
        .map(|f| PredictionMatrix::from_file(f))
        .collect::<Result<Vec<_>, _>>()?;

    let matrix = PredictionMatrix::assemble(blocks)?;
    log::info!("{} x {} scores assembled", matrix.nrows(), matrix.ncols());

    matrix.save(args.get_one::<String>("outfile").unwrap())?;

    Ok(())
}
