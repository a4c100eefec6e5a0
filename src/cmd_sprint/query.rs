use clap::*;
use itertools::Itertools;
use sprint::libs::prediction::Scores;
use sprint::libs::{PredictionMatrix, ScoreFormat};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("query")
        .about("Looks up scores in a prediction file")
        .after_help(
            r###"
Modes:
* --pair A B: the score of row A, column B
* --name A: the row of A
    * --format dict: one `column<TAB>score` line per column
    * --format array: the scores on one tab-separated line
* --tsv: every `row<TAB>column<TAB>score`

Unknown names are errors.

Examples:
1. One score:
   sprint query pred.bin --pair P1 P2

2. A row as a table:
   sprint query pred.bin --name P1 --format dict

3. Everything:
   sprint query pred.bin --tsv -o scores.tsv

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Prediction file"),
        )
        .arg(
            Arg::new("pair")
                .long("pair")
                .num_args(2)
                .value_names(["ROW", "COL"])
                .help("Score of one pair"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .num_args(1)
                .help("Scores of one row"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .num_args(1)
                .default_value("dict")
                .help("Output of --name: dict or array"),
        )
        .arg(
            Arg::new("tsv")
                .long("tsv")
                .action(ArgAction::SetTrue)
                .help("All scores"),
        )
        .group(
            ArgGroup::new("mode")
                .args(["pair", "name", "tsv"])
                .required(true),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let matrix = PredictionMatrix::from_file(args.get_one::<String>("infile").unwrap())?;
    let mut writer = sprint::writer(args.get_one::<String>("outfile").unwrap())?;

    if let Some(mut pair) = args.get_many::<String>("pair") {
        let row = pair.next().unwrap();
        let col = pair.next().unwrap();
        let score = matrix.get_score(row, col)?;
        writer.write_fmt(format_args!("{}\n", score))?;
    } else if let Some(name) = args.get_one::<String>("name") {
        let format: ScoreFormat = args.get_one::<String>("format").unwrap().parse()?;
        match matrix.get_scores(name, format)? {
            Scores::Array(values) => {
                writer.write_fmt(format_args!("{}\n", values.iter().join("\t")))?;
            }
            Scores::Dict(dict) => {
                for (col, score) in &dict {
                    writer.write_fmt(format_args!("{}\t{}\n", col, score))?;
                }
            }
        }
    } else {
        matrix.write_tsv(&mut writer)?;
    }

    writer.flush()?;

    Ok(())
}
