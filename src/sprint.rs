extern crate clap;
use clap::*;

mod cmd_sprint;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let app = Command::new("sprint")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`sprint` - Protein-protein interaction prediction from sequence similarity")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_sprint::extract_hsps::make_subcommand())
        .subcommand(cmd_sprint::process_hsps::make_subcommand())
        .subcommand(cmd_sprint::peptide_hsps::make_subcommand())
        .subcommand(cmd_sprint::merge_hsps::make_subcommand())
        .subcommand(cmd_sprint::score::make_subcommand())
        .subcommand(cmd_sprint::score_peptides::make_subcommand())
        .subcommand(cmd_sprint::sites::make_subcommand())
        .subcommand(cmd_sprint::merge_scores::make_subcommand())
        .subcommand(cmd_sprint::query::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* HSPs:
    * extract-hsps - All-to-all HSPs of a proteome
    * process-hsps - Suppress overrepresented residues
    * peptide-hsps - HSPs between proteins and peptides
    * merge-hsps   - Union of HSP files

* Predictions:
    * score          - Score all protein pairs
    * score-peptides - Score peptides against proteins
    * sites          - Per-residue contributions of a target
    * merge-scores   - Assemble row blocks of sharded runs
    * query          - Look up scores in a prediction file

Log verbosity is controlled by RUST_LOG, default `info`.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("extract-hsps", sub_matches)) => cmd_sprint::extract_hsps::execute(sub_matches),
        Some(("process-hsps", sub_matches)) => cmd_sprint::process_hsps::execute(sub_matches),
        Some(("peptide-hsps", sub_matches)) => cmd_sprint::peptide_hsps::execute(sub_matches),
        Some(("merge-hsps", sub_matches)) => cmd_sprint::merge_hsps::execute(sub_matches),
        Some(("score", sub_matches)) => cmd_sprint::score::execute(sub_matches),
        Some(("score-peptides", sub_matches)) => cmd_sprint::score_peptides::execute(sub_matches),
        Some(("sites", sub_matches)) => cmd_sprint::sites::execute(sub_matches),
        Some(("merge-scores", sub_matches)) => cmd_sprint::merge_scores::execute(sub_matches),
        Some(("query", sub_matches)) => cmd_sprint::query::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
