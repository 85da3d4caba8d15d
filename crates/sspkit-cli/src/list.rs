//! # List Subcommand
//!
//! One line per record: control id, narrative completion, statuses,
//! originations, title.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use sspkit_report::{completion_report, Corpus};

/// Arguments for the list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Control document or corpus directory.
    pub path: PathBuf,

    /// Output machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

/// List the records of a corpus.
pub fn run(args: &ListArgs) -> anyhow::Result<ExitCode> {
    let corpus = Corpus::load_path(&args.path)?;
    let report = completion_report(&corpus);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.records)?);
        return Ok(ExitCode::SUCCESS);
    }

    for row in &report.records {
        let originations = row
            .control_origination
            .iter()
            .map(|o| o.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let originations = if originations.is_empty() {
            "-".to_string()
        } else {
            originations
        };
        println!(
            "{:<12} {}/{} {:<44} {}",
            row.control_id.as_str(),
            row.parts_filled,
            row.parts_total,
            originations,
            row.title
        );
    }
    Ok(ExitCode::SUCCESS)
}
