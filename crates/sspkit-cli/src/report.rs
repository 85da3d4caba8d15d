//! # Report Subcommand
//!
//! Builds the completion-tracking report for a file or corpus directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use sspkit_report::{completion_report, Corpus};

/// Arguments for the report subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Control document or corpus directory.
    pub path: PathBuf,

    /// Output machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

/// Build and print the completion report.
pub fn run(args: &ReportArgs) -> anyhow::Result<ExitCode> {
    let corpus = Corpus::load_path(&args.path)?;
    let report = completion_report(&corpus);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(ExitCode::SUCCESS)
}
