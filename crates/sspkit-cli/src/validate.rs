//! # Validate Subcommand
//!
//! Runs the schema and integrity checks over a file or corpus directory
//! and reports findings. Error-severity findings fail the command;
//! `--strict` promotes warnings.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use sspkit_report::{checks::max_severity, run_checks, Corpus, Severity};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Control document or corpus directory.
    pub path: PathBuf,

    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,

    /// Output machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

/// Run validation and map findings to an exit code.
pub fn run(args: &ValidateArgs) -> anyhow::Result<ExitCode> {
    let corpus = Corpus::load_path(&args.path)?;
    let findings = run_checks(&corpus);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        for finding in &findings {
            println!("{finding}");
        }
        println!(
            "{} findings across {} records in {} documents",
            findings.len(),
            corpus.record_count(),
            corpus.documents.len()
        );
    }

    let failed = match max_severity(&findings) {
        Some(Severity::Error) => true,
        Some(Severity::Warning) => args.strict,
        Some(Severity::Info) | None => false,
    };
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
