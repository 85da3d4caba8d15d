//! # Render Subcommand
//!
//! Re-renders a parsed document deterministically. With `--check`, parses
//! its own output and verifies the records survive the cycle unchanged.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use sspkit_doc::{parse_file, parse_stream, render_stream};

/// Arguments for the render subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Control document to re-render.
    pub file: PathBuf,

    /// Verify round-trip stability instead of printing.
    #[arg(long)]
    pub check: bool,
}

/// Re-render a document, or verify its round-trip stability.
pub fn run(args: &RenderArgs) -> anyhow::Result<ExitCode> {
    let outcome = parse_file(&args.file)?;
    let rendered = render_stream(&outcome.records);

    if !args.check {
        print!("{rendered}");
        return Ok(ExitCode::SUCCESS);
    }

    let reparsed = parse_stream(&rendered)?;
    if reparsed.records == outcome.records {
        println!("{}: round-trip stable ({} records)", args.file.display(), outcome.records.len());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}: round-trip UNSTABLE", args.file.display());
        Ok(ExitCode::FAILURE)
    }
}
