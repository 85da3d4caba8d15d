//! # sspkit CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// SSP toolkit — control-document corpus toolchain.
///
/// Parses, validates, and re-renders NIST SP 800-53 control documents and
/// tracks how much of the implementation narrative is still unwritten.
#[derive(Parser, Debug)]
#[command(name = "sspkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Schema and integrity checks over a file or corpus directory.
    Validate(sspkit_cli::validate::ValidateArgs),
    /// Completion-tracking report.
    Report(sspkit_cli::report::ReportArgs),
    /// Re-render parsed records deterministically.
    Render(sspkit_cli::render::RenderArgs),
    /// List records with status and completion.
    List(sspkit_cli::list::ListArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => sspkit_cli::validate::run(&args),
        Commands::Report(args) => sspkit_cli::report::run(&args),
        Commands::Render(args) => sspkit_cli::render::run(&args),
        Commands::List(args) => sspkit_cli::list::run(&args),
    }
}
