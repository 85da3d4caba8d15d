//! # sspkit-cli — SSP Toolkit Command-Line Interface
//!
//! Structured clap-based CLI over the corpus crates.
//!
//! ## Subcommands
//!
//! - `validate` — Schema and integrity checks over a file or corpus
//! - `report` — Completion-tracking report, text or JSON
//! - `render` — Deterministic re-rendering and round-trip checking
//! - `list` — One line per record: id, statuses, completion
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the corpus crates — no parsing or
//!   checking logic lives here.
//! - Handlers return an exit code; only `main` terminates the process.

pub mod list;
pub mod render;
pub mod report;
pub mod validate;
