//! # sspkit-core — Foundational Types for the SSP Toolkit
//!
//! This crate is the bedrock of the SSP toolkit. It defines the record model
//! for NIST SP 800-53 control documents and the type-system primitives that
//! enforce the corpus schema at compile time. Every other crate in the
//! workspace depends on `sspkit-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ControlId` and `PartLabel`
//!    are newtypes with validated constructors. No bare strings for catalog
//!    identifiers.
//!
//! 2. **Closed enumerations for front-matter values.** `ImplementationStatus`
//!    and `ControlOrigination` are the single definitions used across the
//!    stack; an unknown value is rejected at the boundary, never smuggled
//!    through as a string.
//!
//! 3. **Findings, not failures, for incomplete content.** A record missing a
//!    section or a narrative is a reportable gap. Only malformed identifiers
//!    and unreadable input are errors.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sspkit-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod control;
pub mod error;
pub mod fingerprint;
pub mod parts;
pub mod record;
pub mod status;

// Re-export primary types for ergonomic imports.
pub use control::ControlId;
pub use error::CoreError;
pub use fingerprint::{fingerprint, Fingerprint};
pub use parts::statement_part_labels;
pub use record::{ControlRecord, Narrative, PartLabel};
pub use status::{ControlOrigination, ImplementationStatus};
