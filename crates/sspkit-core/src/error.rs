//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types for the core record model. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Identifier errors carry the rejected value and the reason.
//! - Enumeration errors name the closed set they guard.
//! - Incomplete document content is NOT an error; it surfaces as a finding
//!   in the completion-tracking report. Errors here are reserved for input
//!   that cannot be represented in the record model at all.

use thiserror::Error;

/// Errors raised by the core record model.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A control identifier did not match the catalog pattern.
    #[error("invalid control id '{value}': {reason}")]
    InvalidControlId {
        /// The rejected identifier text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An `implementation-status` value outside the closed enumeration.
    #[error("unknown implementation-status value '{0}'")]
    UnknownStatus(String),

    /// A `control-origination` value outside the closed enumeration.
    #[error("unknown control-origination value '{0}'")]
    UnknownOrigination(String),

    /// An implementation part label that cannot name a statement part.
    #[error("invalid part label '{0}'")]
    InvalidPartLabel(String),
}
