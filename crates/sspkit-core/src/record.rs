//! # Control Record Model
//!
//! The in-memory form of one control document variant: front-matter values,
//! section texts, and per-part implementation narratives. One source file
//! usually holds one record, but concatenated variants of the same control
//! produce several records from a single stream.
//!
//! Section free text is stored verbatim so that re-rendering reproduces the
//! document with byte-identical heading text and section order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::control::ControlId;
use crate::error::CoreError;
use crate::status::{ControlOrigination, ImplementationStatus};

/// Label of one statement part and its implementation narrative section.
///
/// Stores the raw heading form (`a.`, `(a)`, `1.`) so that rendering
/// reproduces the heading exactly; [`PartLabel::key`] gives the normalized
/// form used to match narratives against statement parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartLabel(String);

impl PartLabel {
    /// Build a part label from its raw heading text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPartLabel` if the normalized form is not
    /// one or two letters or one or two digits.
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        let label = Self(raw.to_string());
        let key = label.key();
        let valid = !key.is_empty()
            && key.len() <= 2
            && (key.bytes().all(|b| b.is_ascii_lowercase())
                || key.bytes().all(|b| b.is_ascii_digit()));
        if valid {
            Ok(label)
        } else {
            Err(CoreError::InvalidPartLabel(raw.to_string()))
        }
    }

    /// The raw heading form, e.g. `"a."` or `"(a)"`.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// The normalized matching key: markdown escapes, brackets, parens,
    /// and a trailing dot stripped, lowercased. `"(a)"` and `"a."` both
    /// normalize to `"a"`.
    pub fn key(&self) -> String {
        self.0
            .trim()
            .trim_end_matches('.')
            .chars()
            .filter(|c| !matches!(c, '\\' | '[' | ']' | '(' | ')'))
            .collect::<String>()
            .to_ascii_lowercase()
    }
}

impl TryFrom<String> for PartLabel {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PartLabel> for String {
    fn from(label: PartLabel) -> Self {
        label.0
    }
}

impl fmt::Display for PartLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One implementation narrative: the text under an
/// `## Implementation <label>` heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    /// Which statement part this narrative covers.
    pub label: PartLabel,
    /// The narrative text, verbatim. May still be the authoring
    /// placeholder for unfinished controls.
    pub text: String,
}

/// One control document variant parsed into the record model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRecord {
    /// Catalog identifier, e.g. `ac-2.13`.
    pub control_id: ControlId,
    /// Title from the document heading.
    pub title: String,
    /// `implementation-status` front-matter values, in document order.
    pub implementation_status: Vec<ImplementationStatus>,
    /// `control-origination` front-matter values, in document order.
    pub control_origination: Vec<ControlOrigination>,
    /// Control Statement section text; may contain lettered or numbered
    /// sub-parts.
    pub statement: String,
    /// Control guidance section text.
    pub guidance: String,
    /// Control assessment-objective section text.
    pub assessment_objective: String,
    /// Text directly under "What is the solution and how is it
    /// implemented?", before the first `Implementation` subsection.
    /// For controls without lettered parts this IS the narrative.
    pub solution_preamble: String,
    /// Per-part implementation narratives, in document order.
    pub narratives: Vec<Narrative>,
}

impl ControlRecord {
    /// Normalized keys of all narrative labels, in document order.
    pub fn narrative_keys(&self) -> Vec<String> {
        self.narratives.iter().map(|n| n.label.key()).collect()
    }

    /// Look up a narrative by normalized part key.
    pub fn narrative_for(&self, key: &str) -> Option<&Narrative> {
        self.narratives.iter().find(|n| n.label.key() == key)
    }

    /// True if the record inherits the control entirely from an upstream
    /// provider.
    pub fn is_fully_inherited(&self) -> bool {
        !self.control_origination.is_empty()
            && self.control_origination.iter().all(|o| o.is_inherited())
    }
}
