//! # Document Layout
//!
//! The fixed heading set and structural tokens of a control document.
//! Heading text is part of the round-trip contract: parse and render both
//! use these constants, so the two can never drift apart.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `## Control Statement` — the official control text.
pub const STATEMENT_HEADING: &str = "## Control Statement";

/// `## Control guidance` — the catalog guidance text.
pub const GUIDANCE_HEADING: &str = "## Control guidance";

/// `## Control assessment-objective` — the assessment objective text.
pub const OBJECTIVE_HEADING: &str = "## Control assessment-objective";

/// The solution heading that opens the implementation narrative half of
/// the document.
pub const SOLUTION_HEADING: &str = "## What is the solution and how is it implemented?";

/// Prefix of per-part narrative headings; the part label follows.
pub const IMPLEMENTATION_PREFIX: &str = "## Implementation ";

/// Canonical horizontal rule emitted between the assessment objective and
/// the solution heading.
pub const HORIZONTAL_RULE: &str =
    "______________________________________________________________________";

/// True for any Markdown thematic break: three or more of the same rule
/// character (`-`, `_`, `*`) and nothing else on the line.
pub fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3
        && (trimmed.bytes().all(|b| b == b'-')
            || trimmed.bytes().all(|b| b == b'_')
            || trimmed.bytes().all(|b| b == b'*'))
}

/// The catalog sections of a control document, in required order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    /// Control Statement.
    Statement,
    /// Control guidance.
    Guidance,
    /// Control assessment-objective.
    AssessmentObjective,
    /// What is the solution and how is it implemented?
    Solution,
}

impl SectionKind {
    /// The exact heading line for this section.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Statement => STATEMENT_HEADING,
            Self::Guidance => GUIDANCE_HEADING,
            Self::AssessmentObjective => OBJECTIVE_HEADING,
            Self::Solution => SOLUTION_HEADING,
        }
    }

    /// All sections in required document order.
    pub const ALL: [Self; 4] = [
        Self::Statement,
        Self::Guidance,
        Self::AssessmentObjective,
        Self::Solution,
    ];
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}
