//! # Front-Matter Block
//!
//! The YAML block between `---` fences at the head of each record. Two
//! keys matter: `implementation-status` and `control-origination`, each a
//! list of values from a closed enumeration. Unknown keys are ignored;
//! unknown values are reported and dropped from the typed form.

use serde::{Deserialize, Serialize};

use sspkit_core::{ControlOrigination, ImplementationStatus};

/// Raw front-matter as authored, before enum validation.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawFrontMatter {
    #[serde(rename = "implementation-status", default)]
    implementation_status: Vec<String>,
    #[serde(rename = "control-origination", default)]
    control_origination: Vec<String>,
}

/// Typed front-matter values of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Validated `implementation-status` values, in document order.
    pub implementation_status: Vec<ImplementationStatus>,
    /// Validated `control-origination` values, in document order.
    pub control_origination: Vec<ControlOrigination>,
}

impl FrontMatter {
    /// True if both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.implementation_status.is_empty() && self.control_origination.is_empty()
    }
}

/// Values rejected by the closed enumerations, kept for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectedValues {
    /// `implementation-status` entries outside the closed set.
    pub statuses: Vec<String>,
    /// `control-origination` entries outside the closed set.
    pub originations: Vec<String>,
}

/// Parse the YAML text between the front-matter fences.
///
/// Unknown enum values do not fail the parse; they land in
/// [`RejectedValues`] for the caller to surface as issues.
///
/// # Errors
///
/// Returns the underlying `serde_yaml` error if the block is not valid
/// YAML or the known keys are not lists of strings.
pub fn parse_front_matter(yaml: &str) -> Result<(FrontMatter, RejectedValues), serde_yaml::Error> {
    let raw: RawFrontMatter = serde_yaml::from_str(yaml)?;
    let mut front = FrontMatter::default();
    let mut rejected = RejectedValues::default();

    for value in raw.implementation_status {
        match value.parse::<ImplementationStatus>() {
            Ok(status) => front.implementation_status.push(status),
            Err(_) => rejected.statuses.push(value),
        }
    }
    for value in raw.control_origination {
        match value.parse::<ControlOrigination>() {
            Ok(origination) => front.control_origination.push(origination),
            Err(_) => rejected.originations.push(value),
        }
    }

    Ok((front, rejected))
}

/// Render the front-matter block, fences included. Empty keys are
/// omitted; an entirely empty front-matter renders as nothing.
pub fn render_front_matter(front: &FrontMatter) -> String {
    if front.is_empty() {
        return String::new();
    }
    let mut out = String::from("---\n");
    if !front.implementation_status.is_empty() {
        out.push_str("implementation-status:\n");
        for status in &front.implementation_status {
            out.push_str("  - ");
            out.push_str(status.as_str());
            out.push('\n');
        }
    }
    if !front.control_origination.is_empty() {
        out.push_str("control-origination:\n");
        for origination in &front.control_origination {
            out.push_str("  - ");
            out.push_str(origination.as_str());
            out.push('\n');
        }
    }
    out.push_str("---\n");
    out
}
