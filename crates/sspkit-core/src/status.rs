//! # Front-Matter Enumerations — Single Source of Truth
//!
//! Defines the `ImplementationStatus` and `ControlOrigination` enums used by
//! every crate in the stack. These are the ONE definition each; every `match`
//! must be exhaustive, so adding a value forces every consumer to handle it
//! at compile time.
//!
//! ## Invariant
//!
//! Both enumerations are closed. A front-matter value outside the set is
//! rejected at the boundary with a structured error; the parser converts
//! that rejection into a finding rather than storing a loose string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Implementation status of a control, as recorded in the
/// `implementation-status` front-matter list.
///
/// | Value | Meaning |
/// |-------|---------|
/// | `c-implemented` | Fully implemented |
/// | `c-partially-implemented` | Some parts implemented |
/// | `c-planned` | Implementation scheduled |
/// | `c-alternative-implementation` | Satisfied by a compensating mechanism |
/// | `c-not-implemented` | Not implemented |
/// | `c-not-applicable` | Out of scope for the system |
///
/// The status carries no enforced relation to narrative content: a
/// `c-not-implemented` record full of placeholder text is expected, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImplementationStatus {
    /// Fully implemented.
    #[serde(rename = "c-implemented")]
    Implemented,
    /// Some statement parts implemented, others outstanding.
    #[serde(rename = "c-partially-implemented")]
    PartiallyImplemented,
    /// Implementation scheduled but not started.
    #[serde(rename = "c-planned")]
    Planned,
    /// Satisfied through a compensating mechanism.
    #[serde(rename = "c-alternative-implementation")]
    AlternativeImplementation,
    /// Not implemented.
    #[serde(rename = "c-not-implemented")]
    NotImplemented,
    /// Out of scope for the system under assessment.
    #[serde(rename = "c-not-applicable")]
    NotApplicable,
}

impl ImplementationStatus {
    /// All statuses, in severity order from complete to absent.
    pub const ALL: [Self; 6] = [
        Self::Implemented,
        Self::PartiallyImplemented,
        Self::Planned,
        Self::AlternativeImplementation,
        Self::NotImplemented,
        Self::NotApplicable,
    ];

    /// The front-matter string form, e.g. `"c-implemented"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Implemented => "c-implemented",
            Self::PartiallyImplemented => "c-partially-implemented",
            Self::Planned => "c-planned",
            Self::AlternativeImplementation => "c-alternative-implementation",
            Self::NotImplemented => "c-not-implemented",
            Self::NotApplicable => "c-not-applicable",
        }
    }
}

impl FromStr for ImplementationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "c-implemented" => Ok(Self::Implemented),
            "c-partially-implemented" => Ok(Self::PartiallyImplemented),
            "c-planned" => Ok(Self::Planned),
            "c-alternative-implementation" => Ok(Self::AlternativeImplementation),
            "c-not-implemented" => Ok(Self::NotImplemented),
            "c-not-applicable" => Ok(Self::NotApplicable),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ImplementationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origination of a control, as recorded in the `control-origination`
/// front-matter list. A record may carry several originations (hybrid
/// arrangements).
///
/// | Value | Meaning |
/// |-------|---------|
/// | `c-inherited-cloud-gov` | Satisfied by the cloud.gov platform |
/// | `c-inherited-cisa` | Satisfied by CISA shared services |
/// | `c-common-control` | Provided once for many systems |
/// | `c-system-specific-control` | Implemented by this system |
/// | `c-hybrid-control` | Split between provider and system |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControlOrigination {
    /// Fully inherited from the cloud.gov platform.
    #[serde(rename = "c-inherited-cloud-gov")]
    InheritedCloudGov,
    /// Fully inherited from CISA shared services.
    #[serde(rename = "c-inherited-cisa")]
    InheritedCisa,
    /// Provided as a common control across systems.
    #[serde(rename = "c-common-control")]
    CommonControl,
    /// Implemented specifically by the system under assessment.
    #[serde(rename = "c-system-specific-control")]
    SystemSpecificControl,
    /// Responsibility split between an upstream provider and the system.
    #[serde(rename = "c-hybrid-control")]
    HybridControl,
}

impl ControlOrigination {
    /// All originations.
    pub const ALL: [Self; 5] = [
        Self::InheritedCloudGov,
        Self::InheritedCisa,
        Self::CommonControl,
        Self::SystemSpecificControl,
        Self::HybridControl,
    ];

    /// The front-matter string form, e.g. `"c-common-control"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InheritedCloudGov => "c-inherited-cloud-gov",
            Self::InheritedCisa => "c-inherited-cisa",
            Self::CommonControl => "c-common-control",
            Self::SystemSpecificControl => "c-system-specific-control",
            Self::HybridControl => "c-hybrid-control",
        }
    }

    /// True if the control is satisfied by an upstream provider rather
    /// than the system owner.
    pub fn is_inherited(&self) -> bool {
        matches!(self, Self::InheritedCloudGov | Self::InheritedCisa)
    }
}

impl FromStr for ControlOrigination {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "c-inherited-cloud-gov" => Ok(Self::InheritedCloudGov),
            "c-inherited-cisa" => Ok(Self::InheritedCisa),
            "c-common-control" => Ok(Self::CommonControl),
            "c-system-specific-control" => Ok(Self::SystemSpecificControl),
            "c-hybrid-control" => Ok(Self::HybridControl),
            other => Err(CoreError::UnknownOrigination(other.to_string())),
        }
    }
}

impl fmt::Display for ControlOrigination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
