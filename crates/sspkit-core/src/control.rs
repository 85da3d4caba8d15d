//! # Control Identifiers
//!
//! Newtype wrapper for NIST SP 800-53 catalog identifiers. A control id is
//! a two-letter family code, a dash, a control number, and an optional
//! enhancement number: `ac-2`, `ac-2.13`, `au-6.1`.
//!
//! ## Invariant
//!
//! Every `ControlId` in the system matches `^[a-z]{2}-[0-9]+(\.[0-9]+)?$`.
//! The validating constructor is the only way to build one, so a malformed
//! identifier cannot travel past the parse boundary.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Catalog identifier pattern shared by the constructor and the validator.
pub const CONTROL_ID_PATTERN: &str = r"^[a-z]{2}-[0-9]+(\.[0-9]+)?$";

fn control_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(CONTROL_ID_PATTERN).expect("control id pattern is a valid regex")
    })
}

/// A validated NIST SP 800-53 control or control-enhancement identifier.
///
/// Lowercase catalog form only. Enhancement ids carry a `.N` suffix after
/// the base control number (`ac-2.13` is enhancement 13 of `ac-2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ControlId(String);

impl ControlId {
    /// Parse and validate a control identifier.
    ///
    /// Leading/trailing whitespace is trimmed; the identifier itself must
    /// already be lowercase catalog form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidControlId` if the trimmed input does not
    /// match the catalog pattern.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        if control_id_regex().is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(CoreError::InvalidControlId {
                value: input.to_string(),
                reason: format!("does not match catalog pattern {CONTROL_ID_PATTERN}"),
            })
        }
    }

    /// The identifier text, e.g. `"ac-2.13"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two-letter control family, e.g. `"ac"`.
    pub fn family(&self) -> &str {
        &self.0[..2]
    }

    /// The base control id with any enhancement suffix stripped:
    /// `ac-2.13` -> `ac-2`, `ac-2` -> `ac-2`.
    pub fn base(&self) -> &str {
        match self.0.find('.') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// The enhancement number, if this id names a control enhancement.
    pub fn enhancement(&self) -> Option<u32> {
        let suffix = &self.0[self.0.find('.')? + 1..];
        suffix.parse().ok()
    }

    /// True if this id names an enhancement rather than a base control.
    pub fn is_enhancement(&self) -> bool {
        self.0.contains('.')
    }
}

impl FromStr for ControlId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ControlId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ControlId> for String {
    fn from(id: ControlId) -> Self {
        id.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_base_control() {
        let id = ControlId::parse("ac-2").unwrap();
        assert_eq!(id.as_str(), "ac-2");
        assert_eq!(id.family(), "ac");
        assert_eq!(id.base(), "ac-2");
        assert_eq!(id.enhancement(), None);
        assert!(!id.is_enhancement());
    }

    #[test]
    fn test_parse_enhancement() {
        let id = ControlId::parse("ac-2.13").unwrap();
        assert_eq!(id.family(), "ac");
        assert_eq!(id.base(), "ac-2");
        assert_eq!(id.enhancement(), Some(13));
        assert!(id.is_enhancement());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id = ControlId::parse("  au-6.1\n").unwrap();
        assert_eq!(id.as_str(), "au-6.1");
    }

    #[test]
    fn test_parse_rejects_uppercase() {
        assert!(ControlId::parse("AC-2").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["ac2", "ac-", "a-2", "acm-2", "ac-2.", "ac-2.3.4", "ac_2", ""] {
            assert!(ControlId::parse(bad).is_err(), "accepted '{bad}'");
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let id = ControlId::parse("cm-3").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cm-3\"");
        let back: ControlId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let err = serde_json::from_str::<ControlId>("\"not an id\"");
        assert!(err.is_err());
    }

    proptest! {
        #[test]
        fn prop_valid_ids_round_trip(
            family in "[a-z]{2}",
            number in 1u32..100,
            enhancement in proptest::option::of(1u32..30),
        ) {
            let text = match enhancement {
                Some(e) => format!("{family}-{number}.{e}"),
                None => format!("{family}-{number}"),
            };
            let id = ControlId::parse(&text).unwrap();
            prop_assert_eq!(id.as_str(), text.as_str());
            prop_assert_eq!(id.family(), family.as_str());
        }

        #[test]
        fn prop_parse_never_panics(input in ".*") {
            let _ = ControlId::parse(&input);
        }
    }
}
