//! # Content Fingerprints
//!
//! SHA-256 fingerprints over normalized document text. Used by the corpus
//! report to tell apart concatenated variants of the same control id: two
//! `ma-6` records with different content get different fingerprints, a
//! verbatim duplicate gets the same one.
//!
//! Normalization is line-oriented: CRLF becomes LF, trailing whitespace per
//! line is dropped, trailing blank lines are dropped. Heading text and
//! section order always survive normalization, so the fingerprint tracks
//! exactly what the round-trip property preserves.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A SHA-256 fingerprint of normalized document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    /// Render the fingerprint as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// A short prefix of the hex form, enough to distinguish variants in
    /// report output.
    pub fn short(&self) -> String {
        self.to_hex()[..12].to_string()
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Normalize document text for fingerprinting.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.replace("\r\n", "\n").lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// Compute the fingerprint of a document or record text.
pub fn fingerprint(text: &str) -> Fingerprint {
    let hash = Sha256::digest(normalize(text).as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Fingerprint(bytes)
}
