//! # Statement Part Extraction
//!
//! Finds the lettered/numbered sub-parts of a Control Statement. Catalog
//! statements mark parts as top-level list items with a bracketed label:
//!
//! ```text
//! - \[a.\] Define and document the types of accounts...
//! - \[b.\] Assign account managers;
//!   - \[1.\] a nested item belongs to part b, not to the part list
//! ```
//!
//! Only unindented bullets introduce parts; indented bullets are sub-items
//! of the enclosing part. The extracted labels drive the 1:1 check against
//! `Implementation <label>` sections.

use std::sync::OnceLock;

use regex::Regex;

use crate::record::PartLabel;

fn part_bullet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Unindented bullet, optionally markdown-escaped brackets, label inside.
        Regex::new(r"^[-*]\s+\\?\[([^\[\]\\]{1,5})\\?\]\s+")
            .expect("part bullet pattern is a valid regex")
    })
}

/// Extract the part labels referenced by a Control Statement, in order of
/// first appearance. Labels that do not normalize to a valid part key
/// (see [`PartLabel::new`]) are skipped; duplicates keep the first
/// occurrence.
pub fn statement_part_labels(statement: &str) -> Vec<PartLabel> {
    let mut labels: Vec<PartLabel> = Vec::new();
    for line in statement.lines() {
        let Some(captures) = part_bullet_regex().captures(line) else {
            continue;
        };
        let Ok(label) = PartLabel::new(&captures[1]) else {
            continue;
        };
        if labels.iter().all(|l| l.key() != label.key()) {
            labels.push(label);
        }
    }
    labels
}
