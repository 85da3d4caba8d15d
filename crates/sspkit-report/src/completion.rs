//! # Completion Tracking
//!
//! The authoring workflow starts every narrative as catalog placeholder
//! text and fills it in over time. This module measures how far along a
//! corpus is: per-record narrative completion plus a corpus summary by
//! status, origination, and duplicate multiplicity.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use sspkit_core::{ControlId, ControlOrigination, ControlRecord, ImplementationStatus};

use crate::corpus::Corpus;

/// Prefix of the catalog placeholder that marks an unwritten narrative.
pub const PLACEHOLDER_PREFIX: &str = "Add control implementation description here";

/// True if a narrative text is still unwritten: blank, or the catalog
/// placeholder.
pub fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.starts_with(PLACEHOLDER_PREFIX)
}

/// Completion state of one record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordCompletion {
    /// The control this record describes.
    pub control_id: ControlId,
    /// Title from the document heading.
    pub title: String,
    /// Source file.
    pub path: PathBuf,
    /// Front-matter statuses.
    pub implementation_status: Vec<ImplementationStatus>,
    /// Front-matter originations.
    pub control_origination: Vec<ControlOrigination>,
    /// Number of narrative slots: one per `Implementation` section, or a
    /// single whole-control slot when the record has none.
    pub parts_total: usize,
    /// Narrative slots with real text (not blank, not placeholder).
    pub parts_filled: usize,
    /// True if every origination is an inherited one.
    pub fully_inherited: bool,
}

impl RecordCompletion {
    fn for_record(path: &std::path::Path, record: &ControlRecord) -> Self {
        let (parts_total, parts_filled) = if record.narratives.is_empty() {
            (1, usize::from(!is_placeholder(&record.solution_preamble)))
        } else {
            (
                record.narratives.len(),
                record
                    .narratives
                    .iter()
                    .filter(|n| !is_placeholder(&n.text))
                    .count(),
            )
        };
        Self {
            control_id: record.control_id.clone(),
            title: record.title.clone(),
            path: path.to_path_buf(),
            implementation_status: record.implementation_status.clone(),
            control_origination: record.control_origination.clone(),
            parts_total,
            parts_filled,
            fully_inherited: record.is_fully_inherited(),
        }
    }

    /// True if every narrative slot has real text.
    pub fn is_complete(&self) -> bool {
        self.parts_filled == self.parts_total
    }
}

/// Corpus-level completion totals.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionSummary {
    /// Parsed source files.
    pub total_documents: usize,
    /// Files that failed to parse.
    pub failed_documents: usize,
    /// Records across all files.
    pub total_records: usize,
    /// Record counts per `implementation-status` value.
    pub by_status: BTreeMap<String, usize>,
    /// Record counts per `control-origination` value.
    pub by_origination: BTreeMap<String, usize>,
    /// Narrative slots across the corpus.
    pub total_parts: usize,
    /// Narrative slots still blank or placeholder.
    pub unfinished_parts: usize,
    /// Control ids with more than one record, and how many.
    pub duplicate_ids: BTreeMap<String, usize>,
}

/// The completion-tracking report: one row per record plus totals.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    /// Per-record completion rows, in corpus order.
    pub records: Vec<RecordCompletion>,
    /// Corpus totals.
    pub summary: CompletionSummary,
}

impl CompletionReport {
    /// Render the report as human-readable text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.records {
            let statuses = row
                .implementation_status
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(",");
            let statuses = if statuses.is_empty() { "-" } else { &statuses };
            out.push_str(&format!(
                "{:<12} {}/{} {:<28} {}\n",
                row.control_id.as_str(),
                row.parts_filled,
                row.parts_total,
                statuses,
                row.title
            ));
        }
        let s = &self.summary;
        out.push_str(&format!(
            "\n{} records in {} documents ({} failed to parse)\n",
            s.total_records, s.total_documents, s.failed_documents
        ));
        out.push_str(&format!(
            "narratives: {}/{} written\n",
            s.total_parts - s.unfinished_parts,
            s.total_parts
        ));
        for (status, count) in &s.by_status {
            out.push_str(&format!("  {status}: {count}\n"));
        }
        if !s.duplicate_ids.is_empty() {
            let ids = s
                .duplicate_ids
                .iter()
                .map(|(id, n)| format!("{id} ({n})"))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("duplicate control ids: {ids}\n"));
        }
        out
    }
}

/// Build the completion-tracking report for a loaded corpus.
pub fn completion_report(corpus: &Corpus) -> CompletionReport {
    let mut records = Vec::new();
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_origination: BTreeMap<String, usize> = BTreeMap::new();
    let mut id_counts: BTreeMap<String, usize> = BTreeMap::new();

    for (path, record) in corpus.records() {
        for status in &record.implementation_status {
            *by_status.entry(status.as_str().to_string()).or_default() += 1;
        }
        for origination in &record.control_origination {
            *by_origination
                .entry(origination.as_str().to_string())
                .or_default() += 1;
        }
        *id_counts
            .entry(record.control_id.as_str().to_string())
            .or_default() += 1;
        records.push(RecordCompletion::for_record(path, record));
    }

    let total_parts: usize = records.iter().map(|r| r.parts_total).sum();
    let filled_parts: usize = records.iter().map(|r| r.parts_filled).sum();
    let duplicate_ids: BTreeMap<String, usize> =
        id_counts.into_iter().filter(|(_, n)| *n > 1).collect();

    let summary = CompletionSummary {
        total_documents: corpus.documents.len(),
        failed_documents: corpus.failures.len(),
        total_records: records.len(),
        by_status,
        by_origination,
        total_parts,
        unfinished_parts: total_parts - filled_parts,
        duplicate_ids,
    };
    CompletionReport { records, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusDocument;
    use sspkit_doc::parse_stream;

    fn corpus_from(streams: &[(&str, &str)]) -> Corpus {
        let mut corpus = Corpus::default();
        for (name, stream) in streams {
            let outcome = parse_stream(stream).unwrap();
            corpus.documents.push(CorpusDocument {
                path: PathBuf::from(name),
                records: outcome.records,
                issues: outcome.issues,
            });
        }
        corpus
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   \n"));
        assert!(is_placeholder(
            "Add control implementation description here for item ac-2_smt.a"
        ));
        assert!(!is_placeholder("Accounts are managed via the IdP."));
    }

    #[test]
    fn test_per_part_completion() {
        let stream = "\
---
implementation-status:
  - c-partially-implemented
control-origination:
  - c-system-specific-control
---

# ac-2 - \\[catalog\\] Account Management

## Control Statement

- \\[a.\\] Define account types;
- \\[b.\\] Assign account managers;

## Control guidance

Guidance.

## Control assessment-objective

Objective.

______________________________________________________________________

## What is the solution and how is it implemented?

## Implementation a.

Defined in the access policy.

## Implementation b.

Add control implementation description here for item ac-2_smt.b
";
        let corpus = corpus_from(&[("ac-2.md", stream)]);
        let report = completion_report(&corpus);
        assert_eq!(report.records.len(), 1);
        let row = &report.records[0];
        assert_eq!(row.parts_total, 2);
        assert_eq!(row.parts_filled, 1);
        assert!(!row.is_complete());
        assert_eq!(report.summary.unfinished_parts, 1);
        assert_eq!(
            report.summary.by_status.get("c-partially-implemented"),
            Some(&1)
        );
    }

    #[test]
    fn test_whole_control_narrative_counts_as_one_part() {
        let stream = "\
---
implementation-status:
  - c-implemented
control-origination:
  - c-inherited-cloud-gov
---

# ma-6 - \\[catalog\\] Timely Maintenance

## Control Statement

Obtain maintenance support within a defined time period.

## Control guidance

Guidance.

## Control assessment-objective

Objective.

______________________________________________________________________

## What is the solution and how is it implemented?

Customer applications fully inherit this control from cloud.gov.
";
        let corpus = corpus_from(&[("ma-6.md", stream)]);
        let report = completion_report(&corpus);
        let row = &report.records[0];
        assert_eq!((row.parts_total, row.parts_filled), (1, 1));
        assert!(row.is_complete());
        assert!(row.fully_inherited);
    }

    #[test]
    fn test_duplicate_ids_in_summary() {
        let unimplemented = "\
---
implementation-status:
  - c-not-implemented
---

# ma-6 - \\[catalog\\] Timely Maintenance

## Control Statement

Statement.

## Control guidance

Guidance.

## Control assessment-objective

Objective.

______________________________________________________________________

## What is the solution and how is it implemented?

Add control implementation description here for control ma-6
";
        let implemented = unimplemented
            .replace("c-not-implemented", "c-implemented")
            .replace(
                "Add control implementation description here for control ma-6",
                "Customer applications fully inherit this control from cloud.gov.",
            );
        let stream = format!("{unimplemented}\n{implemented}");
        let corpus = corpus_from(&[("ma-6.md", &stream)]);
        let report = completion_report(&corpus);
        assert_eq!(report.summary.total_records, 2);
        assert_eq!(report.summary.duplicate_ids.get("ma-6"), Some(&2));
        assert_eq!(report.summary.unfinished_parts, 1);
    }

    #[test]
    fn test_text_rendering_mentions_totals() {
        let corpus = corpus_from(&[]);
        let report = completion_report(&corpus);
        let text = report.to_text();
        assert!(text.contains("0 records in 0 documents"));
    }
}
