//! # Integrity Checks
//!
//! Turns a loaded corpus into a list of structured findings: parse gaps,
//! closed-set violations, part-coverage mismatches between Control
//! Statement and Implementation sections, and duplicate control ids.
//!
//! Duplicate ids are informational. The corpus legitimately carries more
//! than one variant of a control (status history), so the check reports
//! the multiplicity with content fingerprints and leaves the judgement to
//! the reader.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use sspkit_core::{fingerprint, statement_part_labels, ControlId};
use sspkit_doc::{render_record, ParseIssueKind};

use crate::corpus::Corpus;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; never fails validation.
    Info,
    /// A gap worth fixing; fails validation only in strict mode.
    Warning,
    /// A schema violation; always fails validation.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// One validation finding with its source context.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// How serious the finding is.
    pub severity: Severity,
    /// The source file.
    pub path: PathBuf,
    /// The control the finding is about, when known.
    pub control_id: Option<ControlId>,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.control_id {
            Some(id) => write!(
                f,
                "{}: {} [{}]: {}",
                self.severity,
                self.path.display(),
                id,
                self.message
            ),
            None => write!(f, "{}: {}: {}", self.severity, self.path.display(), self.message),
        }
    }
}

fn issue_severity(kind: &ParseIssueKind) -> Severity {
    match kind {
        // Closed-set and naming violations break the schema contract.
        ParseIssueKind::UnknownStatusValue { .. }
        | ParseIssueKind::UnknownOriginationValue { .. }
        | ParseIssueKind::InvalidImplementationLabel { .. }
        | ParseIssueKind::FilenameMismatch { .. } => Severity::Error,
        // Absent structure is incomplete-but-not-fatal.
        ParseIssueKind::MissingFrontMatter | ParseIssueKind::MissingSection { .. } => {
            Severity::Warning
        }
    }
}

fn part_coverage_findings(path: &Path, record: &sspkit_core::ControlRecord) -> Vec<Finding> {
    let mut findings = Vec::new();
    if record.statement.is_empty() {
        // Missing statement is already a warning; nothing to cover.
        return findings;
    }
    let part_keys: Vec<String> = statement_part_labels(&record.statement)
        .iter()
        .map(|l| l.key())
        .collect();
    let narrative_keys = record.narrative_keys();

    for key in &part_keys {
        if !narrative_keys.contains(key) {
            findings.push(Finding {
                severity: Severity::Error,
                path: path.to_path_buf(),
                control_id: Some(record.control_id.clone()),
                message: format!("statement part '{key}' has no Implementation section"),
            });
        }
    }
    for key in &narrative_keys {
        if !part_keys.contains(key) {
            findings.push(Finding {
                severity: Severity::Warning,
                path: path.to_path_buf(),
                control_id: Some(record.control_id.clone()),
                message: format!(
                    "Implementation section '{key}' does not correspond to a statement part"
                ),
            });
        }
    }
    findings
}

/// Run every integrity check over a loaded corpus.
pub fn run_checks(corpus: &Corpus) -> Vec<Finding> {
    let mut findings = Vec::new();

    for failure in &corpus.failures {
        findings.push(Finding {
            severity: Severity::Error,
            path: failure.path.clone(),
            control_id: None,
            message: failure.error.clone(),
        });
    }

    for doc in &corpus.documents {
        for issue in &doc.issues {
            findings.push(Finding {
                severity: issue_severity(&issue.kind),
                path: doc.path.clone(),
                control_id: issue.control_id.clone(),
                message: issue.to_string(),
            });
        }
        for record in &doc.records {
            findings.extend(part_coverage_findings(&doc.path, record));
        }
    }

    // Duplicate control ids across the corpus: report the variants with
    // their fingerprints, as information.
    let mut by_id: BTreeMap<&ControlId, Vec<(&Path, String)>> = BTreeMap::new();
    for (path, record) in corpus.records() {
        let fp = fingerprint(&render_record(record)).short();
        by_id.entry(&record.control_id).or_default().push((path, fp));
    }
    for (id, variants) in by_id {
        if variants.len() > 1 {
            let detail = variants
                .iter()
                .map(|(path, fp)| format!("{} ({fp})", path.display()))
                .collect::<Vec<_>>()
                .join(", ");
            findings.push(Finding {
                severity: Severity::Info,
                path: variants[0].0.to_path_buf(),
                control_id: Some(id.clone()),
                message: format!("{} variants of this control: {detail}", variants.len()),
            });
        }
    }

    findings
}

/// The highest severity among findings, if any.
pub fn max_severity(findings: &[Finding]) -> Option<Severity> {
    findings.iter().map(|f| f.severity).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusDocument;
    use sspkit_doc::parse_stream;
    use std::path::PathBuf;

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

    const COVERED: &str = "\
---
implementation-status:
  - c-implemented
control-origination:
  - c-system-specific-control
---

# au-6 - \\[catalog\\] Audit Record Review

## Control Statement

- \\[a.\\] Review and analyze audit records;
- \\[b.\\] Report findings;

## Control guidance

Guidance text.

## Control assessment-objective

Objective text.

______________________________________________________________________

## What is the solution and how is it implemented?

## Implementation a.

Audit records reviewed weekly.

## Implementation b.

Findings reported to the ISSO.
";

    #[test]
    fn test_clean_record_no_findings() {
        let corpus = corpus_from(&[("au-6.md", COVERED)]);
        let findings = run_checks(&corpus);
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn test_missing_narrative_for_part_is_error() {
        let stream = COVERED.replace("## Implementation b.\n\nFindings reported to the ISSO.\n", "");
        let corpus = corpus_from(&[("au-6.md", &stream)]);
        let findings = run_checks(&corpus);
        assert!(findings.iter().any(|f| f.severity == Severity::Error
            && f.message.contains("statement part 'b' has no Implementation section")));
    }

    #[test]
    fn test_extra_narrative_is_warning() {
        let stream = format!("{COVERED}\n## Implementation c.\n\nNot a statement part.\n");
        let corpus = corpus_from(&[("au-6.md", &stream)]);
        let findings = run_checks(&corpus);
        assert!(findings.iter().any(|f| f.severity == Severity::Warning
            && f.message.contains("'c' does not correspond to a statement part")));
    }

    #[test]
    fn test_duplicate_ids_reported_as_info() {
        let implemented = COVERED.replace("c-implemented", "c-partially-implemented");
        let corpus = corpus_from(&[("au-6.md", COVERED), ("au-6-old.md", &implemented)]);
        let findings = run_checks(&corpus);
        let dup: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.message.contains("variants of this control"))
            .collect();
        assert_eq!(dup.len(), 1);
        assert_eq!(dup[0].severity, Severity::Info);
        assert!(dup[0].message.starts_with("2 variants"));
    }

    #[test]
    fn test_load_failure_is_error_finding() {
        let mut corpus = corpus_from(&[("au-6.md", COVERED)]);
        corpus.failures.push(crate::corpus::LoadFailure {
            path: PathBuf::from("broken.md"),
            error: "no control records found in stream".to_string(),
        });
        let findings = run_checks(&corpus);
        assert_eq!(max_severity(&findings), Some(Severity::Error));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
