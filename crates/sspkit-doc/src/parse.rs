//! # Stream and File Parsing
//!
//! Splits a source stream into control records and each record into the
//! fixed section set. One stream may carry several concatenated variants
//! of the same control; the record separator is the front-matter fence —
//! a `---` line that opens a new front-matter block after body content.
//!
//! Incomplete content never fails the parse. Missing sections, unknown
//! front-matter values, and filename mismatches become [`ParseIssue`]s on
//! the returned [`ParseOutcome`].

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use sspkit_core::{ControlId, ControlRecord, CoreError, Narrative, PartLabel};

use crate::frontmatter::{parse_front_matter, FrontMatter};
use crate::layout::{
    is_horizontal_rule, SectionKind, GUIDANCE_HEADING, IMPLEMENTATION_PREFIX, OBJECTIVE_HEADING,
    SOLUTION_HEADING, STATEMENT_HEADING,
};

/// Error parsing a control document stream.
#[derive(Error, Debug)]
pub enum DocError {
    /// The file could not be read.
    #[error("cannot read '{path}': {reason}")]
    Read {
        /// Path to the file that failed to load.
        path: String,
        /// Reason the file could not be read.
        reason: String,
    },

    /// The front-matter block is not valid YAML.
    #[error("front-matter of record {index} is not valid YAML: {reason}")]
    FrontMatter {
        /// Zero-based record index within the stream.
        index: usize,
        /// Underlying YAML error text.
        reason: String,
    },

    /// The record has no parseable title heading, so no control id.
    #[error("record {index} has no title heading of the form '# <id> - \\[catalog\\] <Title>'")]
    MissingTitle {
        /// Zero-based record index within the stream.
        index: usize,
    },

    /// The stream contains no records at all.
    #[error("no control records found in stream")]
    EmptyStream,

    /// A control identifier in a title heading failed validation.
    #[error(transparent)]
    Control(#[from] CoreError),
}

/// A non-fatal gap noticed while parsing. Surfaced through the
/// completion-tracking report, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// Zero-based index of the record within its stream.
    pub record_index: usize,
    /// Control id of the record, when one was parsed.
    pub control_id: Option<ControlId>,
    /// What was noticed.
    pub kind: ParseIssueKind,
}

/// The kinds of non-fatal parse gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParseIssueKind {
    /// The record has no front-matter block.
    MissingFrontMatter,
    /// An `implementation-status` entry outside the closed set.
    UnknownStatusValue {
        /// The rejected value.
        value: String,
    },
    /// A `control-origination` entry outside the closed set.
    UnknownOriginationValue {
        /// The rejected value.
        value: String,
    },
    /// A required section heading was absent.
    MissingSection {
        /// Which section.
        section: SectionKind,
    },
    /// An `Implementation` heading whose label cannot name a part.
    InvalidImplementationLabel {
        /// The raw label text.
        label: String,
    },
    /// The filename stem disagrees with the record's control id.
    FilenameMismatch {
        /// The filename stem.
        stem: String,
    },
}

impl fmt::Display for ParseIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFrontMatter => write!(f, "missing front-matter block"),
            Self::UnknownStatusValue { value } => {
                write!(f, "unknown implementation-status value '{value}'")
            }
            Self::UnknownOriginationValue { value } => {
                write!(f, "unknown control-origination value '{value}'")
            }
            Self::MissingSection { section } => {
                write!(f, "missing section '{}'", section.heading())
            }
            Self::InvalidImplementationLabel { label } => {
                write!(f, "implementation heading with invalid part label '{label}'")
            }
            Self::FilenameMismatch { stem } => {
                write!(f, "filename stem '{stem}' does not match control id")
            }
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.control_id {
            Some(id) => write!(f, "record {} ({}): {}", self.record_index, id, self.kind),
            None => write!(f, "record {}: {}", self.record_index, self.kind),
        }
    }
}

/// The result of parsing one stream: the records it held plus every gap
/// noticed along the way.
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    /// Records in stream order.
    pub records: Vec<ControlRecord>,
    /// Non-fatal gaps, in discovery order.
    pub issues: Vec<ParseIssue>,
}

impl ParseOutcome {
    /// True if parsing noticed no gaps at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

fn key_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*:").expect("key line pattern is a valid regex")
    })
}

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#\s+([a-z0-9.\-]+)\s+-\s+\\?\[catalog\\?\]\s+(.+)$")
            .expect("title pattern is a valid regex")
    })
}

/// True if `lines[i]` is a `---` fence that opens a front-matter block:
/// the next non-blank line must look like a YAML key. This is what tells
/// a record separator apart from a horizontal rule.
fn is_fence_open(lines: &[&str], i: usize) -> bool {
    if lines[i].trim_end() != "---" {
        return false;
    }
    lines[i + 1..]
        .iter()
        .find(|l| !l.trim().is_empty())
        .is_some_and(|l| key_line_regex().is_match(l))
}

/// Split a stream into per-record line slices at front-matter fences.
fn split_records<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut starts: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if is_fence_open(lines, i) {
            starts.push(i);
            // Skip past the closing fence so list items inside the block
            // cannot retrigger fence detection.
            let close = lines[i + 1..]
                .iter()
                .position(|l| l.trim_end() == "---")
                .map(|p| i + 1 + p);
            i = close.map_or(lines.len(), |c| c + 1);
        } else {
            i += 1;
        }
    }

    let mut segments: Vec<Vec<&str>> = Vec::new();
    if let Some(&first) = starts.first() {
        // Content before the first fence is a record without front-matter.
        if lines[..first].iter().any(|l| !l.trim().is_empty()) {
            segments.push(lines[..first].to_vec());
        }
        for (n, &start) in starts.iter().enumerate() {
            let end = starts.get(n + 1).copied().unwrap_or(lines.len());
            segments.push(lines[start..end].to_vec());
        }
    } else if lines.iter().any(|l| !l.trim().is_empty()) {
        segments.push(lines.to_vec());
    }
    segments
}

/// Current position within the section layout while scanning a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Before any known heading.
    Preamble,
    /// Inside one of the fixed catalog sections.
    Section(SectionKind),
    /// Inside the narrative at this index.
    Narrative(usize),
}

fn collapse(buf: &[&str]) -> String {
    let joined = buf.join("\n");
    joined.trim_matches('\n').trim_end().to_string()
}

fn parse_record(
    lines: &[&str],
    index: usize,
    issues: &mut Vec<ParseIssue>,
) -> Result<ControlRecord, DocError> {
    let mut front = FrontMatter::default();
    let mut body_start = 0;

    if lines.first().is_some_and(|l| l.trim_end() == "---") {
        let close = lines[1..]
            .iter()
            .position(|l| l.trim_end() == "---")
            .map(|p| p + 1)
            .ok_or_else(|| DocError::FrontMatter {
                index,
                reason: "unterminated front-matter block".to_string(),
            })?;
        let yaml = lines[1..close].join("\n");
        let (parsed, rejected) =
            parse_front_matter(&yaml).map_err(|e| DocError::FrontMatter {
                index,
                reason: e.to_string(),
            })?;
        front = parsed;
        for value in rejected.statuses {
            issues.push(ParseIssue {
                record_index: index,
                control_id: None,
                kind: ParseIssueKind::UnknownStatusValue { value },
            });
        }
        for value in rejected.originations {
            issues.push(ParseIssue {
                record_index: index,
                control_id: None,
                kind: ParseIssueKind::UnknownOriginationValue { value },
            });
        }
        body_start = close + 1;
    } else {
        issues.push(ParseIssue {
            record_index: index,
            control_id: None,
            kind: ParseIssueKind::MissingFrontMatter,
        });
    }

    let body = &lines[body_start..];
    let (title_pos, control_id, title) = body
        .iter()
        .enumerate()
        .find_map(|(pos, line)| {
            title_regex().captures(line).map(|c| (pos, c))
        })
        .map(|(pos, captures)| {
            let id = ControlId::parse(&captures[1]);
            (pos, id, captures[2].trim().to_string())
        })
        .ok_or(DocError::MissingTitle { index })?;
    let control_id = control_id?;

    let mut cursor = Cursor::Preamble;
    let mut seen: Vec<SectionKind> = Vec::new();
    let mut statement: Vec<&str> = Vec::new();
    let mut guidance: Vec<&str> = Vec::new();
    let mut objective: Vec<&str> = Vec::new();
    let mut preamble: Vec<&str> = Vec::new();
    let mut narratives: Vec<(PartLabel, Vec<&str>)> = Vec::new();

    for &line in &body[title_pos + 1..] {
        let trimmed = line.trim_end();
        let section = match trimmed {
            STATEMENT_HEADING => Some(SectionKind::Statement),
            GUIDANCE_HEADING => Some(SectionKind::Guidance),
            OBJECTIVE_HEADING => Some(SectionKind::AssessmentObjective),
            SOLUTION_HEADING => Some(SectionKind::Solution),
            _ => None,
        };
        if let Some(kind) = section {
            if !seen.contains(&kind) {
                seen.push(kind);
            }
            cursor = Cursor::Section(kind);
            continue;
        }
        if let Some(raw_label) = trimmed.strip_prefix(IMPLEMENTATION_PREFIX) {
            match PartLabel::new(raw_label) {
                Ok(label) => {
                    narratives.push((label, Vec::new()));
                    cursor = Cursor::Narrative(narratives.len() - 1);
                }
                Err(_) => {
                    issues.push(ParseIssue {
                        record_index: index,
                        control_id: Some(control_id.clone()),
                        kind: ParseIssueKind::InvalidImplementationLabel {
                            label: raw_label.trim().to_string(),
                        },
                    });
                    cursor = Cursor::Preamble;
                }
            }
            continue;
        }
        // The rule between assessment objective and the solution heading
        // is structural in the catalog half of the document; inside the
        // solution half a rule line is author content.
        if is_horizontal_rule(line)
            && !matches!(
                cursor,
                Cursor::Section(SectionKind::Solution) | Cursor::Narrative(_)
            )
        {
            continue;
        }
        match cursor {
            Cursor::Preamble => {
                // Stray text between the title and the first known
                // heading, e.g. a leftover separator token. Not content.
            }
            Cursor::Section(SectionKind::Statement) => statement.push(line),
            Cursor::Section(SectionKind::Guidance) => guidance.push(line),
            Cursor::Section(SectionKind::AssessmentObjective) => objective.push(line),
            Cursor::Section(SectionKind::Solution) => preamble.push(line),
            Cursor::Narrative(n) => narratives[n].1.push(line),
        }
    }

    for kind in SectionKind::ALL {
        if !seen.contains(&kind) {
            issues.push(ParseIssue {
                record_index: index,
                control_id: Some(control_id.clone()),
                kind: ParseIssueKind::MissingSection { section: kind },
            });
        }
    }

    Ok(ControlRecord {
        control_id,
        title,
        implementation_status: front.implementation_status,
        control_origination: front.control_origination,
        statement: collapse(&statement),
        guidance: collapse(&guidance),
        assessment_objective: collapse(&objective),
        solution_preamble: collapse(&preamble),
        narratives: narratives
            .into_iter()
            .map(|(label, buf)| Narrative {
                label,
                text: collapse(&buf),
            })
            .collect(),
    })
}

/// Parse a source stream into control records.
///
/// A stream holding N concatenated variants yields N records; this is the
/// expected shape for controls with status history, not an error.
///
/// # Errors
///
/// Returns `DocError::EmptyStream` for blank input, and fatal errors for
/// unreadable front-matter YAML, records without a title heading, and
/// malformed control identifiers.
pub fn parse_stream(stream: &str) -> Result<ParseOutcome, DocError> {
    let lines: Vec<&str> = stream.lines().collect();
    let segments = split_records(&lines);
    if segments.is_empty() {
        return Err(DocError::EmptyStream);
    }

    let mut records = Vec::with_capacity(segments.len());
    let mut issues = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        records.push(parse_record(segment, index, &mut issues)?);
    }

    tracing::debug!(
        records = records.len(),
        issues = issues.len(),
        "parsed control stream"
    );
    Ok(ParseOutcome { records, issues })
}

/// Parse one `<control-id>.md` file.
///
/// On top of [`parse_stream`], checks the filename stem against each
/// record's control id; a mismatch is a [`ParseIssue`], not an error.
///
/// # Errors
///
/// Returns `DocError::Read` if the file cannot be read, plus everything
/// [`parse_stream`] can return.
pub fn parse_file(path: &Path) -> Result<ParseOutcome, DocError> {
    let content = std::fs::read_to_string(path).map_err(|e| DocError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let mut outcome = parse_stream(&content)?;

    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        for (index, record) in outcome.records.iter().enumerate() {
            if record.control_id.as_str() != stem {
                outcome.issues.push(ParseIssue {
                    record_index: index,
                    control_id: Some(record.control_id.clone()),
                    kind: ParseIssueKind::FilenameMismatch {
                        stem: stem.to_string(),
                    },
                });
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sspkit_core::{ControlOrigination, ImplementationStatus};

    const AC_2_13: &str = "\
---
implementation-status:
  - c-implemented
control-origination:
  - c-inherited-cloud-gov
---

# ac-2.13 - \\[catalog\\] Account Monitoring for High-risk Individuals

## Control Statement

Monitor the use of accounts by individuals posing significant risk within
a defined time period of discovery of the risk.

## Control guidance

Users who pose a significant security or privacy risk include individuals
for whom reliable evidence indicates an intention to use authorized access
to systems to cause harm.

## Control assessment-objective

the use of accounts is monitored for individuals posing significant risk.

______________________________________________________________________

## What is the solution and how is it implemented?

Customer applications fully inherit this control from cloud.gov.
";

    #[test]
    fn test_parse_single_record() {
        let outcome = parse_stream(AC_2_13).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.is_clean(), "issues: {:?}", outcome.issues);

        let record = &outcome.records[0];
        assert_eq!(record.control_id.as_str(), "ac-2.13");
        assert_eq!(record.title, "Account Monitoring for High-risk Individuals");
        assert_eq!(
            record.implementation_status,
            vec![ImplementationStatus::Implemented]
        );
        assert_eq!(
            record.control_origination,
            vec![ControlOrigination::InheritedCloudGov]
        );
        assert!(record.statement.starts_with("Monitor the use of accounts"));
        assert!(record.guidance.contains("significant security or privacy risk"));
        assert!(record
            .solution_preamble
            .contains("fully inherit this control from cloud.gov"));
        assert!(record.narratives.is_empty());
    }

    #[test]
    fn test_rule_not_captured_as_objective_text() {
        let outcome = parse_stream(AC_2_13).unwrap();
        let record = &outcome.records[0];
        assert!(!record.assessment_objective.contains('_'));
        assert!(record
            .assessment_objective
            .ends_with("individuals posing significant risk."));
    }

    #[test]
    fn test_parse_narrative_sections() {
        let stream = "\
---
implementation-status:
  - c-partially-implemented
control-origination:
  - c-system-specific-control
---

# ac-2 - \\[catalog\\] Account Management

## Control Statement

- \\[a.\\] Define and document the types of accounts allowed;
- \\[b.\\] Assign account managers;

## Control guidance

Guidance text.

## Control assessment-objective

Objective text.

______________________________________________________________________

## What is the solution and how is it implemented?

## Implementation a.

Account types are defined in the access policy.

## Implementation b.

Add control implementation description here for item ac-2_smt.b

";
        let outcome = parse_stream(stream).unwrap();
        assert!(outcome.is_clean(), "issues: {:?}", outcome.issues);
        let record = &outcome.records[0];
        assert_eq!(record.narrative_keys(), vec!["a", "b"]);
        assert_eq!(record.narratives[0].label.raw(), "a.");
        assert!(record.narratives[0].text.contains("access policy"));
        assert!(record.narratives[1]
            .text
            .starts_with("Add control implementation description here"));
        assert!(record.solution_preamble.is_empty());
    }

    #[test]
    fn test_two_concatenated_variants_yield_two_records() {
        // The ma-6 scenario: one stream, two variants, one control id.
        let stream = "\
---
implementation-status:
  - c-not-implemented
control-origination:
  - c-system-specific-control
---

# ma-6 - \\[catalog\\] Timely Maintenance

## Control Statement

Obtain maintenance support within a defined time period of failure.

## Control guidance

Guidance text.

## Control assessment-objective

Objective text.

______________________________________________________________________

## What is the solution and how is it implemented?

Add control implementation description here for control ma-6

---
implementation-status:
  - c-implemented
control-origination:
  - c-inherited-cloud-gov
---

# ma-6 - \\[catalog\\] Timely Maintenance

## Control Statement

Obtain maintenance support within a defined time period of failure.

## Control guidance

Guidance text.

## Control assessment-objective

Objective text.

______________________________________________________________________

## What is the solution and how is it implemented?

Customer applications fully inherit this control from cloud.gov.
";
        let outcome = parse_stream(stream).unwrap();
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.is_clean(), "issues: {:?}", outcome.issues);
        assert_eq!(outcome.records[0].control_id, outcome.records[1].control_id);
        assert_eq!(
            outcome.records[0].implementation_status,
            vec![ImplementationStatus::NotImplemented]
        );
        assert_eq!(
            outcome.records[1].implementation_status,
            vec![ImplementationStatus::Implemented]
        );
        assert!(outcome.records[1]
            .solution_preamble
            .contains("fully inherit this control from cloud.gov"));
    }

    #[test]
    fn test_missing_sections_are_issues_not_errors() {
        let stream = "\
---
implementation-status:
  - c-not-implemented
---

# cp-8.2 - \\[catalog\\] Single Points of Failure

## Control Statement

Obtain alternate telecommunications services to reduce the likelihood of
sharing a single point of failure with primary services.
";
        let outcome = parse_stream(stream).unwrap();
        assert_eq!(outcome.records.len(), 1);
        let missing: Vec<&SectionKind> = outcome
            .issues
            .iter()
            .filter_map(|i| match &i.kind {
                ParseIssueKind::MissingSection { section } => Some(section),
                _ => None,
            })
            .collect();
        assert_eq!(
            missing,
            vec![
                &SectionKind::Guidance,
                &SectionKind::AssessmentObjective,
                &SectionKind::Solution
            ]
        );
    }

    #[test]
    fn test_missing_front_matter_is_an_issue() {
        let stream = "\
# au-6 - \\[catalog\\] Audit Record Review

## Control Statement

Review and analyze system audit records.
";
        let outcome = parse_stream(stream).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.kind == ParseIssueKind::MissingFrontMatter));
    }

    #[test]
    fn test_unknown_front_matter_values_are_issues() {
        let stream = "\
---
implementation-status:
  - c-finished
control-origination:
  - c-system-specific-control
---

# cm-3 - \\[catalog\\] Configuration Change Control

## Control Statement

Statement text.

## Control guidance

Guidance text.

## Control assessment-objective

Objective text.

______________________________________________________________________

## What is the solution and how is it implemented?

Narrative text.
";
        let outcome = parse_stream(stream).unwrap();
        let record = &outcome.records[0];
        assert!(record.implementation_status.is_empty());
        assert!(outcome.issues.iter().any(|i| matches!(
            &i.kind,
            ParseIssueKind::UnknownStatusValue { value } if value == "c-finished"
        )));
    }

    #[test]
    fn test_invalid_control_id_is_fatal() {
        let stream = "# Not-An-Id - \\[catalog\\] Broken\n\n## Control Statement\n\ntext\n";
        // Title regex requires lowercase, so this surfaces as MissingTitle.
        let err = parse_stream(stream).unwrap_err();
        assert!(matches!(err, DocError::MissingTitle { .. }), "got: {err}");
    }

    #[test]
    fn test_empty_stream_is_fatal() {
        assert!(matches!(
            parse_stream("\n\n  \n").unwrap_err(),
            DocError::EmptyStream
        ));
    }

    #[test]
    fn test_unterminated_front_matter_is_fatal() {
        let stream = "---\nimplementation-status:\n  - c-implemented\n";
        let err = parse_stream(stream).unwrap_err();
        assert!(matches!(err, DocError::FrontMatter { .. }), "got: {err}");
    }

    #[test]
    fn test_unescaped_catalog_marker_accepted() {
        let stream = "\
# sc-7 - [catalog] Boundary Protection

## Control Statement

Monitor and control communications at the external boundary.
";
        let outcome = parse_stream(stream).unwrap();
        assert_eq!(outcome.records[0].control_id.as_str(), "sc-7");
        assert_eq!(outcome.records[0].title, "Boundary Protection");
    }
}
