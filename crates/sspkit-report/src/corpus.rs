//! # Corpus Loading
//!
//! Loads a file or a directory of control documents into memory. A
//! directory load is total: a file that fails to parse is recorded as a
//! `LoadFailure` next to the documents that did parse, so one broken file
//! never hides the state of the rest of the corpus.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use sspkit_core::ControlRecord;
use sspkit_doc::{parse_file, DocError, ParseIssue};

/// Error loading a corpus.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The given path does not exist.
    #[error("path not found: '{path}'")]
    NotFound {
        /// The missing path.
        path: String,
    },

    /// The corpus directory could not be read.
    #[error("cannot read directory '{path}': {reason}")]
    ReadDir {
        /// The directory path.
        path: String,
        /// Reason the directory could not be read.
        reason: String,
    },

    /// A single-file load failed. Directory loads collect failures
    /// instead of returning this.
    #[error(transparent)]
    Doc(#[from] DocError),
}

/// One parsed source file.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusDocument {
    /// Where the document came from.
    pub path: PathBuf,
    /// Records parsed from the file, in stream order.
    pub records: Vec<ControlRecord>,
    /// Parse gaps noticed in this file.
    pub issues: Vec<ParseIssue>,
}

/// A file that could not be parsed at all.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    /// The failing file.
    pub path: PathBuf,
    /// The fatal error, rendered.
    pub error: String,
}

/// A loaded corpus: every document that parsed plus every file that
/// did not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Corpus {
    /// Parsed documents, in path order.
    pub documents: Vec<CorpusDocument>,
    /// Files that failed to parse, in path order.
    pub failures: Vec<LoadFailure>,
}

impl Corpus {
    /// Load a corpus from a file or a directory.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NotFound` for a missing path, `ReadDir` for
    /// an unreadable directory, and the underlying `DocError` when the
    /// path names a single file that cannot be parsed.
    pub fn load_path(path: &Path) -> Result<Self, ReportError> {
        if path.is_dir() {
            Self::load_dir(path)
        } else if path.is_file() {
            let outcome = parse_file(path)?;
            Ok(Self {
                documents: vec![CorpusDocument {
                    path: path.to_path_buf(),
                    records: outcome.records,
                    issues: outcome.issues,
                }],
                failures: Vec::new(),
            })
        } else {
            Err(ReportError::NotFound {
                path: path.display().to_string(),
            })
        }
    }

    /// Load every `*.md` file in a directory, sorted by filename.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::ReadDir` if the directory itself cannot be
    /// listed. Per-file parse failures are collected, not returned.
    pub fn load_dir(dir: &Path) -> Result<Self, ReportError> {
        let entries = std::fs::read_dir(dir).map_err(|e| ReportError::ReadDir {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("md")
            })
            .collect();
        paths.sort();

        let mut corpus = Self::default();
        for path in paths {
            match parse_file(&path) {
                Ok(outcome) => {
                    tracing::debug!(
                        path = %path.display(),
                        records = outcome.records.len(),
                        issues = outcome.issues.len(),
                        "loaded control document"
                    );
                    corpus.documents.push(CorpusDocument {
                        path,
                        records: outcome.records,
                        issues: outcome.issues,
                    });
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "control document failed to parse");
                    corpus.failures.push(LoadFailure {
                        path,
                        error: error.to_string(),
                    });
                }
            }
        }
        tracing::info!(
            documents = corpus.documents.len(),
            failures = corpus.failures.len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// Iterate over every record with its source path.
    pub fn records(&self) -> impl Iterator<Item = (&Path, &ControlRecord)> {
        self.documents
            .iter()
            .flat_map(|doc| doc.records.iter().map(move |r| (doc.path.as_path(), r)))
    }

    /// Total number of records across all documents.
    pub fn record_count(&self) -> usize {
        self.documents.iter().map(|d| d.records.len()).sum()
    }
}
