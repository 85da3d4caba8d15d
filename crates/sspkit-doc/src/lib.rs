//! # sspkit-doc — Control Document Codec
//!
//! Parses and re-renders SSP control documents: YAML front-matter, the
//! fixed heading layout, and the record-separator convention that lets one
//! source stream carry several variants of the same control.
//!
//! ## Leniency Contract
//!
//! Incomplete documents parse successfully. A missing section, an unknown
//! front-matter value, or a filename that disagrees with the control id
//! becomes a [`ParseIssue`] on the [`ParseOutcome`], never an error. Errors
//! are reserved for input the record model cannot represent at all:
//! unreadable files, front-matter that is not YAML, a record with no
//! parseable title heading, an empty stream.
//!
//! ## Round-Trip Contract
//!
//! `parse` followed by [`render::render_record`] reproduces the document
//! with byte-identical heading text and section order. Free text is
//! emitted verbatim; structural tokens (the horizontal rule, blank-line
//! spacing) are canonicalized.

pub mod frontmatter;
pub mod layout;
pub mod parse;
pub mod render;

pub use frontmatter::FrontMatter;
pub use layout::SectionKind;
pub use parse::{parse_file, parse_stream, DocError, ParseIssue, ParseIssueKind, ParseOutcome};
pub use render::{render_record, render_stream};
