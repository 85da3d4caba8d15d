//! # Deterministic Rendering
//!
//! Re-renders control records to Markdown. Heading text and section order
//! come from `layout`, so a parse/render cycle reproduces them byte for
//! byte. Sections with no text are omitted entirely; re-parsing the
//! rendered form then reports the same missing-section issues, which makes
//! rendering a fixed point of the codec.

use sspkit_core::ControlRecord;

use crate::frontmatter::{render_front_matter, FrontMatter};
use crate::layout::{
    GUIDANCE_HEADING, HORIZONTAL_RULE, IMPLEMENTATION_PREFIX, OBJECTIVE_HEADING, SOLUTION_HEADING,
    STATEMENT_HEADING,
};

fn push_section(out: &mut String, heading: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(heading);
    out.push_str("\n\n");
    out.push_str(text);
    out.push('\n');
}

/// Render one record to Markdown.
///
/// Emits, in order: front-matter (when any values are set), the title
/// heading, the catalog sections, the canonical horizontal rule, the
/// solution heading, and one `Implementation` block per narrative.
pub fn render_record(record: &ControlRecord) -> String {
    let mut out = String::new();

    let front = FrontMatter {
        implementation_status: record.implementation_status.clone(),
        control_origination: record.control_origination.clone(),
    };
    let front_text = render_front_matter(&front);
    if !front_text.is_empty() {
        out.push_str(&front_text);
        out.push('\n');
    }

    out.push_str(&format!(
        "# {} - \\[catalog\\] {}\n",
        record.control_id, record.title
    ));

    push_section(&mut out, STATEMENT_HEADING, &record.statement);
    push_section(&mut out, GUIDANCE_HEADING, &record.guidance);
    push_section(&mut out, OBJECTIVE_HEADING, &record.assessment_objective);

    let has_solution = !record.solution_preamble.is_empty() || !record.narratives.is_empty();
    if has_solution {
        out.push('\n');
        out.push_str(HORIZONTAL_RULE);
        out.push('\n');
        push_section(&mut out, SOLUTION_HEADING, &record.solution_preamble);
        if record.solution_preamble.is_empty() {
            out.push('\n');
            out.push_str(SOLUTION_HEADING);
            out.push('\n');
        }
        for narrative in &record.narratives {
            let heading = format!("{}{}", IMPLEMENTATION_PREFIX, narrative.label.raw());
            push_section(&mut out, &heading, &narrative.text);
            if narrative.text.is_empty() {
                out.push('\n');
                out.push_str(&heading);
                out.push('\n');
            }
        }
    }

    out
}

/// Render a sequence of records as one stream. Each record's front-matter
/// fence doubles as the record separator, matching the parse convention.
pub fn render_stream(records: &[ControlRecord]) -> String {
    records
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join("\n")
}
