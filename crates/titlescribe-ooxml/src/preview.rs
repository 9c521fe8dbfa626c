//! Plain-text report preview
//!
//! Gives the form layer a live view of the report without building a DOCX:
//! fields are filled in, the narrative replaces `{$history}`, and the text is
//! cut at the table markers so the caller can draw the tables itself.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};
use titlescribe_core::FieldRegistry;

use crate::scan::history_marker;
use crate::substitute::substitute_text;

/// Shown in place of `{$history}` when there is no narrative yet
pub const DEFAULT_EMPTY_HISTORY_TEXT: &str =
    "(History of Title will appear here when deeds are added)";

/// A line of preview text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewLine {
    /// A section heading such as `1. DESCRIPTION OF PROPERTY:`
    Heading(String),
    Paragraph(String),
    Blank,
}

/// A piece of the preview, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSegment {
    Text(Vec<PreviewLine>),
    /// Where the deeds table goes
    DeedsTable,
    /// Where the parcel details go
    ParcelTable,
}

/// Build the preview of `text` (a template's text projection)
pub fn render_text_preview(
    text: &str,
    fields: &FieldRegistry,
    history: &str,
    empty_history_text: &str,
) -> Vec<PreviewSegment> {
    static SPLIT_RE: OnceLock<Regex> = OnceLock::new();
    let split = SPLIT_RE
        .get_or_init(|| Regex::new(r"(?i)\{\{(table1?)\}\}|\{(table1?)\}").unwrap());

    let filled = substitute_text(text, fields);
    let narrative = if history.trim().is_empty() {
        empty_history_text
    } else {
        history
    };
    let filled = history_marker()
        .replace_all(&filled, NoExpand(narrative))
        .into_owned();

    let mut segments = Vec::new();
    let mut last = 0;
    for caps in split.captures_iter(&filled) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut segments, &filled[last..whole.start()]);

        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_default();
        segments.push(if name == "table1" {
            PreviewSegment::ParcelTable
        } else {
            PreviewSegment::DeedsTable
        });
        last = whole.end();
    }
    push_text(&mut segments, &filled[last..]);
    segments
}

/// Whether a line reads as a section heading
pub fn is_heading(line: &str) -> bool {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    let re = HEADING_RE.get_or_init(|| Regex::new(r"^(\d+\.?\s*)?[A-Z\s]+:").unwrap());
    re.is_match(line.trim())
}

fn push_text(segments: &mut Vec<PreviewSegment>, text: &str) {
    if text.is_empty() {
        return;
    }
    let lines = text
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                PreviewLine::Blank
            } else if is_heading(line) {
                PreviewLine::Heading(line.trim().to_string())
            } else {
                PreviewLine::Paragraph(line.to_string())
            }
        })
        .collect();
    segments.push(PreviewSegment::Text(lines));
}
