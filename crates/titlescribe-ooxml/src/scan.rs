//! Placeholder scanning
//!
//! The scanner works on the text projection of `word/document.xml`: runs
//! merged, paragraphs turned into line breaks, every tag stripped and
//! entities decoded. From that text it collects the scalar fields, the three
//! region markers and any control tag the engine cannot render.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use titlescribe_core::diagnostics::{Diagnostic, Diagnostics, Span, UNSUPPORTED_CONSTRUCT};
use titlescribe_core::FieldRegistry;

use crate::merge::merge_runs;
use crate::template::Template;

/// Names reserved for region markers; never reported as scalar fields
pub const RESERVED_NAMES: [&str; 3] = ["table", "table1", "history"];

/// First characters that mark a control tag rather than a field
pub const CONTROL_SIGILS: [char; 4] = ['#', '/', '^', '$'];

/// A control tag found in the template that will be left literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedConstruct {
    /// The full token, braces included
    pub token: String,
    /// Where the token sits in the text projection
    pub span: Span,
}

/// Result of scanning a template
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    /// Scalar field names, in order of first appearance, without duplicates
    pub fields: Vec<String>,
    /// `{{table}}` (deeds table) present
    pub has_table: bool,
    /// `{{table1}}` (parcel details) present
    pub has_table1: bool,
    /// `{$history}` present
    pub has_history: bool,
    /// Control tags that will be left in the output untouched
    pub unsupported: Vec<UnsupportedConstruct>,
}

impl ScanReport {
    /// One warning per unsupported construct
    pub fn warnings(&self) -> Diagnostics {
        self.unsupported
            .iter()
            .map(|construct| {
                Diagnostic::warning(format!("Unsupported control tag: {}", construct.token))
                    .with_code(UNSUPPORTED_CONSTRUCT)
                    .with_span(construct.span)
                    .with_help("Loops and conditions are not rendered; the tag is left as written")
            })
            .collect()
    }

    /// A registry with an empty value for every detected field
    pub fn field_registry(&self) -> FieldRegistry {
        FieldRegistry::from_names(self.fields.iter().cloned())
    }

    pub fn has_unsupported(&self) -> bool {
        !self.unsupported.is_empty()
    }
}

/// Scan a loaded template
pub fn scan_template(template: &Template) -> ScanReport {
    template.scan()
}

/// Scan raw `word/document.xml` markup
pub fn scan_document_xml(xml: &str) -> ScanReport {
    scan_text(&text_projection(&merge_runs(xml)))
}

/// Scan an already projected text
pub fn scan_text(text: &str) -> ScanReport {
    let mut report = ScanReport {
        has_table: table_marker().is_match(text),
        has_table1: table1_marker().is_match(text),
        has_history: history_marker().is_match(text),
        ..Default::default()
    };

    let mut seen = HashSet::new();
    for caps in placeholder_pattern().captures_iter(text) {
        let name = caps[1].trim();
        if name.is_empty() || !is_scalar_name(name) {
            continue;
        }
        if seen.insert(name.to_string()) {
            report.fields.push(name.to_string());
        }
    }

    for m in control_tag_pattern().find_iter(text) {
        if history_marker().is_match(m.as_str()) {
            continue;
        }
        report.unsupported.push(UnsupportedConstruct {
            token: m.as_str().to_string(),
            span: Span::locate(text, m.start(), m.end()),
        });
    }

    log::debug!(
        "Scanned template: {} fields, {} unsupported tags",
        report.fields.len(),
        report.unsupported.len()
    );
    report
}

/// Whether a trimmed identifier is a user-fillable scalar field
pub fn is_scalar_name(name: &str) -> bool {
    if name.starts_with(CONTROL_SIGILS) {
        return false;
    }
    let lower = name.to_lowercase();
    !RESERVED_NAMES.contains(&lower.as_str())
}

/// Convert document markup into human-readable text.
///
/// Paragraph starts become newlines, all other tags are dropped and the
/// common entities are decoded in a single pass (so `&amp;lt;` stays `&lt;`).
/// Curly quotes are folded to their straight forms.
pub fn text_projection(xml: &str) -> String {
    static PARAGRAPH_RE: OnceLock<Regex> = OnceLock::new();
    static TAG_RE: OnceLock<Regex> = OnceLock::new();

    let paragraph = PARAGRAPH_RE.get_or_init(|| Regex::new(r"<w:p(?:\s[^>]*)?/?>").unwrap());
    let tag = TAG_RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());

    let text = paragraph.replace_all(xml, "\n");
    let text = tag.replace_all(&text, "");
    normalize_quotes(&decode_entities(&text))
}

/// Decode the five XML entities plus `&#39;`
pub fn decode_entities(text: &str) -> String {
    static ENTITY_RE: OnceLock<Regex> = OnceLock::new();
    let re = ENTITY_RE.get_or_init(|| Regex::new(r"&(amp|lt|gt|quot|apos|#39);").unwrap());
    re.replace_all(text, |caps: &regex::Captures| match &caps[1] {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        _ => "'",
    })
    .into_owned()
}

pub(crate) fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

pub(crate) fn placeholder_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}]+)\}").unwrap())
}

fn control_tag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\s*[#/^$][^{}]*\}").unwrap())
}

/// Matches both `{{table}}` and `{table}`
pub(crate) fn table_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\{table\}").unwrap())
}

/// Matches both `{{table1}}` and `{table1}`
pub(crate) fn table1_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\{table1\}").unwrap())
}

pub(crate) fn history_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\{\s*\$history\s*\}").unwrap())
}
