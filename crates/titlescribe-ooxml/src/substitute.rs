//! Scalar placeholder substitution
//!
//! Works on the text content of `w:t` elements only, so attribute values and
//! field codes are never touched. Identifiers are decoded and trimmed the
//! same way the scanner does, which keeps scanning and rendering in step.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use titlescribe_core::FieldRegistry;

use crate::render::escape_xml;
use crate::scan::{
    decode_entities, is_scalar_name, normalize_quotes, placeholder_pattern, CONTROL_SIGILS,
};

/// Replace every scalar `{name}` in the document's text runs.
///
/// Names missing from the registry render as the empty string, and so do
/// reserved names left over once the regions are spliced. Control tags
/// (`{#x}`, `{/x}`, `{^x}`, `{$x}`) stay as written. Values are XML-escaped
/// and a `\n` in a value becomes a line break inside the run.
pub fn substitute_fields(xml: &str, fields: &FieldRegistry) -> String {
    static TEXT_RE: OnceLock<Regex> = OnceLock::new();
    let text_re =
        TEXT_RE.get_or_init(|| Regex::new(r"(<w:t(?:\s[^>]*)?>)([^<]*)(</w:t>)").unwrap());

    text_re
        .replace_all(xml, |caps: &Captures| {
            let open = &caps[1];
            let body = &caps[2];
            let close = &caps[3];

            if !body.contains('{') {
                return caps[0].to_string();
            }

            let replaced = substitute_escaped(body, fields);
            if needs_preserve(open, &replaced) {
                format!("{}{}{}", preserve_space(open), replaced, close)
            } else {
                format!("{}{}{}", open, replaced, close)
            }
        })
        .into_owned()
}

/// Substitute placeholders in plain text, leaving unknown names as written
pub fn substitute_text(text: &str, fields: &FieldRegistry) -> String {
    placeholder_pattern()
        .replace_all(text, |caps: &Captures| {
            let name = caps[1].trim();
            match fields.get(name) {
                Some(value) if is_scalar_name(name) => value.to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Substitute inside already-escaped `w:t` content
fn substitute_escaped(body: &str, fields: &FieldRegistry) -> String {
    placeholder_pattern()
        .replace_all(body, |caps: &Captures| {
            let name = normalize_quotes(&decode_entities(&caps[1]));
            let name = name.trim();
            if name.starts_with(CONTROL_SIGILS) {
                return caps[0].to_string();
            }
            // Reserved names here are not region markers and render empty
            let value = if is_scalar_name(name) {
                fields.get(name).unwrap_or_default()
            } else {
                ""
            };
            escape_xml(value)
                .replace("\r\n", "\n")
                .replace('\n', "</w:t><w:br/><w:t xml:space=\"preserve\">")
        })
        .into_owned()
}

fn needs_preserve(open: &str, text: &str) -> bool {
    if open.contains("xml:space") {
        return false;
    }
    // Only the segment before the first break belongs to the original tag
    let head = text.split("</w:t>").next().unwrap_or_default();
    head.starts_with(' ') || head.ends_with(' ')
}

fn preserve_space(open: &str) -> String {
    format!("{} xml:space=\"preserve\">", open.trim_end_matches('>'))
}
