//! History-of-title narrative
//!
//! Each deed with a type contributes one block of prose. When the store has a
//! narrative template for the deed's type, the template is filled in;
//! otherwise a fixed fallback paragraph is synthesized. Blocks are separated
//! by a blank line.

use crate::model::DeedRecord;
use crate::placeholder::replace_placeholder;
use crate::source::TemplateLookup;

/// Placeholders every narrative template may use, in substitution order
pub const STANDARD_PLACEHOLDERS: [&str; 6] = [
    "executedBy",
    "inFavourOf",
    "date",
    "documentNumber",
    "deedType",
    "natureOfDoc",
];

/// Render the narrative for every deed that has a type.
///
/// Returns an empty string when no deed qualifies.
pub fn render_history(deeds: &[DeedRecord], lookup: &TemplateLookup) -> String {
    deeds
        .iter()
        .filter(|deed| deed.has_type())
        .map(|deed| render_deed_history(deed, lookup.get(&deed.deed_type)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render one deed's block, from `template` when given or the fallback otherwise
pub fn render_deed_history(deed: &DeedRecord, template: Option<&str>) -> String {
    match template {
        Some(template) => fill_template(deed, template),
        None => fallback_history(deed),
    }
}

/// Value of a standard placeholder for `deed`, empty for unknown names
pub(crate) fn standard_value<'a>(deed: &'a DeedRecord, name: &str) -> &'a str {
    match name {
        "executedBy" => &deed.executed_by,
        "inFavourOf" => &deed.in_favour_of,
        "date" => &deed.date,
        "documentNumber" => &deed.document_number,
        "deedType" => &deed.deed_type,
        "natureOfDoc" => &deed.nature_of_doc,
        _ => "",
    }
}

/// Substitute standard then custom placeholders. Custom keys the template
/// does not mention are ignored and unknown tokens stay literal.
fn fill_template(deed: &DeedRecord, template: &str) -> String {
    let mut text = template.to_string();
    for name in STANDARD_PLACEHOLDERS {
        text = replace_placeholder(&text, name, standard_value(deed, name), true);
    }
    for (key, value) in deed.custom_fields.iter() {
        text = replace_placeholder(&text, key, value, true);
    }
    text.trim().to_string()
}

fn fallback_history(deed: &DeedRecord) -> String {
    let mut text = format!(
        "{}:\nDeed executed by {} in favour of {} dated {}, Document No: {}",
        deed.deed_type.to_uppercase(),
        or_marker(&deed.executed_by, "[Executor]"),
        or_marker(&deed.in_favour_of, "[Beneficiary]"),
        or_marker(&deed.date, "[Date]"),
        or_marker(&deed.document_number, "[Doc No]"),
    );
    if !deed.nature_of_doc.is_empty() {
        text.push_str(", Nature: ");
        text.push_str(&deed.nature_of_doc);
    }
    text
}

fn or_marker<'a>(value: &'a str, marker: &'a str) -> &'a str {
    if value.is_empty() {
        marker
    } else {
        value
    }
}
