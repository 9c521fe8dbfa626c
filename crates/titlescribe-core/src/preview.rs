//! One-line deed preview shown next to each deed in the deeds form

use crate::history::{standard_value, STANDARD_PLACEHOLDERS};
use crate::model::{DeedRecord, DeedTemplate};
use crate::placeholder::replace_placeholder;

/// Preview used when the deed type has no preview template of its own
pub const DEFAULT_PREVIEW_TEMPLATE: &str = "{deedType} executed by {executedBy} in favour of {inFavourOf}";

/// Render the preview sentence for `deed`.
///
/// Standard placeholders match exactly (case-sensitive); custom fields match
/// case-insensitively, as in the narrative.
pub fn deed_preview(deed: &DeedRecord, template: Option<&DeedTemplate>) -> String {
    let source = template
        .and_then(|t| t.preview_template.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_PREVIEW_TEMPLATE);

    let mut text = source.to_string();
    for name in STANDARD_PLACEHOLDERS {
        text = replace_placeholder(&text, name, standard_value(deed, name), false);
    }
    for (key, value) in deed.custom_fields.iter() {
        text = replace_placeholder(&text, key, value, true);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preview() {
        let deed = DeedRecord::new("Sale Deed", "A", "B");
        assert_eq!(deed_preview(&deed, None), "Sale Deed executed by A in favour of B");
    }

    #[test]
    fn test_custom_preview_template() {
        let template = DeedTemplate::new("Partition Deed")
            .with_preview("{deedType} No. {documentNumber} between {executedBy} and {inFavourOf}, share {share}");
        let deed = DeedRecord::new("Partition Deed", "A", "B")
            .with_document_number("77")
            .with_custom_field("share", "1/3");
        assert_eq!(
            deed_preview(&deed, Some(&template)),
            "Partition Deed No. 77 between A and B, share 1/3"
        );
    }

    #[test]
    fn test_empty_preview_template_falls_back() {
        let template = DeedTemplate::new("Sale Deed").with_preview("");
        let deed = DeedRecord::new("Sale Deed", "A", "B");
        assert_eq!(
            deed_preview(&deed, Some(&template)),
            "Sale Deed executed by A in favour of B"
        );
    }

    #[test]
    fn test_standard_placeholders_are_case_sensitive() {
        let template = DeedTemplate::new("Sale Deed").with_preview("{DEEDTYPE} / {deedType}");
        let deed = DeedRecord::new("Sale Deed", "A", "B");
        assert_eq!(deed_preview(&deed, Some(&template)), "{DEEDTYPE} / Sale Deed");
    }

    #[test]
    fn test_every_standard_placeholder_filled() {
        let template = DeedTemplate::new("Gift Deed")
            .with_preview("{deedType}|{executedBy}|{inFavourOf}|{date}|{documentNumber}|{natureOfDoc}");
        let deed = DeedRecord::new("Gift Deed", "A", "B")
            .with_date("2020-02-02")
            .with_document_number("12")
            .with_nature("Original");
        assert_eq!(
            deed_preview(&deed, Some(&template)),
            "Gift Deed|A|B|2020-02-02|12|Original"
        );
    }
}
