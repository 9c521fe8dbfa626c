//! Region renderers
//!
//! Each region marker in a template is replaced by either block-level markup
//! (tables, paragraphs) or a short inline text when there is nothing to show.

pub mod deeds;
pub mod history;
pub mod markup;
pub mod parcels;

pub use deeds::{deed_rows, deeds_table_xml, DeedRow, NO_DEEDS_TEXT};
pub use history::{history_region, history_xml, HistoryStyle};
pub use markup::escape_xml;
pub use parcels::{parcel_tables_xml, NO_PARCELS_TEXT};

/// What a region marker is replaced with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionMarkup {
    /// Tables or paragraphs that must sit between paragraphs
    Block(String),
    /// Plain text that stays inside the marker's run
    Inline(String),
}

impl RegionMarkup {
    /// Markup to put in place of a marker that sits inside `<w:t>`.
    ///
    /// Block content closes the surrounding text, run and paragraph, and
    /// reopens them afterwards so the trailing text of the paragraph stays
    /// valid.
    pub fn splice_markup(&self) -> String {
        match self {
            RegionMarkup::Block(xml) => {
                format!("</w:t></w:r></w:p>{}<w:p><w:r><w:t>", xml)
            }
            RegionMarkup::Inline(text) => escape_xml(text),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, RegionMarkup::Block(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_splice_reopens_paragraph() {
        let region = RegionMarkup::Block("<w:tbl/>".to_string());
        assert_eq!(
            region.splice_markup(),
            "</w:t></w:r></w:p><w:tbl/><w:p><w:r><w:t>"
        );
        assert!(region.is_block());
    }

    #[test]
    fn test_inline_splice_escapes() {
        let region = RegionMarkup::Inline("A & B".to_string());
        assert_eq!(region.splice_markup(), "A &amp; B");
    }
}
