//! History of title (`{$history}`)

use serde::{Deserialize, Serialize};

use super::markup::MarkupWriter;
use super::RegionMarkup;

/// Character formatting of narrative paragraphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryStyle {
    pub font: String,
    /// Font size in half-points (24 = 12pt)
    pub size_half_points: u32,
}

impl Default for HistoryStyle {
    fn default() -> Self {
        Self {
            font: "Cambria".to_string(),
            size_half_points: 24,
        }
    }
}

/// One paragraph per line of `text`
pub fn history_xml(text: &str, style: &HistoryStyle) -> String {
    let mut w = MarkupWriter::new();
    for line in text.split('\n') {
        w.styled_paragraph(line, &style.font, style.size_half_points);
    }
    w.finish()
}

/// Render the history region; blank narratives become `empty_text`
pub fn history_region(text: &str, style: &HistoryStyle, empty_text: &str) -> RegionMarkup {
    if text.trim().is_empty() {
        RegionMarkup::Inline(empty_text.to_string())
    } else {
        RegionMarkup::Block(history_xml(text, style))
    }
}
