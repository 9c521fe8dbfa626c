//! titlescribe-ooxml - DOCX template scanning and report composition
//!
//! This crate reads report templates authored in Word, finds the placeholders
//! they contain and writes finished legal scrutiny reports back into the same
//! package.
//!
//! # Placeholders
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `{name}` | scalar field filled from a [`FieldRegistry`] |
//! | `{{table}}` | deeds table |
//! | `{{table1}}` | parcel details tables |
//! | `{$history}` | history-of-title narrative |
//!
//! Loops and conditions (`{#x}`, `{/x}`, `{^x}`) are reported as warnings and
//! left in the output as written.
//!
//! # Example
//!
//! ```ignore
//! use titlescribe_core::FieldRegistry;
//! use titlescribe_ooxml::{Composer, ReportData, Template};
//!
//! let template = Template::load("scrutiny.docx")?;
//! let mut fields = template.scan().field_registry();
//! fields.set("Client Name", "R. Kumar");
//!
//! let report = Composer::new().compose(&template, &ReportData::new(&fields))?;
//! std::fs::write(&report.file_name, &report.bytes)?;
//! ```
//!
//! [`FieldRegistry`]: titlescribe_core::FieldRegistry

pub mod archive;
pub mod compose;
pub mod error;
pub mod merge;
pub mod preview;
pub mod render;
pub mod scan;
pub mod substitute;
pub mod template;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_utils;

pub use archive::{OoxmlArchive, DOCUMENT_PART};
pub use compose::{
    ComposeOptions, ComposedDocument, Composer, ReportData, DEFAULT_FILE_NAME, DOCX_MIME_TYPE,
};
pub use error::{OoxmlError, Result};
pub use merge::{gather_split_tokens, merge_runs};
pub use preview::{render_text_preview, PreviewLine, PreviewSegment, DEFAULT_EMPTY_HISTORY_TEXT};
pub use render::{HistoryStyle, RegionMarkup};
pub use scan::{scan_document_xml, scan_template, scan_text, text_projection, ScanReport, UnsupportedConstruct};
pub use template::Template;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
