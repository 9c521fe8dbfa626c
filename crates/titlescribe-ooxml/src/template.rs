//! Uploaded report templates
//!
//! A [`Template`] is an unpacked DOCX package whose `word/document.xml`
//! carries the placeholders. It is immutable once loaded: composing a report
//! works on a copy of the archive.
//!
//! # Example
//!
//! ```ignore
//! use titlescribe_ooxml::Template;
//!
//! let template = Template::load("scrutiny.docx")?;
//! let report = template.scan();
//! println!("fields: {:?}", report.fields);
//! ```

use std::path::Path;

use crate::archive::{OoxmlArchive, DOCUMENT_PART};
use crate::error::{OoxmlError, Result};
use crate::merge::merge_runs;
use crate::scan::{scan_document_xml, text_projection, ScanReport};

/// A DOCX template with its primary markup part decoded
#[derive(Debug, Clone)]
pub struct Template {
    /// The underlying OOXML archive
    archive: OoxmlArchive,
    /// Contents of word/document.xml
    document_xml: String,
}

impl Template {
    /// Load a template from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_archive(OoxmlArchive::open(path)?)
    }

    /// Load a template from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_archive(OoxmlArchive::from_bytes(bytes)?)
    }

    /// Load a template stored as hex text, as the template table keeps it.
    ///
    /// A leading `\x` (bytea notation) is accepted.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(hex)?)
    }

    /// Wrap an archive, failing when it has no main document part
    pub fn from_archive(archive: OoxmlArchive) -> Result<Self> {
        let bytes = archive.document_xml()?;
        let document_xml = String::from_utf8(bytes.to_vec()).map_err(|e| {
            OoxmlError::Encoding(format!("{} is not valid UTF-8: {}", DOCUMENT_PART, e))
        })?;
        Ok(Self {
            archive,
            document_xml,
        })
    }

    /// Raw contents of word/document.xml
    pub fn document_xml(&self) -> &str {
        &self.document_xml
    }

    /// Get a reference to the underlying archive
    pub fn archive(&self) -> &OoxmlArchive {
        &self.archive
    }

    /// Consume the template and return the underlying archive
    pub fn into_archive(self) -> OoxmlArchive {
        self.archive
    }

    /// Human-readable text of the document, runs merged
    pub fn text(&self) -> String {
        text_projection(&merge_runs(&self.document_xml))
    }

    /// Detect fields, region markers and unsupported constructs
    pub fn scan(&self) -> ScanReport {
        scan_document_xml(&self.document_xml)
    }
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let hex = text.trim();
    let hex = hex.strip_prefix("\\x").unwrap_or(hex);
    if hex.len() % 2 != 0 {
        return Err(OoxmlError::Encoding(
            "hex text has an odd number of digits".to_string(),
        ));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| {
                    OoxmlError::Encoding(format!("invalid hex digits at offset {}", i))
                })
        })
        .collect()
}
