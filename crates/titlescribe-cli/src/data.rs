//! Report data and narrative template files
//!
//! Both files are TOML unless their extension is `.json`.
//!
//! A report data file holds the field values and the records:
//!
//! ```toml
//! [fields]
//! "Client Name" = "R. Kumar"
//!
//! [[deeds]]
//! deed_type = "Sale Deed"
//! executed_by = "A"
//! in_favour_of = "B"
//! custom_fields = { saleAmount = "500" }
//!
//! [[parcels]]
//! docNo = "1234/2001"
//! surveyNo = "45/2B"
//! ```
//!
//! A histories file lists the per-deed-type templates:
//!
//! ```toml
//! [[templates]]
//! deed_type = "Sale Deed"
//! narrative_template = "Sold for Rs. {saleAmount} by {executedBy}"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use titlescribe_core::{DeedRecord, DeedTemplate, FieldRegistry, NarrativeTemplateSource, ParcelDetail};

/// Values and records for one report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFile {
    pub fields: FieldRegistry,
    pub deeds: Vec<DeedRecord>,
    #[serde(alias = "documents", alias = "document_details")]
    pub parcels: Vec<ParcelDetail>,
}

impl ReportFile {
    pub fn load(path: &Path) -> Result<Self> {
        load_file(path)
    }
}

/// Per-deed-type templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateFile {
    #[serde(alias = "deed_templates")]
    pub templates: Vec<DeedTemplate>,
}

impl TemplateFile {
    pub fn load(path: &Path) -> Result<Self> {
        load_file(path)
    }

    /// Template declared for a deed type, compared case-insensitively
    pub fn find(&self, deed_type: &str) -> Option<&DeedTemplate> {
        let wanted = deed_type.trim().to_lowercase();
        self.templates
            .iter()
            .find(|t| t.deed_type.trim().to_lowercase() == wanted)
    }
}

impl NarrativeTemplateSource for TemplateFile {
    fn fetch_all(&self) -> titlescribe_core::Result<Vec<(String, String)>> {
        self.templates.fetch_all()
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML: {}", path.display()))?
    };
    log::debug!("Loaded {}", path.display());
    Ok(parsed)
}
