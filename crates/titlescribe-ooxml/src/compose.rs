//! Report composition
//!
//! The composer turns a template plus the current field values, deeds and
//! parcel records into a finished DOCX. The steps run in a fixed order:
//!
//! 1. merge split runs and gather tokens split across formatted runs,
//! 2. normalize `{{table}}` / `{{table1}}` to single braces,
//! 3. splice the deeds table, then the parcel tables,
//! 4. build the history narrative (one bulk template lookup) and splice it,
//! 5. substitute scalar fields,
//! 6. write `word/document.xml` back, leaving every other part untouched.
//!
//! Problems that do not prevent a usable document are returned as
//! diagnostics on [`ComposedDocument::warnings`].

use std::sync::OnceLock;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use titlescribe_core::diagnostics::{Diagnostic, Diagnostics, LOOKUP_FAILURE, MALFORMED_OUTPUT};
use titlescribe_core::{
    render_history, DeedRecord, FieldRegistry, NarrativeTemplateSource, ParcelDetail,
    TemplateLookup,
};

use crate::archive::DOCUMENT_PART;
use crate::error::{OoxmlError, Result};
use crate::merge::{gather_split_tokens, merge_runs};
use crate::render::{
    deeds_table_xml, history_region, parcel_tables_xml, HistoryStyle, RegionMarkup,
};
use crate::scan::{history_marker, scan_text, table1_marker, table_marker, text_projection};
use crate::substitute::substitute_fields;
use crate::template::Template;
use crate::validate::check_well_formed;

/// Suggested name for the downloaded report
pub const DEFAULT_FILE_NAME: &str = "Legal_Scrutiny_Report.docx";

/// MIME type of the composed document
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Composer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    /// File name reported on the composed document
    pub file_name: String,
    /// Text left in place of `{$history}` when no deed has a type
    pub empty_history_text: String,
    /// Formatting of narrative paragraphs
    pub history: HistoryStyle,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            empty_history_text: String::new(),
            history: HistoryStyle::default(),
        }
    }
}

/// Everything the user entered for one report
#[derive(Debug, Clone, Copy)]
pub struct ReportData<'a> {
    pub fields: &'a FieldRegistry,
    pub deeds: &'a [DeedRecord],
    pub parcels: &'a [ParcelDetail],
}

impl<'a> ReportData<'a> {
    pub fn new(fields: &'a FieldRegistry) -> Self {
        Self {
            fields,
            deeds: &[],
            parcels: &[],
        }
    }

    pub fn with_deeds(mut self, deeds: &'a [DeedRecord]) -> Self {
        self.deeds = deeds;
        self
    }

    pub fn with_parcels(mut self, parcels: &'a [ParcelDetail]) -> Self {
        self.parcels = parcels;
        self
    }
}

/// A finished report
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    /// The DOCX package
    pub bytes: Vec<u8>,
    /// Suggested download name
    pub file_name: String,
    /// Non-fatal problems found while composing
    pub warnings: Diagnostics,
}

impl ComposedDocument {
    pub fn mime_type(&self) -> &'static str {
        DOCX_MIME_TYPE
    }
}

/// Composes reports from templates
pub struct Composer<'s> {
    options: ComposeOptions,
    templates: Option<&'s dyn NarrativeTemplateSource>,
}

impl Default for Composer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> Composer<'s> {
    /// Create a composer with default options and no narrative templates
    pub fn new() -> Self {
        Self {
            options: ComposeOptions::default(),
            templates: None,
        }
    }

    pub fn with_options(mut self, options: ComposeOptions) -> Self {
        self.options = options;
        self
    }

    /// Use `source` for per-deed-type narrative templates
    pub fn with_templates(mut self, source: &'s dyn NarrativeTemplateSource) -> Self {
        self.templates = Some(source);
        self
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose a report from template bytes.
    ///
    /// A damaged package fails here, before any rendering work.
    pub fn compose_bytes(&self, template: &[u8], data: &ReportData<'_>) -> Result<ComposedDocument> {
        let template = Template::from_bytes(template)?;
        self.compose(&template, data)
    }

    /// Compose a report from a loaded template
    pub fn compose(&self, template: &Template, data: &ReportData<'_>) -> Result<ComposedDocument> {
        if self.options.file_name.trim().is_empty() {
            return Err(OoxmlError::Render("output file name is empty".to_string()));
        }

        let mut warnings = Diagnostics::new();
        let xml = self.compose_xml(template.document_xml(), data, &mut warnings);

        if let Err(message) = check_well_formed(&xml) {
            log::warn!("Composed document is not well-formed: {}", message);
            warnings.push(
                Diagnostic::error(format!("Composed {} is not well-formed", DOCUMENT_PART))
                    .with_code(MALFORMED_OUTPUT)
                    .with_note(message)
                    .with_help("Move region markers into a paragraph of their own"),
            );
        }

        let mut archive = template.archive().clone();
        archive.set_string(DOCUMENT_PART, xml);
        let bytes = archive.to_bytes()?;

        log::debug!(
            "Composed {} ({} bytes, {} warnings)",
            self.options.file_name,
            bytes.len(),
            warnings.len()
        );

        Ok(ComposedDocument {
            bytes,
            file_name: self.options.file_name.clone(),
            warnings,
        })
    }

    /// Run every composition step on raw `word/document.xml` markup
    pub fn compose_xml(&self, xml: &str, data: &ReportData<'_>, warnings: &mut Diagnostics) -> String {
        let xml = gather_split_tokens(&merge_runs(xml));
        warnings.extend(scan_text(&text_projection(&xml)).warnings());

        let xml = normalize_markers(&xml);
        let xml = splice(&xml, table_marker(), &deeds_table_xml(data.deeds));
        let xml = splice(&xml, table1_marker(), &parcel_tables_xml(data.parcels));

        let xml = if history_marker().is_match(&xml) {
            let narrative = self.narrative(data.deeds, warnings);
            let region = history_region(
                &narrative,
                &self.options.history,
                &self.options.empty_history_text,
            );
            splice(&xml, history_marker(), &region)
        } else {
            xml
        };

        substitute_fields(&xml, data.fields)
    }

    fn narrative(&self, deeds: &[DeedRecord], warnings: &mut Diagnostics) -> String {
        if !deeds.iter().any(DeedRecord::has_type) {
            return String::new();
        }

        let lookup = match self.templates {
            Some(source) => TemplateLookup::load(source).unwrap_or_else(|e| {
                log::warn!("Narrative template lookup failed: {}", e);
                warnings.push(
                    Diagnostic::warning(format!("Narrative template lookup failed: {}", e))
                        .with_code(LOOKUP_FAILURE)
                        .with_note("every deed uses the standard history paragraph"),
                );
                TemplateLookup::empty()
            }),
            None => TemplateLookup::empty(),
        };

        render_history(deeds, &lookup)
    }
}

/// Rewrite `{{table}}` and `{{table1}}` (any case) to their single-brace form
fn normalize_markers(xml: &str) -> String {
    static DOUBLE_RE: OnceLock<Regex> = OnceLock::new();
    let re = DOUBLE_RE.get_or_init(|| Regex::new(r"(?i)\{\{(table1?)\}\}").unwrap());
    re.replace_all(xml, "{$1}").into_owned()
}

fn splice(xml: &str, marker: &Regex, region: &RegionMarkup) -> String {
    marker
        .replace_all(xml, NoExpand(&region.splice_markup()))
        .into_owned()
}
