//! Record types consumed by the placeholder engine
//!
//! These are plain snapshots of what the data store holds. Deeds and deed
//! templates use the store's snake_case column names (camelCase is accepted
//! as an alias); parcel details use the camelCase shape of the details form.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};
use crate::history::STANDARD_PLACEHOLDERS;

/// Custom field values attached to a deed, keyed by the placeholder name
/// declared on the deed type's [`DeedTemplate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomFields(BTreeMap<String, String>);

impl CustomFields {
    /// Create an empty set of custom fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a value by exact key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CustomFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A single deed in the chain of title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeedRecord {
    #[serde(alias = "type", alias = "deedType", deserialize_with = "nullable")]
    pub deed_type: String,
    #[serde(alias = "executedBy", deserialize_with = "nullable")]
    pub executed_by: String,
    #[serde(alias = "inFavourOf", deserialize_with = "nullable")]
    pub in_favour_of: String,
    #[serde(deserialize_with = "nullable")]
    pub date: String,
    #[serde(alias = "documentNumber", deserialize_with = "nullable")]
    pub document_number: String,
    #[serde(
        alias = "natureOfDoc",
        alias = "natureOfDocument",
        deserialize_with = "nullable"
    )]
    pub nature_of_doc: String,
    #[serde(alias = "customFields")]
    pub custom_fields: CustomFields,
}

impl DeedRecord {
    /// Create a deed with its three identifying fields
    pub fn new(
        deed_type: impl Into<String>,
        executed_by: impl Into<String>,
        in_favour_of: impl Into<String>,
    ) -> Self {
        Self {
            deed_type: deed_type.into(),
            executed_by: executed_by.into(),
            in_favour_of: in_favour_of.into(),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_document_number(mut self, number: impl Into<String>) -> Self {
        self.document_number = number.into();
        self
    }

    pub fn with_nature(mut self, nature: impl Into<String>) -> Self {
        self.nature_of_doc = nature.into();
        self
    }

    pub fn with_custom_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_fields.insert(key, value);
        self
    }

    /// Whether the deed carries a type and may appear in the narrative
    pub fn has_type(&self) -> bool {
        !self.deed_type.is_empty()
    }

    /// Whether the deed is complete enough for a row in the deeds table
    pub fn is_table_ready(&self) -> bool {
        !self.deed_type.is_empty() && !self.executed_by.is_empty() && !self.in_favour_of.is_empty()
    }

    /// The "particulars of deed" sentence shown in the deeds table
    pub fn particulars(&self) -> String {
        format!(
            "{} executed by {} in favour of {}",
            self.deed_type, self.executed_by, self.in_favour_of
        )
    }
}

/// Per-deed-type configuration maintained by administrators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeedTemplate {
    #[serde(alias = "deedType")]
    pub deed_type: String,
    /// History-of-title narrative template
    #[serde(alias = "template_content", alias = "narrativeTemplate")]
    pub narrative_template: Option<String>,
    /// One-line preview shown next to each deed in the form
    #[serde(alias = "previewTemplate")]
    pub preview_template: Option<String>,
    /// Declared custom placeholders: key -> human readable description
    #[serde(alias = "customPlaceholders")]
    pub custom_placeholders: BTreeMap<String, String>,
}

impl DeedTemplate {
    pub fn new(deed_type: impl Into<String>) -> Self {
        Self {
            deed_type: deed_type.into(),
            ..Self::default()
        }
    }

    pub fn with_narrative(mut self, template: impl Into<String>) -> Self {
        self.narrative_template = Some(template.into());
        self
    }

    pub fn with_preview(mut self, template: impl Into<String>) -> Self {
        self.preview_template = Some(template.into());
        self
    }

    /// Declare a custom placeholder for this deed type.
    ///
    /// Keys are trimmed. Empty keys, keys containing braces, keys that shadow
    /// a standard narrative placeholder and keys already declared are
    /// rejected; nothing is overwritten.
    pub fn declare_placeholder(
        &mut self,
        key: &str,
        description: impl Into<String>,
    ) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CoreError::EmptyPlaceholderKey);
        }
        if key.contains(['{', '}']) {
            return Err(CoreError::InvalidPlaceholderKey(key.to_string()));
        }
        if STANDARD_PLACEHOLDERS
            .iter()
            .any(|name| name.eq_ignore_ascii_case(key))
        {
            return Err(CoreError::ReservedPlaceholder(key.to_string()));
        }
        if self.custom_placeholders.contains_key(key) {
            return Err(CoreError::DuplicatePlaceholder(key.to_string()));
        }
        self.custom_placeholders
            .insert(key.to_string(), description.into());
        Ok(())
    }

    /// Remove a declared custom placeholder, returning its description
    pub fn remove_placeholder(&mut self, key: &str) -> Option<String> {
        self.custom_placeholders.remove(key)
    }
}

/// Turn a camelCase custom field key into a form label (`saleAmount` -> `Sale Amount`)
pub fn custom_field_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(ch);
    }
    let mut chars = label.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    capitalized.trim().to_string()
}

/// Survey and boundary details of one parcel, as recorded in a title document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParcelDetail {
    /// Caller-generated unique id
    pub id: String,
    pub doc_no: String,
    pub survey_no: String,
    pub as_per_revenue_record: String,
    pub total_extent: String,
    pub plot_no: String,
    pub location: String,
    pub north_by: String,
    pub south_by: String,
    pub east_by: String,
    pub west_by: String,
    pub north_measurement: String,
    pub south_measurement: String,
    pub east_measurement: String,
    pub west_measurement: String,
    pub total_extent_sq_ft: String,
}

/// Addressable fields of a [`ParcelDetail`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParcelField {
    DocNo,
    SurveyNo,
    AsPerRevenueRecord,
    TotalExtent,
    PlotNo,
    Location,
    NorthBy,
    SouthBy,
    EastBy,
    WestBy,
    NorthMeasurement,
    SouthMeasurement,
    EastMeasurement,
    WestMeasurement,
    TotalExtentSqFt,
}

impl ParcelField {
    /// Rows i-v of the definitional table, in order
    pub const DEFINITIONS: [ParcelField; 5] = [
        ParcelField::SurveyNo,
        ParcelField::AsPerRevenueRecord,
        ParcelField::TotalExtent,
        ParcelField::PlotNo,
        ParcelField::Location,
    ];

    pub const BOUNDARIES: [ParcelField; 4] = [
        ParcelField::NorthBy,
        ParcelField::SouthBy,
        ParcelField::EastBy,
        ParcelField::WestBy,
    ];

    pub const MEASUREMENTS: [ParcelField; 5] = [
        ParcelField::NorthMeasurement,
        ParcelField::SouthMeasurement,
        ParcelField::EastMeasurement,
        ParcelField::WestMeasurement,
        ParcelField::TotalExtentSqFt,
    ];

    /// Label printed next to the value
    pub fn label(self) -> &'static str {
        match self {
            ParcelField::DocNo => "As per Doc No",
            ParcelField::SurveyNo => "Survey No",
            ParcelField::AsPerRevenueRecord => "As per Revenue Record",
            ParcelField::TotalExtent => "Total Extent",
            ParcelField::PlotNo => "Plot No",
            ParcelField::Location => {
                "Location like name of the place, village, city, registration, sub-district etc."
            }
            ParcelField::NorthBy => "North By",
            ParcelField::SouthBy => "South By",
            ParcelField::EastBy => "East By",
            ParcelField::WestBy => "West By",
            ParcelField::NorthMeasurement => "North - East West",
            ParcelField::SouthMeasurement => "South - East West",
            ParcelField::EastMeasurement => "East - South North",
            ParcelField::WestMeasurement => "West - South North",
            ParcelField::TotalExtentSqFt => "Total",
        }
    }

    /// Text rendered in place of an empty value.
    ///
    /// Measurement defaults are sample values, not real measurements.
    pub fn fallback(self) -> &'static str {
        match self {
            ParcelField::DocNo => "(As per Doc No)",
            ParcelField::SurveyNo => "(Survey No)",
            ParcelField::AsPerRevenueRecord => "(As per Revenue Record)",
            ParcelField::TotalExtent => "(Total Extent)",
            ParcelField::PlotNo => "(Plot No)",
            ParcelField::Location => {
                "(Location like name of the place, village, city registration, sub-district etc.)"
            }
            ParcelField::NorthBy => "(North By)",
            ParcelField::SouthBy => "(South By)",
            ParcelField::EastBy => "(East By)",
            ParcelField::WestBy => "(West By)",
            ParcelField::NorthMeasurement | ParcelField::SouthMeasurement => "30 ft",
            ParcelField::EastMeasurement | ParcelField::WestMeasurement => "40 ft",
            ParcelField::TotalExtentSqFt => "1200 Sq.Ft",
        }
    }
}

impl ParcelDetail {
    /// Raw value of a field (possibly empty)
    pub fn value(&self, field: ParcelField) -> &str {
        match field {
            ParcelField::DocNo => &self.doc_no,
            ParcelField::SurveyNo => &self.survey_no,
            ParcelField::AsPerRevenueRecord => &self.as_per_revenue_record,
            ParcelField::TotalExtent => &self.total_extent,
            ParcelField::PlotNo => &self.plot_no,
            ParcelField::Location => &self.location,
            ParcelField::NorthBy => &self.north_by,
            ParcelField::SouthBy => &self.south_by,
            ParcelField::EastBy => &self.east_by,
            ParcelField::WestBy => &self.west_by,
            ParcelField::NorthMeasurement => &self.north_measurement,
            ParcelField::SouthMeasurement => &self.south_measurement,
            ParcelField::EastMeasurement => &self.east_measurement,
            ParcelField::WestMeasurement => &self.west_measurement,
            ParcelField::TotalExtentSqFt => &self.total_extent_sq_ft,
        }
    }

    /// Value of a field, or the given fallback when empty
    pub fn value_or<'a>(&'a self, field: ParcelField, fallback: &'a str) -> &'a str {
        let value = self.value(field);
        if value.is_empty() {
            fallback
        } else {
            value
        }
    }

    /// Value of a field, or the field's own fallback label when empty
    pub fn display(&self, field: ParcelField) -> &str {
        self.value_or(field, field.fallback())
    }
}

/// Accept `null` wherever the store may leave a text column unset
fn nullable<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
