//! Narrative template lookup
//!
//! History-of-title templates live in the backing store, one per deed type.
//! The renderer fetches all of them with a single bulk call and then looks
//! each deed's type up locally.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::DeedTemplate;

/// Bulk provider of `(deed_type, narrative_template)` pairs
pub trait NarrativeTemplateSource {
    /// Fetch every narrative template in one call
    fn fetch_all(&self) -> Result<Vec<(String, String)>>;
}

/// A fixed set of narrative templates held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplates {
    entries: Vec<(String, String)>,
}

impl InMemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, deed_type: impl Into<String>, template: impl Into<String>) {
        self.entries.push((deed_type.into(), template.into()));
    }

    pub fn with(mut self, deed_type: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(deed_type, template);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemoryTemplates {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl NarrativeTemplateSource for InMemoryTemplates {
    fn fetch_all(&self) -> Result<Vec<(String, String)>> {
        Ok(self.entries.clone())
    }
}

impl NarrativeTemplateSource for [DeedTemplate] {
    fn fetch_all(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .iter()
            .filter_map(|t| {
                t.narrative_template
                    .as_ref()
                    .map(|body| (t.deed_type.clone(), body.clone()))
            })
            .collect())
    }
}

impl NarrativeTemplateSource for Vec<DeedTemplate> {
    fn fetch_all(&self) -> Result<Vec<(String, String)>> {
        self.as_slice().fetch_all()
    }
}

/// Narrative templates keyed by trimmed, lowercased deed type
#[derive(Debug, Clone, Default)]
pub struct TemplateLookup {
    templates: HashMap<String, String>,
}

impl TemplateLookup {
    /// A lookup that finds nothing; every deed falls back to the synthesized paragraph
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw pairs. Entries with an empty type or empty body are
    /// skipped; a later entry for the same type replaces an earlier one.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut templates = HashMap::new();
        for (deed_type, body) in pairs {
            let key = normalize_type(deed_type.as_ref());
            let body = body.into();
            if key.is_empty() || body.is_empty() {
                continue;
            }
            templates.insert(key, body);
        }
        Self { templates }
    }

    /// Issue the single bulk fetch against `source`
    pub fn load<S: NarrativeTemplateSource + ?Sized>(source: &S) -> Result<Self> {
        let pairs = source.fetch_all()?;
        log::debug!("Loaded {} narrative template(s)", pairs.len());
        Ok(Self::from_pairs(pairs))
    }

    /// Template for a deed type, matched case-insensitively after trimming
    pub fn get(&self, deed_type: &str) -> Option<&str> {
        self.templates
            .get(&normalize_type(deed_type))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn normalize_type(deed_type: &str) -> String {
    deed_type.trim().to_lowercase()
}
