//! Configuration Settings
//!
//! `titlescribe.toml` tunes the composed report. Every section and key is
//! optional:
//!
//! ```toml
//! [output]
//! file_name = "Legal_Scrutiny_Report.docx"
//!
//! [history]
//! empty_text = ""
//! font = "Cambria"
//! size_half_points = 24
//!
//! [preview]
//! empty_history_text = "(History of Title will appear here when deeds are added)"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use titlescribe_ooxml::{ComposeOptions, HistoryStyle, DEFAULT_EMPTY_HISTORY_TEXT, DEFAULT_FILE_NAME};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "titlescribe.toml";

/// Top-level settings structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub history: HistorySettings,
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default name of the composed report
    pub file_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Spliced in place of `{$history}` when no deed has a type
    pub empty_text: String,
    pub font: String,
    /// Half-points, so 24 is 12pt
    pub size_half_points: u32,
}

impl Default for HistorySettings {
    fn default() -> Self {
        let style = HistoryStyle::default();
        Self {
            empty_text: String::new(),
            font: style.font,
            size_half_points: style.size_half_points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub empty_history_text: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            empty_history_text: DEFAULT_EMPTY_HISTORY_TEXT.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from `path`, or from `titlescribe.toml` in the working
    /// directory when no path is given. A missing default file yields the
    /// defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Path::new(CONFIG_FILE_NAME);
                if !default.exists() {
                    log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok(Self::default());
                }
                default.to_path_buf()
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Options for the report composer
    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            file_name: self.output.file_name.clone(),
            empty_history_text: self.history.empty_text.clone(),
            history: HistoryStyle {
                font: self.history.font.clone(),
                size_half_points: self.history.size_half_points,
            },
        }
    }
}
