//! titlescribe CLI - Command-line interface library
//!
//! This library provides the CLI functionality for titlescribe:
//! - Scan: list the fields and regions a template expects
//! - Render: compose a report DOCX from a template and a data file
//! - Preview: print the report as plain text
//!
//! # Library Usage
//!
//! ```ignore
//! use titlescribe_cli::{render_command, scan_command, OutputFormat};
//!
//! let report = scan_command(Path::new("scrutiny.docx"), OutputFormat::Json)?;
//! let written = render_command(&template, &data, Some(&histories), None, None)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Show what a template needs
//! titlescribe scan scrutiny.docx --format json
//!
//! # Compose the report
//! titlescribe render scrutiny.docx --data report.toml --histories histories.toml
//!
//! # Check the wording before composing
//! titlescribe preview scrutiny.docx --data report.toml
//! ```

pub mod app;
pub mod config;
pub mod data;

// Re-export main entry point and types
pub use app::{format_preview, preview_command, render_command, scan_command};
pub use app::{run_cli, OutputFormat};
pub use config::Settings;
pub use data::{ReportFile, TemplateFile};
