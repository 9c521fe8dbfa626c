//! titlescribe-core - records and narrative rules for legal scrutiny reports
//!
//! This crate holds everything that does not touch the DOCX package:
//!
//! - the record types handed over by the data store (deeds, parcel details,
//!   per-deed-type templates),
//! - the [`FieldRegistry`] holding user-entered placeholder values,
//! - the history-of-title narrative renderer and its template lookup,
//! - diagnostics used to report non-fatal template problems.
//!
//! # Example
//!
//! ```
//! use titlescribe_core::{render_history, DeedRecord, TemplateLookup};
//!
//! let deeds = vec![DeedRecord::new("Gift Deed", "", "Z")];
//! let history = render_history(&deeds, &TemplateLookup::empty());
//! assert_eq!(
//!     history,
//!     "GIFT DEED:\nDeed executed by [Executor] in favour of Z dated [Date], Document No: [Doc No]"
//! );
//! ```

pub mod diagnostics;
pub mod error;
pub mod fields;
pub mod history;
pub mod model;
pub mod placeholder;
pub mod preview;
pub mod source;

pub use diagnostics::{Diagnostic, Diagnostics, Severity, Span};
pub use error::{CoreError, Result};
pub use fields::FieldRegistry;
pub use history::{render_deed_history, render_history, STANDARD_PLACEHOLDERS};
pub use model::{custom_field_label, CustomFields, DeedRecord, DeedTemplate, ParcelDetail, ParcelField};
pub use preview::{deed_preview, DEFAULT_PREVIEW_TEMPLATE};
pub use source::{InMemoryTemplates, NarrativeTemplateSource, TemplateLookup};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
