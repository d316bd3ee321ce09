//! Release tags wizard - namespace/component tag mapping.
//!
//! Three steps: release info, tag entry (manual rows or CSV upload) and
//! review.

mod csv_import;
mod document;
mod form;
mod steps;

pub use csv_import::{import_csv, CsvImportError, REQUIRED_COLUMNS, SAMPLE_CSV};
pub use document::{Component, NamespaceBlock, ReleaseTagsDocument};
pub use form::{EntryMode, ReleaseTagsForm, TagRow};
