//! CSV import for tag rows.
//!
//! The header row must name every column in `REQUIRED_COLUMNS`
//! (case-insensitive, checked by presence). Data rows are mapped
//! positionally onto the required column order; missing trailing cells
//! become empty strings.

use thiserror::Error;

use super::form::TagRow;

/// Columns the header row must contain.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "namespace",
    "jira_ref",
    "component_name",
    "component_tag",
    "component_env_config",
];

/// Template offered for download next to the upload control.
pub const SAMPLE_CSV: &str = "namespace,jira_ref,component_name,component_tag,component_env_config
commonapps,WXCNCT-29921,api-application-status,12345...,ADD Module ABC
commonapps,WXCNCT-29921,httpd,12345...,";

/// Errors that reject a whole CSV upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvImportError {
    #[error("CSV file is empty")]
    Empty,

    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Malformed CSV: {0}")]
    Malformed(String),
}

impl From<csv::Error> for CsvImportError {
    fn from(err: csv::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Parses CSV text into tag rows.
///
/// Quoted cells may contain commas. Cells are trimmed, a leading byte
/// order mark is ignored and rows with no content are skipped.
pub fn import_csv(text: &str) -> Result<Vec<TagRow>, CsvImportError> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(CsvImportError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_lowercase())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "CSV upload rejected");
        return Err(CsvImportError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let cell = |idx: usize| record.get(idx).unwrap_or_default().to_string();
        rows.push(TagRow {
            namespace: cell(0),
            jira_ref: cell(1),
            component_name: cell(2),
            component_tag: cell(3),
            component_env_config: cell(4),
        });
    }

    tracing::debug!(rows = rows.len(), "CSV tag rows imported");
    Ok(rows)
}
