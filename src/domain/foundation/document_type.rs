//! DocumentType enum naming the four release artefacts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The four release documents, discriminated on the wire by `file_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    ReleaseNotes,
    ReleaseTags,
    ReleaseInstructions,
    ReleaseMonitoring,
}

impl DocumentType {
    /// Returns all document types in canonical order.
    pub fn all() -> &'static [DocumentType] {
        &[
            DocumentType::ReleaseNotes,
            DocumentType::ReleaseTags,
            DocumentType::ReleaseInstructions,
            DocumentType::ReleaseMonitoring,
        ]
    }

    /// Returns the `file_type` discriminator written into every document.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::ReleaseNotes => "release_notes",
            DocumentType::ReleaseTags => "release_tags",
            DocumentType::ReleaseInstructions => "release_instructions",
            DocumentType::ReleaseMonitoring => "release_monitoring",
        }
    }

    /// Looks up a type by its `file_type` discriminator.
    pub fn from_file_type(file_type: &str) -> Option<DocumentType> {
        Self::all().iter().copied().find(|t| t.as_str() == file_type)
    }

    /// Returns the export file name, e.g. `release_notes.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentType::ReleaseNotes => "Release Notes",
            DocumentType::ReleaseTags => "Release Tags",
            DocumentType::ReleaseInstructions => "Release Instructions",
            DocumentType::ReleaseMonitoring => "Release Monitoring",
        }
    }

    /// Number of wizard steps used to collect this document.
    pub fn total_steps(&self) -> usize {
        match self {
            DocumentType::ReleaseNotes => 6,
            DocumentType::ReleaseTags => 3,
            DocumentType::ReleaseInstructions => 3,
            DocumentType::ReleaseMonitoring => 4,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_file_type(s).ok_or_else(|| {
            ValidationError::invalid_format("file_type", format!("Unknown file_type: {}", s))
        })
    }
}
