//! Release tags form state and document assembly.

use indexmap::IndexMap;

use crate::domain::foundation::{normalize_release_date, DocumentType, FieldError};
use crate::domain::wizard::{StepRules, WizardForm};

use super::csv_import::{import_csv, CsvImportError};
use super::document::{Component, NamespaceBlock, ReleaseTagsDocument};
use super::steps;

/// How tag rows are entered on step 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Manual,
    File,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Manual => "manual",
            EntryMode::File => "file",
        }
    }
}

/// One namespace/component tag row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRow {
    pub namespace: String,
    pub jira_ref: String,
    pub component_name: String,
    pub component_tag: String,
    pub component_env_config: String,
}

impl TagRow {
    pub fn new(
        namespace: impl Into<String>,
        jira_ref: impl Into<String>,
        component_name: impl Into<String>,
        component_tag: impl Into<String>,
        component_env_config: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            jira_ref: jira_ref.into(),
            component_name: component_name.into(),
            component_tag: component_tag.into(),
            component_env_config: component_env_config.into(),
        }
    }

    /// True when every cell is blank.
    pub fn is_blank(&self) -> bool {
        [
            &self.namespace,
            &self.jira_ref,
            &self.component_name,
            &self.component_tag,
            &self.component_env_config,
        ]
        .iter()
        .all(|v| v.trim().is_empty())
    }
}

/// Everything the release tags wizard collects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseTagsForm {
    pub release_version: String,
    pub release_date: String,
    pub release_type: String,
    pub release_manager: String,
    entry_mode: Option<EntryMode>,
    pub rows: Vec<TagRow>,
    csv_imported: bool,
}

impl ReleaseTagsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_mode(&self) -> Option<EntryMode> {
        self.entry_mode
    }

    /// Switching to manual entry opens one empty row if there are none.
    pub fn set_entry_mode(&mut self, mode: Option<EntryMode>) {
        self.entry_mode = mode;
        if mode == Some(EntryMode::Manual) && self.rows.is_empty() {
            self.rows.push(TagRow::default());
        }
    }

    pub fn add_row(&mut self, row: TagRow) {
        self.rows.push(row);
    }

    /// Removes a row; the first row always stays.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    pub fn csv_imported(&self) -> bool {
        self.csv_imported
    }

    /// Replaces the rows with the contents of an uploaded CSV.
    ///
    /// On error the existing rows are kept untouched.
    pub fn load_csv(&mut self, text: &str) -> Result<usize, CsvImportError> {
        let rows = import_csv(text)?;
        let count = rows.len();
        self.rows = rows;
        self.csv_imported = true;
        Ok(count)
    }

    fn build_namespaces(&self) -> IndexMap<String, NamespaceBlock> {
        let mut namespaces: IndexMap<String, NamespaceBlock> = IndexMap::new();
        for row in self.rows.iter().filter(|r| !r.is_blank()) {
            let block = namespaces
                .entry(row.namespace.trim().to_string())
                .or_insert_with(|| NamespaceBlock {
                    jira_ref: row.jira_ref.trim().to_string(),
                    components: Vec::new(),
                });
            block.components.push(Component {
                component_name: row.component_name.trim().to_string(),
                component_tag: row.component_tag.trim().to_string(),
                component_env_config: row.component_env_config.trim().to_string(),
            });
        }
        namespaces
    }
}

impl WizardForm for ReleaseTagsForm {
    type Document = ReleaseTagsDocument;

    const DOCUMENT_TYPE: DocumentType = DocumentType::ReleaseTags;

    fn build(&self) -> ReleaseTagsDocument {
        ReleaseTagsDocument {
            file_type: Self::DOCUMENT_TYPE,
            release_version: self.release_version.trim().to_string(),
            release_date: normalize_release_date(&self.release_date),
            release_type: self.release_type.trim().to_string(),
            release_manager: self.release_manager.trim().to_string(),
            namespaces: self.build_namespaces(),
        }
    }

    fn validate_step(&self, step: usize, _rules: &StepRules) -> Vec<FieldError> {
        match step {
            1 => steps::release_info(self),
            2 => steps::tag_entries(self),
            _ => Vec::new(),
        }
    }
}
