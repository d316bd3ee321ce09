//! Release tags document - namespace to component tag mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DocumentType;

/// One tagged component inside a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub component_name: String,
    pub component_tag: String,
    pub component_env_config: String,
}

/// All components of one namespace.
///
/// `jira_ref` comes from the first row seen for the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceBlock {
    pub jira_ref: String,
    pub components: Vec<Component>,
}

/// The release tags document.
///
/// Namespace keys keep the order in which they first appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseTagsDocument {
    pub file_type: DocumentType,
    pub release_version: String,
    pub release_date: String,
    pub release_type: String,
    pub release_manager: String,
    pub namespaces: IndexMap<String, NamespaceBlock>,
}

impl ReleaseTagsDocument {
    /// Total number of components across every namespace.
    pub fn component_count(&self) -> usize {
        self.namespaces.values().map(|b| b.components.len()).sum()
    }
}
