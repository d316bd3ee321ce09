//! Document Storage Port - Export file operations interface.
//!
//! This port defines the contract for writing exported documents to disk.
//! The application depends on this trait, while adapters (like
//! LocalDocumentStorage) provide the implementation.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::foundation::DocumentType;

/// Port for storing exported documents.
///
/// # Contract
///
/// Implementations must:
/// - Name each file `<file_type>.json`, one file per document type
/// - Write atomically (no partial content on failure)
/// - Compute SHA-256 checksums of the written bytes
///
/// # Usage
///
/// ```rust,ignore
/// let storage: &dyn DocumentStorage = get_storage();
///
/// let meta = storage.write(DocumentType::ReleaseTags, &json)?;
/// println!("{} ({} bytes, sha256 {})", meta.path.display(), meta.size_bytes, meta.checksum);
/// ```
pub trait DocumentStorage: Send + Sync {
    /// Writes the document content, replacing any previous export.
    fn write(&self, document_type: DocumentType, content: &str)
        -> Result<FileMetadata, StorageError>;

    /// Reads a previously exported document.
    fn read(&self, document_type: DocumentType) -> Result<String, StorageError>;

    /// Checks whether an export exists.
    fn exists(&self, document_type: DocumentType) -> bool;

    /// SHA-256 checksum (hex) of the stored content.
    fn checksum(&self, document_type: DocumentType) -> Result<String, StorageError>;

    /// Path the document is (or would be) stored at.
    fn file_path(&self, document_type: DocumentType) -> PathBuf;
}

/// Metadata about a stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Full path of the written file.
    pub path: PathBuf,

    /// File size in bytes.
    pub size_bytes: u64,

    /// Last modification time.
    pub modified_at: DateTime<Utc>,

    /// SHA-256 checksum of the content.
    pub checksum: String,
}

impl FileMetadata {
    pub fn new(
        path: impl Into<PathBuf>,
        size_bytes: u64,
        modified_at: DateTime<Utc>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            modified_at,
            checksum: checksum.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// File was not found.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Permission denied accessing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },

    /// File is too large.
    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }
}
