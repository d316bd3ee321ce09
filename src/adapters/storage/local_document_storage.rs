//! Local Filesystem Storage Adapter - Implementation of DocumentStorage.
//!
//! Writes exported release documents as `<file_type>.json` files in one
//! export directory. Uses atomic writes and SHA-256 checksums.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::foundation::DocumentType;
use crate::ports::{DocumentStorage, FileMetadata, StorageError};

/// Default maximum export size (10 MB).
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for exported documents.
///
/// # Directory Structure
///
/// ```text
/// {base_path}/
/// ├── release_notes.json
/// ├── release_tags.json
/// ├── release_instructions.json
/// └── release_monitoring.json
/// ```
///
/// # Atomic Writes
///
/// Content goes to `<file_type>.json.tmp`, is synced, then renamed over the
/// final name. A crash mid-write leaves the previous export intact.
#[derive(Debug, Clone)]
pub struct LocalDocumentStorage {
    base_path: PathBuf,
    max_file_size_bytes: u64,
}

impl LocalDocumentStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }

    pub fn with_max_file_size(mut self, max_bytes: u64) -> Self {
        self.max_file_size_bytes = max_bytes;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn temp_path(&self, document_type: DocumentType) -> PathBuf {
        self.base_path
            .join(format!("{}.tmp", document_type.file_name()))
    }

    fn ensure_base_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).map_err(|e| {
            StorageError::io(format!(
                "Failed to create export directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }

    /// Computes SHA-256 checksum of the given content.
    fn compute_checksum(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn map_io_error(path: &Path, action: &str, e: io::Error) -> StorageError {
        match e.kind() {
            io::ErrorKind::NotFound => StorageError::not_found(path.display().to_string()),
            io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(path.display().to_string())
            }
            _ => StorageError::io(format!("Failed to {} {}: {}", action, path.display(), e)),
        }
    }

    fn write_temp(temp_path: &Path, content: &str) -> io::Result<()> {
        let mut file = fs::File::create(temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }
}

impl DocumentStorage for LocalDocumentStorage {
    fn write(
        &self,
        document_type: DocumentType,
        content: &str,
    ) -> Result<FileMetadata, StorageError> {
        let size = content.len() as u64;
        if size > self.max_file_size_bytes {
            return Err(StorageError::file_too_large(size, self.max_file_size_bytes));
        }

        self.ensure_base_dir()?;

        let temp_path = self.temp_path(document_type);
        let final_path = self.file_path(document_type);

        if let Err(e) = Self::write_temp(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(Self::map_io_error(&temp_path, "write", e));
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        let modified_at = fs::metadata(&final_path)
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        let meta = FileMetadata::new(
            final_path,
            size,
            modified_at,
            Self::compute_checksum(content),
        );
        tracing::info!(
            path = %meta.path.display(),
            size_bytes = meta.size_bytes,
            checksum = %meta.checksum,
            "document exported"
        );
        Ok(meta)
    }

    fn read(&self, document_type: DocumentType) -> Result<String, StorageError> {
        let path = self.file_path(document_type);
        fs::read_to_string(&path).map_err(|e| Self::map_io_error(&path, "read", e))
    }

    fn exists(&self, document_type: DocumentType) -> bool {
        self.file_path(document_type).is_file()
    }

    fn checksum(&self, document_type: DocumentType) -> Result<String, StorageError> {
        let content = self.read(document_type)?;
        Ok(Self::compute_checksum(&content))
    }

    fn file_path(&self, document_type: DocumentType) -> PathBuf {
        self.base_path.join(document_type.file_name())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
