//! Storage Adapters
//!
//! Implementations of the DocumentStorage port for writing exports.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::LocalDocumentStorage;
//!
//! let storage = LocalDocumentStorage::new("./exports");
//! let meta = storage.write(DocumentType::ReleaseTags, &json)?;
//! ```

mod local_document_storage;

pub use local_document_storage::{LocalDocumentStorage, DEFAULT_MAX_FILE_SIZE_BYTES};
