//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the wizards and the outside world. Adapters implement these ports.
//!
//! - `DocumentValidator` - Shared rule engine over parsed documents
//! - `DocumentStorage` - Writing exported `<file_type>.json` files

mod document_storage;
mod document_validator;

pub use document_storage::{DocumentStorage, FileMetadata, StorageError};
pub use document_validator::DocumentValidator;
