//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the wizards to the outside world:
//! - `storage` - Export files on the local filesystem
//! - `validation` - The shared document rule engine

pub mod storage;
pub mod validation;

pub use storage::LocalDocumentStorage;
pub use validation::SharedValidator;
