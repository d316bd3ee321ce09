//! Validation Adapters - Rule engine implementations.
//!
//! Contains the shared validator that checks every release document type.

mod shared_validator;

pub use shared_validator::SharedValidator;
