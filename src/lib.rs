//! Release Wizard - Release document builders and shared validation.
//!
//! Four wizards (release notes, tags, instructions and monitoring) collect
//! form state, assemble a canonical JSON document and hand it to one
//! shared rule engine before export.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
