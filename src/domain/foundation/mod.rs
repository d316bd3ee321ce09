//! Foundation module - Shared domain primitives.
//!
//! Contains the document discriminator, format guards, value objects and
//! error types that form the vocabulary of the release wizards.

mod document_type;
mod errors;
mod formats;
mod percentage;
mod timestamp;

pub use document_type::DocumentType;
pub use errors::{FieldError, ValidationError};
pub use formats::{
    has_min_words, is_valid_downtime, is_valid_email, is_valid_url, normalize_release_date,
    word_count, MIN_WORD_COUNT,
};
pub use percentage::{is_valid_percentage, normalize_percentage};
pub use timestamp::{is_valid_timestamp, ValidationTimestamp, TIMESTAMP_FORMAT};
