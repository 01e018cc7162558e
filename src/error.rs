//! Error types for the form, the record store and the storage backends.
//!
//! `FieldError` doubles as the user-visible message: its `Display` text is
//! what the form shows next to the offending input.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::validation::Field;

/// A single field failing its predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error(
        "Name must be 4-20 characters long and can only contain letters, numbers, and spaces."
    )]
    Name,
    #[error("Date of Birth must be in the past")]
    Dob,
    #[error("Please enter a valid email address")]
    Email,
    #[error("Phone number must be exactly 10 digits")]
    Phone,
}

impl FieldError {
    /// The field this error belongs to
    pub fn field(&self) -> Field {
        match self {
            FieldError::Name => Field::Name,
            FieldError::Dob => Field::Dob,
            FieldError::Email => Field::Email,
            FieldError::Phone => Field::Phone,
        }
    }
}

/// Failing fields, keyed by field in form order.
pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Key-value backend failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend is not reachable (no window, storage disabled, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the write (quota, permissions)
    #[error("storage write rejected for key {key}: {reason}")]
    WriteRejected { key: String, reason: String },

    /// Key contains characters the backend cannot address
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Record store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no employee at index {index} (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Form submission failure.
#[derive(Debug, Error)]
pub enum FormError {
    /// At least one field is in a failing state; submit is blocked
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),

    #[error("no gender selected")]
    GenderNotSelected,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FormError {
    /// Field errors carried by a blocked submit (empty for other failures)
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FormError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
