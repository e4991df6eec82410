//! Error types for the expirable set.
//!
//! Only the lookups that can legitimately miss return errors. Everything
//! else on the set is total: removing an absent element or sweeping an
//! empty set is a silent no-op.

use thiserror::Error;

/// The error type for set operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// `update` was asked to rename an element that is not stored.
    #[error("element does not exist")]
    NotFound,

    /// `get_elem_ttl` found no live entry for the element (absent or
    /// already expired).
    #[error("element not found or already expired")]
    ElementNotFound,

    /// `get_elem_ttl` found the element, but it never expires.
    #[error("element has no expiry")]
    NoExpiry,
}

/// A specialized Result type for set operations.
pub type SetResult<T> = Result<T, SetError>;
