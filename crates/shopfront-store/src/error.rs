//! # Store Errors
//!
//! The catalog boundary error. By design this is the only error type the
//! store layer exposes: cart and storage failures degrade in place (clamp,
//! repair, or log) instead of propagating, so the UI never loses an
//! interactive cart over a bad payload or a failed write.

use thiserror::Error;

/// A catalog request failure, as the `{message: string}` wire shape the
/// API contract defines. Implementors of [`crate::CatalogApi`] normalize
/// transport errors (HTTP status, no response, client bug) into this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CatalogError {
    pub message: String,
}

impl CatalogError {
    pub fn new(message: impl Into<String>) -> Self {
        CatalogError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_wire_message() {
        let err = CatalogError::new("No server response");
        assert_eq!(err.to_string(), "No server response");
    }
}
