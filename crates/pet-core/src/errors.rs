//! Cross-cutting error types.
//!
//! Domain-specific errors (`DatabaseError`, `AffiliateError`) are defined in
//! their respective crates. The HTTP boundary in `pet-server` is the only
//! place errors are mapped to status codes.

use thiserror::Error;

/// Errors that can be raised by any crate in the workspace.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (missing or malformed required data).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with a displayable id.
    pub fn not_found(entity_type: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::not_found("actionable", 404);
        assert_eq!(err.to_string(), "Entity not found: actionable 404");
    }

    #[test]
    fn validation_message() {
        let err = CoreError::Validation("content is required".into());
        assert_eq!(err.to_string(), "Validation error: content is required");
    }
}
