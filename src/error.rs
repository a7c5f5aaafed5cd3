use thiserror::Error;

use crate::db::DatabaseError;

/// Errors surfaced by session and engine operations.
///
/// `NotFound` is recoverable: the operation was a no-op.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl CoreError {
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Whether the caller may ignore this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::not_found("reminder", "r-42");
        assert_eq!(err.to_string(), "Entity not found: reminder with id r-42");
        assert!(err.is_recoverable());
    }

    #[test]
    fn invalid_is_not_recoverable() {
        assert!(!CoreError::Invalid("bad".into()).is_recoverable());
    }
}
