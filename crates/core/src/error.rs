use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A write would leave a project without a resolvable main contractor.
    /// The enclosing transaction must roll back.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Malformed or inverted billing range / company filter input.
    #[error("Invalid range input: {0}")]
    InvalidRange(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
