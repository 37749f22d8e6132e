use thiserror::Error;

/// Errors raised while validating entity input before it reaches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("{field} too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Update must set at least one field")]
    EmptyPatch,
    #[error("{entity_type} has no alternate lookup key")]
    NoAlternateKey { entity_type: &'static str },
    #[error("Unknown {entity_type} field: {field}")]
    UnknownField {
        entity_type: &'static str,
        field: String,
    },
    #[error("Rejected by store: {0}")]
    Rejected(String),
}
