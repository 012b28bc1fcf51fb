//! Error types for the authorization engine

use thiserror::Error;

/// Authorization engine errors
///
/// "No permission" is never an error; it is a normal `Deny` result. Only
/// structurally invalid input from the integrating layer is exceptional,
/// and it is surfaced before any policy evaluation begins.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Structurally invalid input from the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid policy definition
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
