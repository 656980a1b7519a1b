//! Domain-specific error types for authentication, tokens and input validation

use std::collections::BTreeMap;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid issuer")]
    InvalidIssuer,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },
}

/// Input validation errors
///
/// Every variant names the offending field so the presentation layer can
/// report field-level messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max}, actual: {actual})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange { field: String, min: f64, max: f64 },

    #[error("Invalid identifier: {id}")]
    InvalidId { id: i64 },

    #[error("Unknown role: {role}")]
    UnknownRole { role: String },

    #[error("Password does not meet requirements")]
    PasswordPolicy { failures: Vec<String> },
}

impl ValidationError {
    /// Field the error is reported against
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidLength { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
            ValidationError::InvalidId { .. } => "id",
            ValidationError::UnknownRole { .. } => "roles",
            ValidationError::PasswordPolicy { .. } => "password",
        }
    }

    /// Field-level messages, grouped by field name
    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        let messages = match self {
            ValidationError::PasswordPolicy { failures } => failures.clone(),
            ValidationError::RequiredField { field } => vec![format!("The {} field is required.", field)],
            ValidationError::InvalidLength { field, min, max, .. } => vec![format!(
                "The {} field must be between {} and {} characters long.",
                field, min, max
            )],
            ValidationError::OutOfRange { field, min, max } => {
                vec![format!("The {} field must be between {} and {}.", field, min, max)]
            }
            ValidationError::InvalidId { id } => vec![format!("{} is not a valid identifier.", id)],
            ValidationError::UnknownRole { role } => vec![format!("Role '{}' does not exist.", role)],
        };

        let mut fields = BTreeMap::new();
        fields.insert(self.field().to_string(), messages);
        fields
    }
}
