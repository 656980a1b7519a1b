//! Password strength rules

use hotel_shared::PasswordConfig;

use crate::errors::ValidationError;

/// Password rules checked before an account is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub required_length: usize,
    pub max_length: usize,
    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,
}

impl From<&PasswordConfig> for PasswordPolicy {
    fn from(config: &PasswordConfig) -> Self {
        Self {
            required_length: config.required_length,
            max_length: config.max_length,
            require_digit: config.require_digit,
            require_lowercase: config.require_lowercase,
            require_uppercase: config.require_uppercase,
            require_non_alphanumeric: config.require_non_alphanumeric,
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::from(&PasswordConfig::default())
    }
}

impl PasswordPolicy {
    /// Checks every rule and reports all failures at once
    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        let length = password.chars().count();
        let mut failures = Vec::new();

        if length < self.required_length {
            failures.push(format!(
                "Passwords must be at least {} characters.",
                self.required_length
            ));
        }
        if length > self.max_length {
            failures.push(format!(
                "Passwords must be at most {} characters.",
                self.max_length
            ));
        }
        if self.require_non_alphanumeric && password.chars().all(|c| c.is_ascii_alphanumeric()) {
            failures.push("Passwords must have at least one non alphanumeric character.".to_string());
        }
        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            failures.push("Passwords must have at least one digit ('0'-'9').".to_string());
        }
        if self.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            failures.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
        }
        if self.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            failures.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::PasswordPolicy { failures })
        }
    }
}
