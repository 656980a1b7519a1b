//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// Name of the environment variable holding the JWT signing key
pub const SIGNING_KEY_ENV: &str = "HOTEL_LISTING_KEY";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HS256 signing secret. Normally filled from `HOTEL_LISTING_KEY`.
    #[serde(skip_serializing)]
    pub secret: String,

    /// Issuer claim, validated on every token
    pub issuer: String,

    /// Access token lifetime in minutes
    pub lifetime_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_lifetime_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: String::from("HotelListingAPI"),
            lifetime_minutes: 15,
            refresh_token_lifetime_days: 7,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_lifetime_minutes(mut self, minutes: i64) -> Self {
        self.lifetime_minutes = minutes;
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_lifetime_days(mut self, days: i64) -> Self {
        self.refresh_token_lifetime_days = days;
        self
    }

    /// Whether a signing secret has been provided
    pub fn has_secret(&self) -> bool {
        !self.secret.trim().is_empty()
    }
}

/// Password policy and hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Minimum password length
    pub required_length: usize,

    /// Maximum password length
    pub max_length: usize,

    pub require_digit: bool,
    pub require_lowercase: bool,
    pub require_uppercase: bool,
    pub require_non_alphanumeric: bool,

    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            required_length: 6,
            max_length: 15,
            require_digit: true,
            require_lowercase: true,
            require_uppercase: true,
            require_non_alphanumeric: true,
            bcrypt_cost: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.issuer, "HotelListingAPI");
        assert_eq!(config.lifetime_minutes, 15);
        assert_eq!(config.refresh_token_lifetime_days, 7);
        assert!(!config.has_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_lifetime_minutes(30)
            .with_refresh_lifetime_days(14);

        assert_eq!(config.lifetime_minutes, 30);
        assert_eq!(config.refresh_token_lifetime_days, 14);
        assert!(config.has_secret());
    }

    #[test]
    fn test_secret_never_serialized() {
        let json = serde_json::to_string(&JwtConfig::new("top-secret")).unwrap();
        assert!(!json.contains("top-secret"));
    }

    #[test]
    fn test_password_config_default() {
        let config = PasswordConfig::default();
        assert_eq!(config.required_length, 6);
        assert_eq!(config.max_length, 15);
        assert!(config.require_non_alphanumeric);
    }
}
