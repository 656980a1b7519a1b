//! Configuration for the token service

use hotel_shared::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing key for HS256
    pub signing_key: String,
    /// Expected `iss` claim on every token
    pub issuer: String,
    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,
}

impl TokenServiceConfig {
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            ..Default::default()
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_access_token_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            signing_key: String::new(),
            issuer: String::from("HotelListingAPI"),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            signing_key: config.secret.clone(),
            issuer: config.issuer.clone(),
            access_token_expiry_minutes: config.lifetime_minutes,
            refresh_token_expiry_days: config.refresh_token_lifetime_days,
        }
    }
}
