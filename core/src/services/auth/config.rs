//! Configuration for the authentication service

use hotel_shared::PasswordConfig;

use super::password::PasswordPolicy;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Password rules applied on registration
    pub password_policy: PasswordPolicy,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Role granted when a registration names none
    pub default_role: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self::from(&PasswordConfig::default())
    }
}

impl From<&PasswordConfig> for AuthServiceConfig {
    fn from(config: &PasswordConfig) -> Self {
        Self {
            password_policy: PasswordPolicy::from(config),
            bcrypt_cost: config.bcrypt_cost,
            default_role: crate::domain::entities::role::USER.to_string(),
        }
    }
}

impl AuthServiceConfig {
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
