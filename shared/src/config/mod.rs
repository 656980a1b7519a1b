//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and password policy
//! - `cache` - Response cache and Redis configuration
//! - `database` - Persistence backend and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `rate_limit` - General per-IP rate limit
//! - `server` - HTTP server and CORS configuration
//!
//! [`AppConfig::load`] layers, from lowest to highest precedence: built-in
//! defaults, `config/default.toml`, `config/{environment}.toml`, then
//! `HOTEL_LISTING__*` environment variables. The signing key is read from
//! `HOTEL_LISTING_KEY`.

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod rate_limit;
pub mod server;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use auth::{JwtConfig, PasswordConfig, SIGNING_KEY_ENV};
pub use cache::{CacheBackend, CacheConfig};
pub use database::{DatabaseBackend, DatabaseConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use rate_limit::RateLimitConfig;
pub use server::{CorsConfig, ServerConfig};

/// Prefix for environment overrides, e.g. `HOTEL_LISTING__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "HOTEL_LISTING";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            rate_limit: RateLimitConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Load configuration from files and environment.
    ///
    /// Fails when no signing key is available.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();

        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("config/default").required(false))
            .add_source(::config::File::with_name(&environment.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.environment = environment;

        if let Ok(key) = std::env::var(SIGNING_KEY_ENV) {
            config.jwt.secret = key;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML document, without touching the environment
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(source, ::config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.jwt.has_secret() {
            return Err(ConfigError::MissingSigningKey(SIGNING_KEY_ENV));
        }
        if self.jwt.lifetime_minutes <= 0 {
            return Err(ConfigError::Invalid("jwt.lifetime_minutes must be positive".into()));
        }
        if self.rate_limit.enabled && (self.rate_limit.limit == 0 || self.rate_limit.period_seconds == 0) {
            return Err(ConfigError::Invalid(
                "rate_limit.limit and rate_limit.period_seconds must be positive".into(),
            ));
        }
        if self.password.required_length > self.password.max_length {
            return Err(ConfigError::Invalid(
                "password.required_length exceeds password.max_length".into(),
            ));
        }
        Ok(())
    }
}
