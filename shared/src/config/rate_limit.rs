//! Rate limiting configuration

use serde::{Deserialize, Serialize};

/// General IP rate limit applied to every endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Requests allowed per client IP in each period
    pub limit: u32,

    /// Window length in seconds
    pub period_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: 1,
            period_seconds: 5,
        }
    }
}

impl RateLimitConfig {
    /// Lenient limits for local development
    pub fn development() -> Self {
        Self {
            enabled: true,
            limit: 100,
            period_seconds: 60,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}
