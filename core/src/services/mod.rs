//! Business services: authentication, tokens, rate limiting and response caching.

pub mod auth;
pub mod cache;
pub mod rate_limit;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, PasswordPolicy, RegisterUser};
pub use cache::{MemoryResponseCache, ResponseCache};
pub use rate_limit::{MemoryRateLimitStore, RateLimitRule, RateLimitStatus, RateLimitStore};
pub use token::{TokenService, TokenServiceConfig};
