//! # Hotel Listing Core
//!
//! Domain layer for the hotel listing backend: entities, the generic
//! repository with its unit of work, identity repositories, and the
//! authentication, token, rate-limit and cache services.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    ApiUser, Claims, Country, Entity, EntityField, EntityKind, Hotel, Record, RefreshToken,
    TokenPair, Value,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    Change, ChangeSet, DataStore, EntityStore, Filter, GenericRepository, InsertTicket,
    MemoryStore, OrderBy, Query, SaveReceipt, TokenRepository, UnitOfWork, UserRepository,
};
pub use services::{
    AuthService, AuthServiceConfig, MemoryRateLimitStore, MemoryResponseCache, RateLimitRule,
    RateLimitStatus, RateLimitStore, RegisterUser, ResponseCache, TokenService, TokenServiceConfig,
};
