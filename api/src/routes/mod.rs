//! HTTP route handlers
//!
//! - `country` - Country catalog, paged and versioned listing
//! - `hotel` - Hotel catalog
//! - `account` - Registration, login and token refresh
//! - `health` - Liveness with backend checks

pub mod account;
pub mod country;
pub mod health;
pub mod hotel;

use actix_web::web;

use hotel_core::errors::{DomainError, ValidationError};

use crate::handlers::ApiError;

/// Registers every route on the application
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(country::configure)
        .configure(hotel::configure)
        .configure(account::configure)
        .configure(health::configure);
}

/// Rejects identifiers below 1
pub(crate) fn valid_id(id: i64) -> Result<i64, ApiError> {
    if id < 1 {
        return Err(DomainError::from(ValidationError::InvalidId { id }).into());
    }
    Ok(id)
}
