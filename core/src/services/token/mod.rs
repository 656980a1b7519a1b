//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 access token generation and verification
//! - Decoding expired access tokens for the refresh flow
//! - Refresh token issuance, consumption and revocation

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
