//! Authentication service module
//!
//! This module provides account registration, credential checks, login
//! and refresh-token rotation on top of the token service.

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::PasswordPolicy;
pub use service::{AuthService, RegisterUser};
