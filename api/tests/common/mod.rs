//! Shared setup for the API integration tests
#![allow(dead_code)]

use actix_web::http::header;

use hotel_api::AppState;
use hotel_core::services::RegisterUser;
use hotel_shared::AppConfig;

pub const SIGNING_KEY: &str = "integration-test-signing-key-0123456789abcdef";
pub const PASSWORD: &str = "P@ssw0rd1";

/// Development settings with a signing key and a cheap bcrypt cost
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.jwt.secret = SIGNING_KEY.to_string();
    config.password.bcrypt_cost = 4;
    config
}

/// Fresh in-memory state seeded with three countries and three hotels
pub fn test_state() -> AppState {
    AppState::in_memory(test_config()).expect("in-memory state")
}

/// Registers `email` with `roles` and returns an access token for it
pub async fn access_token(state: &AppState, email: &str, roles: &[&str]) -> String {
    state
        .auth
        .register(RegisterUser {
            email: email.to_string(),
            password: PASSWORD.to_string(),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            phone_number: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        })
        .await
        .expect("register");
    state.auth.login(email, PASSWORD).await.expect("login").access_token
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}
