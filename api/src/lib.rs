//! HTTP API for the hotel listing backend
//!
//! Exposes the actix-web application factory, state wiring and telemetry
//! setup so the binary and the integration tests build the same app.

pub mod app;
pub mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use state::AppState;
