//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management and embedded migrations
//! - The generic-repository data store with SQL rendering of queries
//! - User and refresh-token repositories

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{MySqlStore, MySqlTokenRepository, MySqlUserRepository};
