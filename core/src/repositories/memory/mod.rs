//! In-memory backends used for local development and tests.

pub mod store;
pub mod token;
pub mod user;

pub use store::MemoryStore;
pub use token::InMemoryTokenRepository;
pub use user::InMemoryUserRepository;
