//! MySQL implementations of the core persistence traits

mod sql;
pub mod store;
pub mod token_repository;
pub mod user_repository;

pub use store::MySqlStore;
pub use token_repository::MySqlTokenRepository;
pub use user_repository::MySqlUserRepository;
