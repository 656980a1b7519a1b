//! Data access: the generic repository with its unit of work, and the
//! identity repositories.

pub mod change;
pub mod generic;
pub mod memory;
pub mod query;
pub mod store;
pub mod token;
pub mod unit_of_work;
pub mod user;

pub use change::{Change, ChangeSet, InsertTicket, SaveReceipt};
pub use generic::GenericRepository;
pub use memory::{InMemoryTokenRepository, InMemoryUserRepository, MemoryStore};
pub use query::{Filter, OrderBy, Query};
pub use store::{DataStore, EntityStore};
pub use token::TokenRepository;
pub use unit_of_work::UnitOfWork;
pub use user::UserRepository;
