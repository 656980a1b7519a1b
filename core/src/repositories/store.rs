//! Backend seam of the generic repository.

use async_trait::async_trait;

use super::change::Change;
use super::query::{Filter, Query};
use crate::domain::entities::{Country, Hotel};
use crate::domain::entity::Entity;
use crate::errors::DomainResult;

/// Read side of a backend for one entity type
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Rows matching the query, with requested relations loaded
    async fn fetch(&self, query: &Query<E>) -> DomainResult<Vec<E>>;

    /// Number of rows matching every filter
    async fn count(&self, filters: &[Filter<E::Field>]) -> DomainResult<u64>;
}

/// A complete persistence backend
#[async_trait]
pub trait DataStore: Send + Sync {
    fn countries(&self) -> &dyn EntityStore<Country>;

    fn hotels(&self) -> &dyn EntityStore<Hotel>;

    /// Applies every change atomically, in order.
    ///
    /// Returns the keys generated for inserts, in queue order. On error no
    /// change is applied.
    async fn commit(&self, changes: Vec<Change>) -> DomainResult<Vec<i64>>;

    /// Verifies the backend is reachable
    async fn health_check(&self) -> DomainResult<()> {
        Ok(())
    }
}
