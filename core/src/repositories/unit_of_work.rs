//! Request-scoped unit of work.

use std::sync::Arc;

use super::change::{ChangeSet, SaveReceipt};
use super::generic::GenericRepository;
use super::store::DataStore;
use crate::domain::entities::{Country, Hotel};
use crate::domain::entity::Entity;
use crate::errors::DomainResult;

/// Aggregates repository mutations and commits them as one transaction.
///
/// A unit of work is created per request and never shared.
pub struct UnitOfWork {
    store: Arc<dyn DataStore>,
    changes: ChangeSet,
}

impl UnitOfWork {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self {
            store,
            changes: ChangeSet::default(),
        }
    }

    /// Repository for any entity type
    pub fn repository<E: Entity>(&mut self) -> GenericRepository<'_, E> {
        GenericRepository::new(E::select(&*self.store), &mut self.changes)
    }

    pub fn countries(&mut self) -> GenericRepository<'_, Country> {
        self.repository()
    }

    pub fn hotels(&mut self) -> GenericRepository<'_, Hotel> {
        self.repository()
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Number of queued changes
    pub fn pending(&self) -> usize {
        self.changes.len()
    }

    /// Drops every queued change
    pub fn discard(&mut self) {
        self.changes.drain();
    }

    /// Commits every queued change atomically.
    ///
    /// The change set is emptied whether or not the commit succeeds; on
    /// failure nothing was applied.
    pub async fn save(&mut self) -> DomainResult<SaveReceipt> {
        let changes = self.changes.drain();
        if changes.is_empty() {
            return Ok(SaveReceipt::default());
        }

        let applied = changes.len();
        match self.store.commit(changes).await {
            Ok(ids) => {
                tracing::debug!(applied, inserted = ids.len(), "Unit of work saved");
                Ok(SaveReceipt::new(ids, applied))
            }
            Err(e) => {
                tracing::warn!(error = %e, applied = 0, "Unit of work save failed");
                Err(e)
            }
        }
    }
}
