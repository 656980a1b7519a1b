//! Type-parameterized repository over a unit of work.
//!
//! Reads go straight to the backing store and return owned, untracked
//! values. Writes are only queued on the owning [`UnitOfWork`]'s change set
//! and reach storage when [`UnitOfWork::save`] is called.
//!
//! [`UnitOfWork`]: super::unit_of_work::UnitOfWork
//! [`UnitOfWork::save`]: super::unit_of_work::UnitOfWork::save

use std::marker::PhantomData;

use hotel_shared::types::{PaginatedResponse, RequestParams, SortOrder};

use super::change::{ChangeSet, InsertTicket};
use super::query::Query;
use super::store::EntityStore;
use crate::domain::entity::Entity;
use crate::errors::DomainResult;

pub struct GenericRepository<'a, E: Entity> {
    store: &'a dyn EntityStore<E>,
    changes: &'a mut ChangeSet,
    _entity: PhantomData<E>,
}

impl<'a, E: Entity> GenericRepository<'a, E> {
    pub(crate) fn new(store: &'a dyn EntityStore<E>, changes: &'a mut ChangeSet) -> Self {
        Self {
            store,
            changes,
            _entity: PhantomData,
        }
    }

    /// All rows matching the query
    pub async fn get_all(&self, query: Query<E>) -> DomainResult<Vec<E>> {
        self.store.fetch(&query).await
    }

    /// One page of the rows matching the query.
    ///
    /// `total_count` counts every matching row. Rows are ordered by primary
    /// key unless the query orders them.
    pub async fn get_paged(
        &self,
        query: Query<E>,
        params: RequestParams,
    ) -> DomainResult<PaginatedResponse<E>> {
        let params = params.normalized();
        let total = self.store.count(query.filters()).await?;

        let query = if query.ordering().is_empty() {
            query.order_by(E::ID_FIELD, SortOrder::Asc)
        } else {
            query
        };
        let items = self
            .store
            .fetch(&query.with_offset(params.offset()).with_limit(params.limit()))
            .await?;

        Ok(PaginatedResponse::new(items, params, total))
    }

    /// First row matching the query, if any
    pub async fn get_single(&self, query: Query<E>) -> DomainResult<Option<E>> {
        let mut rows = self.store.fetch(&query.with_limit(1)).await?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    pub fn insert(&mut self, entity: E) -> InsertTicket {
        self.changes.insert(entity.into_record())
    }

    pub fn insert_many(&mut self, entities: impl IntoIterator<Item = E>) -> Vec<InsertTicket> {
        entities.into_iter().map(|e| self.insert(e)).collect()
    }

    /// Queues removal by key; removing a missing key is a no-op on save
    pub fn delete_by_id(&mut self, id: i64) {
        self.changes.delete(E::KIND, id);
    }

    pub fn delete_many(&mut self, entities: impl IntoIterator<Item = E>) {
        for entity in entities {
            self.delete_by_id(entity.id());
        }
    }

    /// Queues a full overwrite of the row with the entity's key
    pub fn update(&mut self, entity: E) {
        self.changes.update(entity.into_record());
    }
}
