//! In-memory data store.
//!
//! Commits run against a cloned snapshot of the tables and replace the live
//! tables only when every change succeeded, so a failed save leaves the store
//! untouched. Foreign keys and cascades mirror the relational schema.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::{
    Country, CountryField, CountryRelation, Hotel, HotelField, HotelRelation,
};
use crate::domain::entity::{EntityKind, Record};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::change::Change;
use crate::repositories::query::{matches_all, Filter, Query};
use crate::repositories::store::{DataStore, EntityStore};

#[derive(Debug, Clone, Default)]
struct Tables {
    countries: BTreeMap<i64, Country>,
    hotels: BTreeMap<i64, Hotel>,
    next_country_id: i64,
    next_hotel_id: i64,
}

impl Tables {
    fn apply(&mut self, change: Change, inserted: &mut Vec<i64>) -> DomainResult<()> {
        match change {
            Change::Insert(Record::Country(country)) => {
                self.next_country_id += 1;
                let id = self.next_country_id;
                self.countries.insert(id, country.detached().with_id(id));
                inserted.push(id);
            }
            Change::Insert(Record::Hotel(hotel)) => {
                self.check_country_exists(hotel.country_id)?;
                self.next_hotel_id += 1;
                let id = self.next_hotel_id;
                self.hotels.insert(id, hotel.detached().with_id(id));
                inserted.push(id);
            }
            Change::Update(Record::Country(country)) => {
                let slot = self
                    .countries
                    .get_mut(&country.id)
                    .ok_or_else(|| DomainError::not_found(format!("Country {}", country.id)))?;
                *slot = country.detached();
            }
            Change::Update(Record::Hotel(hotel)) => {
                if !self.hotels.contains_key(&hotel.id) {
                    return Err(DomainError::not_found(format!("Hotel {}", hotel.id)));
                }
                self.check_country_exists(hotel.country_id)?;
                self.hotels.insert(hotel.id, hotel.detached());
            }
            Change::Delete { kind: EntityKind::Country, id } => {
                if self.countries.remove(&id).is_some() {
                    self.hotels.retain(|_, h| h.country_id != id);
                }
            }
            Change::Delete { kind: EntityKind::Hotel, id } => {
                self.hotels.remove(&id);
            }
        }
        Ok(())
    }

    fn check_country_exists(&self, country_id: i64) -> DomainResult<()> {
        if self.countries.contains_key(&country_id) {
            Ok(())
        } else {
            Err(DomainError::persistence(format!(
                "foreign key constraint fails: hotels.country_id references missing country {}",
                country_id
            )))
        }
    }
}

/// Process-local store for development and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the catalog the API ships with
    pub fn seeded() -> Self {
        let countries: BTreeMap<i64, Country> = [
            Country::new("Jamaica", "JM").with_id(1),
            Country::new("Bahamas", "BS").with_id(2),
            Country::new("Cayman Island", "CI").with_id(3),
        ]
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

        let hotels: BTreeMap<i64, Hotel> = [
            Hotel::new("Sandals Resort and Spa", "Negril", 4.5, 1).with_id(1),
            Hotel::new("Comfort Suites", "George Town", 4.3, 3).with_id(2),
            Hotel::new("Grand Palladium", "Nassau", 4.0, 2).with_id(3),
        ]
        .into_iter()
        .map(|h| (h.id, h))
        .collect();

        let tables = Tables {
            next_country_id: countries.len() as i64,
            next_hotel_id: hotels.len() as i64,
            countries,
            hotels,
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl EntityStore<Country> for MemoryStore {
    async fn fetch(&self, query: &Query<Country>) -> DomainResult<Vec<Country>> {
        let tables = self.tables.read().await;
        let mut rows = query.apply(tables.countries.values());

        if query.includes_relation(CountryRelation::Hotels) {
            for country in &mut rows {
                country.hotels = Some(
                    tables
                        .hotels
                        .values()
                        .filter(|h| h.country_id == country.id)
                        .cloned()
                        .collect(),
                );
            }
        }
        Ok(rows)
    }

    async fn count(&self, filters: &[Filter<CountryField>]) -> DomainResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables.countries.values().filter(|c| matches_all(filters, *c)).count() as u64)
    }
}

#[async_trait]
impl EntityStore<Hotel> for MemoryStore {
    async fn fetch(&self, query: &Query<Hotel>) -> DomainResult<Vec<Hotel>> {
        let tables = self.tables.read().await;
        let mut rows = query.apply(tables.hotels.values());

        if query.includes_relation(HotelRelation::Country) {
            for hotel in &mut rows {
                hotel.country = tables.countries.get(&hotel.country_id).cloned().map(Box::new);
            }
        }
        Ok(rows)
    }

    async fn count(&self, filters: &[Filter<HotelField>]) -> DomainResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables.hotels.values().filter(|h| matches_all(filters, *h)).count() as u64)
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    fn countries(&self) -> &dyn EntityStore<Country> {
        self
    }

    fn hotels(&self) -> &dyn EntityStore<Hotel> {
        self
    }

    async fn commit(&self, changes: Vec<Change>) -> DomainResult<Vec<i64>> {
        let mut live = self.tables.write().await;
        let mut working = live.clone();
        let mut inserted = Vec::new();

        for change in changes {
            working.apply(change, &mut inserted)?;
        }

        *live = working;
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commit_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let ids = store
            .commit(vec![
                Change::Insert(Record::Country(Country::new("Jamaica", "JM"))),
                Change::Insert(Record::Country(Country::new("Bahamas", "BS"))),
                Change::Insert(Record::Hotel(Hotel::new("Grand Palladium", "Nassau", 4.0, 2))),
            ])
            .await
            .unwrap();

        assert_eq!(ids, vec![1, 2, 1]);
        assert_eq!(EntityStore::<Country>::count(&store, &[]).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_commit_applies_nothing() {
        let store = MemoryStore::new();
        let result = store
            .commit(vec![
                Change::Insert(Record::Country(Country::new("Jamaica", "JM"))),
                Change::Insert(Record::Hotel(Hotel::new("Orphan", "Nowhere", 3.0, 99))),
            ])
            .await;

        assert!(matches!(result, Err(DomainError::Persistence { .. })));
        assert_eq!(EntityStore::<Country>::count(&store, &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seeded_ids_continue_after_catalog() {
        let store = MemoryStore::seeded();
        let ids = store
            .commit(vec![
                Change::Insert(Record::Country(Country::new("Aruba", "AW"))),
                Change::Insert(Record::Hotel(Hotel::new("Bucuti", "Eagle Beach", 4.8, 4))),
            ])
            .await
            .unwrap();
        assert_eq!(ids, vec![4, 4]);

        let hotels = EntityStore::<Hotel>::fetch(&store, &Query::new()).await.unwrap();
        let countries: Vec<i64> = hotels.iter().map(|h| h.country_id).collect();
        assert_eq!(countries, vec![1, 3, 2, 4]);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let store = MemoryStore::seeded();
        let result = store
            .commit(vec![Change::Update(Record::Country(Country::new("Atlantis", "AT").with_id(404)))])
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_country_cascades_and_missing_delete_is_noop() {
        let store = MemoryStore::seeded();
        store
            .commit(vec![
                Change::Delete { kind: EntityKind::Country, id: 1 },
                Change::Delete { kind: EntityKind::Country, id: 1000 },
            ])
            .await
            .unwrap();

        let remaining = EntityStore::<Hotel>::fetch(
            &store,
            &Query::new().filter(Filter::eq(HotelField::CountryId, 1)),
        )
        .await
        .unwrap();
        assert!(remaining.is_empty());
        assert_eq!(EntityStore::<Hotel>::count(&store, &[]).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_with_includes() {
        let store = MemoryStore::seeded();

        let countries = EntityStore::<Country>::fetch(
            &store,
            &Query::by_id(1).include(CountryRelation::Hotels),
        )
        .await
        .unwrap();
        let hotels = countries[0].hotels.as_ref().unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].name, "Sandals Resort and Spa");

        let hotels = EntityStore::<Hotel>::fetch(&store, &Query::by_id(3).include(HotelRelation::Country))
            .await
            .unwrap();
        assert_eq!(hotels[0].country.as_ref().unwrap().short_name, "BS");
    }

    #[tokio::test]
    async fn test_count_respects_filters() {
        let store = MemoryStore::seeded();
        let count = EntityStore::<Country>::count(&store, &[Filter::contains(CountryField::Name, "a")])
            .await
            .unwrap();
        assert_eq!(count, 3);

        let count = EntityStore::<Country>::count(&store, &[Filter::eq(CountryField::ShortName, "JM")])
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
