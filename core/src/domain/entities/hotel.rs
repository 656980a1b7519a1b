//! Hotel entity.

use serde::{Deserialize, Serialize};

use super::country::Country;
use crate::domain::entity::{Entity, EntityField, EntityKind, Record, Value};
use crate::repositories::store::{DataStore, EntityStore};

pub const HOTEL_NAME_MAX_LENGTH: usize = 150;
pub const HOTEL_ADDRESS_MAX_LENGTH: usize = 250;
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// A hotel, always owned by exactly one country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub rating: f64,
    pub country_id: i64,

    /// Owning country, present only when eagerly loaded
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country: Option<Box<Country>>,
}

impl Hotel {
    /// Creates a transient hotel; its id is assigned on save
    pub fn new(name: impl Into<String>, address: impl Into<String>, rating: f64, country_id: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
            rating,
            country_id,
            country: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Drops eagerly loaded relations
    pub fn detached(mut self) -> Self {
        self.country = None;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotelField {
    Id,
    Name,
    Address,
    Rating,
    CountryId,
}

impl EntityField for HotelField {
    fn column(self) -> &'static str {
        match self {
            HotelField::Id => "id",
            HotelField::Name => "name",
            HotelField::Address => "address",
            HotelField::Rating => "rating",
            HotelField::CountryId => "country_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelRelation {
    Country,
}

impl Entity for Hotel {
    type Field = HotelField;
    type Relation = HotelRelation;

    const KIND: EntityKind = EntityKind::Hotel;
    const TABLE: &'static str = "hotels";
    const ID_FIELD: HotelField = HotelField::Id;

    fn fields() -> &'static [HotelField] {
        &[
            HotelField::Id,
            HotelField::Name,
            HotelField::Address,
            HotelField::Rating,
            HotelField::CountryId,
        ]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn value(&self, field: HotelField) -> Value {
        match field {
            HotelField::Id => Value::Int(self.id),
            HotelField::Name => Value::Text(self.name.clone()),
            HotelField::Address => Value::Text(self.address.clone()),
            HotelField::Rating => Value::Float(self.rating),
            HotelField::CountryId => Value::Int(self.country_id),
        }
    }

    fn into_record(self) -> Record {
        Record::Hotel(self.detached())
    }

    fn select(store: &dyn DataStore) -> &dyn EntityStore<Hotel> {
        store.hotels()
    }
}
