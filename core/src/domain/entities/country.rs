//! Country entity, the parent of every hotel.

use serde::{Deserialize, Serialize};

use super::hotel::Hotel;
use crate::domain::entity::{Entity, EntityField, EntityKind, Record, Value};
use crate::repositories::store::{DataStore, EntityStore};

/// Maximum length of a country name
pub const COUNTRY_NAME_MAX_LENGTH: usize = 100;

/// Maximum length of a country short name (ISO alpha-2 style)
pub const COUNTRY_SHORT_NAME_MAX_LENGTH: usize = 2;

/// A country that hotels belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub short_name: String,

    /// Hotels of this country, present only when eagerly loaded
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hotels: Option<Vec<Hotel>>,
}

impl Country {
    /// Creates a transient country; its id is assigned on save
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            short_name: short_name.into(),
            hotels: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Drops eagerly loaded relations
    pub fn detached(mut self) -> Self {
        self.hotels = None;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryField {
    Id,
    Name,
    ShortName,
}

impl EntityField for CountryField {
    fn column(self) -> &'static str {
        match self {
            CountryField::Id => "id",
            CountryField::Name => "name",
            CountryField::ShortName => "short_name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryRelation {
    Hotels,
}

impl Entity for Country {
    type Field = CountryField;
    type Relation = CountryRelation;

    const KIND: EntityKind = EntityKind::Country;
    const TABLE: &'static str = "countries";
    const ID_FIELD: CountryField = CountryField::Id;

    fn fields() -> &'static [CountryField] {
        &[CountryField::Id, CountryField::Name, CountryField::ShortName]
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn value(&self, field: CountryField) -> Value {
        match field {
            CountryField::Id => Value::Int(self.id),
            CountryField::Name => Value::Text(self.name.clone()),
            CountryField::ShortName => Value::Text(self.short_name.clone()),
        }
    }

    fn into_record(self) -> Record {
        Record::Country(self.detached())
    }

    fn select(store: &dyn DataStore) -> &dyn EntityStore<Country> {
        store.countries()
    }
}
