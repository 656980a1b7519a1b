//! Query intent for the generic repository.
//!
//! A [`Query`] is a plain description of what to read: ANDed filters, an
//! ordering, the relations to eager-load, and an optional window. Backends
//! translate it; nothing here touches storage.

use std::cmp::Ordering;

use hotel_shared::types::SortOrder;

use crate::domain::entity::{Entity, EntityField, Value};

/// A single predicate over one field
#[derive(Debug, Clone, PartialEq)]
pub enum Filter<F> {
    Eq(F, Value),
    Ne(F, Value),
    Gt(F, Value),
    Ge(F, Value),
    Lt(F, Value),
    Le(F, Value),
    /// Case-insensitive substring match on a text field
    Contains(F, String),
    In(F, Vec<Value>),
}

impl<F: EntityField> Filter<F> {
    pub fn eq(field: F, value: impl Into<Value>) -> Self {
        Filter::Eq(field, value.into())
    }

    pub fn ne(field: F, value: impl Into<Value>) -> Self {
        Filter::Ne(field, value.into())
    }

    pub fn gt(field: F, value: impl Into<Value>) -> Self {
        Filter::Gt(field, value.into())
    }

    pub fn ge(field: F, value: impl Into<Value>) -> Self {
        Filter::Ge(field, value.into())
    }

    pub fn lt(field: F, value: impl Into<Value>) -> Self {
        Filter::Lt(field, value.into())
    }

    pub fn le(field: F, value: impl Into<Value>) -> Self {
        Filter::Le(field, value.into())
    }

    pub fn contains(field: F, needle: impl Into<String>) -> Self {
        Filter::Contains(field, needle.into())
    }

    pub fn is_in<V: Into<Value>>(field: F, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In(field, values.into_iter().map(Into::into).collect())
    }

    /// Field the predicate applies to
    pub fn field(&self) -> F {
        match self {
            Filter::Eq(f, _)
            | Filter::Ne(f, _)
            | Filter::Gt(f, _)
            | Filter::Ge(f, _)
            | Filter::Lt(f, _)
            | Filter::Le(f, _)
            | Filter::Contains(f, _)
            | Filter::In(f, _) => *f,
        }
    }

    /// Evaluates the predicate against a field's actual value
    pub fn matches(&self, actual: &Value) -> bool {
        let cmp = |expected: &Value| actual.compare(expected);
        match self {
            Filter::Eq(_, v) => cmp(v) == Some(Ordering::Equal),
            Filter::Ne(_, v) => cmp(v) != Some(Ordering::Equal),
            Filter::Gt(_, v) => cmp(v) == Some(Ordering::Greater),
            Filter::Ge(_, v) => matches!(cmp(v), Some(Ordering::Greater | Ordering::Equal)),
            Filter::Lt(_, v) => cmp(v) == Some(Ordering::Less),
            Filter::Le(_, v) => matches!(cmp(v), Some(Ordering::Less | Ordering::Equal)),
            Filter::Contains(_, needle) => match actual {
                Value::Text(text) => text.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            Filter::In(_, values) => values.iter().any(|v| cmp(v) == Some(Ordering::Equal)),
        }
    }
}

/// One ordering term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy<F> {
    pub field: F,
    pub order: SortOrder,
}

/// Query intent over entity type `E`
#[derive(Debug, Clone)]
pub struct Query<E: Entity> {
    filters: Vec<Filter<E::Field>>,
    order_by: Vec<OrderBy<E::Field>>,
    includes: Vec<E::Relation>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl<E: Entity> Default for Query<E> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            order_by: Vec::new(),
            includes: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

impl<E: Entity> Query<E> {
    /// Matches every row
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches the row with the given primary key
    pub fn by_id(id: i64) -> Self {
        Self::new().filter(Filter::eq(E::ID_FIELD, id))
    }

    pub fn filter(mut self, filter: Filter<E::Field>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: E::Field, order: SortOrder) -> Self {
        self.order_by.push(OrderBy { field, order });
        self
    }

    /// Eager-loads a relation; repeated includes are collapsed
    pub fn include(mut self, relation: E::Relation) -> Self {
        if !self.includes.contains(&relation) {
            self.includes.push(relation);
        }
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn filters(&self) -> &[Filter<E::Field>] {
        &self.filters
    }

    pub fn ordering(&self) -> &[OrderBy<E::Field>] {
        &self.order_by
    }

    pub fn includes(&self) -> &[E::Relation] {
        &self.includes
    }

    pub fn includes_relation(&self, relation: E::Relation) -> bool {
        self.includes.contains(&relation)
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Whether every filter accepts the entity
    pub fn matches(&self, entity: &E) -> bool {
        matches_all(&self.filters, entity)
    }

    /// Compares two entities by this query's ordering, falling back to the key
    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        for term in &self.order_by {
            let ord = a
                .value(term.field)
                .compare(&b.value(term.field))
                .unwrap_or(Ordering::Equal);
            let ord = match term.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        a.id().cmp(&b.id())
    }

    /// Evaluates the whole query over rows held in memory
    pub fn apply<'r, I>(&self, rows: I) -> Vec<E>
    where
        I: IntoIterator<Item = &'r E>,
    {
        let mut selected: Vec<E> = rows.into_iter().filter(|e| self.matches(e)).cloned().collect();
        selected.sort_by(|a, b| self.compare(a, b));

        let offset = usize::try_from(self.offset.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = self
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        selected.into_iter().skip(offset).take(limit).collect()
    }
}

/// Whether every filter accepts the entity
pub fn matches_all<E: Entity>(filters: &[Filter<E::Field>], entity: &E) -> bool {
    filters.iter().all(|f| f.matches(&entity.value(f.field())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Country, CountryField, CountryRelation, Hotel, HotelField};

    fn hotels() -> Vec<Hotel> {
        vec![
            Hotel::new("Sandals Resort and Spa", "Negril", 4.5, 1).with_id(1),
            Hotel::new("Comfort Suites", "George Town", 4.3, 3).with_id(2),
            Hotel::new("Grand Palladium", "Nassau", 4.0, 2).with_id(3),
        ]
    }

    #[test]
    fn test_filter_matches() {
        assert!(Filter::eq(HotelField::Id, 2).matches(&Value::Int(2)));
        assert!(Filter::gt(HotelField::Rating, 4.0).matches(&Value::Float(4.3)));
        assert!(!Filter::gt(HotelField::Rating, 4.0).matches(&Value::Float(4.0)));
        assert!(Filter::ge(HotelField::Rating, 4.0).matches(&Value::Float(4.0)));
        assert!(Filter::contains(HotelField::Name, "resort").matches(&Value::from("Sandals Resort")));
        assert!(Filter::is_in(HotelField::CountryId, [1, 3]).matches(&Value::Int(3)));
        assert!(Filter::ne(HotelField::Name, "x").matches(&Value::from("y")));
    }

    #[test]
    fn test_apply_filters_orders_and_windows() {
        let rows = hotels();

        let query = Query::<Hotel>::new()
            .filter(Filter::ge(HotelField::Rating, 4.1))
            .order_by(HotelField::Rating, SortOrder::Desc);
        let result = query.apply(&rows);
        assert_eq!(result.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 2]);

        let page = Query::<Hotel>::new()
            .order_by(HotelField::Name, SortOrder::Asc)
            .with_offset(1)
            .with_limit(1)
            .apply(&rows);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Grand Palladium");
    }

    #[test]
    fn test_default_order_is_primary_key() {
        let mut rows = hotels();
        rows.reverse();
        let result = Query::<Hotel>::new().apply(&rows);
        assert_eq!(result.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_by_id_and_includes() {
        let query = Query::<Country>::by_id(4)
            .include(CountryRelation::Hotels)
            .include(CountryRelation::Hotels);

        assert_eq!(query.filters(), &[Filter::Eq(CountryField::Id, Value::Int(4))]);
        assert_eq!(query.includes().len(), 1);
        assert!(query.includes_relation(CountryRelation::Hotels));
        assert!(query.matches(&Country::new("Jamaica", "JM").with_id(4)));
        assert!(!query.matches(&Country::new("Bahamas", "BS").with_id(5)));
    }
}
