//! Renders generic-repository queries as MySQL statements.
//!
//! Every value reaches the server as a bound parameter. Column and table
//! names come from the entity metadata, never from input.

use sqlx::{MySql, QueryBuilder};

use hotel_core::domain::{Entity, EntityField, Value};
use hotel_core::repositories::{Filter, OrderBy, Query};

/// MySQL has no "no limit" form of `OFFSET`
const UNBOUNDED_LIMIT: u64 = u64::MAX;

/// `SELECT <columns> FROM <table>` with the query's filters, ordering and window
pub(crate) fn select<E: Entity>(query: &Query<E>) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", columns::<E>(), E::TABLE));
    push_filters(&mut builder, query.filters());
    push_ordering::<E>(&mut builder, query.ordering());
    push_window(&mut builder, query.limit(), query.offset());
    builder
}

/// `SELECT COUNT(*)` over the rows matching `filters`
pub(crate) fn count<E: Entity>(filters: &[Filter<E::Field>]) -> QueryBuilder<'static, MySql> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", E::TABLE));
    push_filters(&mut builder, filters);
    builder
}

fn columns<E: Entity>() -> String {
    E::fields()
        .iter()
        .map(|f| f.column())
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_filters<F: EntityField>(builder: &mut QueryBuilder<'static, MySql>, filters: &[Filter<F>]) {
    for (i, filter) in filters.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        let column = filter.field().column();

        match filter {
            Filter::Eq(_, v) => push_comparison(builder, column, "=", v),
            Filter::Ne(_, v) => push_comparison(builder, column, "<>", v),
            Filter::Gt(_, v) => push_comparison(builder, column, ">", v),
            Filter::Ge(_, v) => push_comparison(builder, column, ">=", v),
            Filter::Lt(_, v) => push_comparison(builder, column, "<", v),
            Filter::Le(_, v) => push_comparison(builder, column, "<=", v),
            Filter::Contains(_, needle) => {
                builder.push(format!("LOWER({}) LIKE ", column));
                builder.push_bind(format!("%{}%", escape_like(&needle.to_lowercase())));
                builder.push(" ESCAPE '\\\\'");
            }
            Filter::In(_, values) if values.is_empty() => {
                builder.push("1 = 0");
            }
            Filter::In(_, values) => {
                builder.push(format!("{} IN (", column));
                let mut separated = builder.separated(", ");
                for value in values {
                    match value.clone() {
                        Value::Int(v) => separated.push_bind(v),
                        Value::Float(v) => separated.push_bind(v),
                        Value::Text(v) => separated.push_bind(v),
                    };
                }
                separated.push_unseparated(")");
            }
        }
    }
}

fn push_comparison(builder: &mut QueryBuilder<'static, MySql>, column: &str, op: &str, value: &Value) {
    builder.push(format!("{} {} ", column, op));
    push_value(builder, value);
}

fn push_value(builder: &mut QueryBuilder<'static, MySql>, value: &Value) {
    match value.clone() {
        Value::Int(v) => builder.push_bind(v),
        Value::Float(v) => builder.push_bind(v),
        Value::Text(v) => builder.push_bind(v),
    };
}

fn push_ordering<E: Entity>(builder: &mut QueryBuilder<'static, MySql>, ordering: &[OrderBy<E::Field>]) {
    let mut terms: Vec<String> = ordering
        .iter()
        .map(|o| format!("{} {}", o.field.column(), o.order))
        .collect();

    // Primary key breaks ties so paging is stable
    if !ordering.iter().any(|o| o.field == E::ID_FIELD) {
        terms.push(format!("{} ASC", E::ID_FIELD.column()));
    }
    builder.push(" ORDER BY ");
    builder.push(terms.join(", "));
}

fn push_window(builder: &mut QueryBuilder<'static, MySql>, limit: Option<u64>, offset: Option<u64>) {
    match (limit, offset) {
        (None, None) => {}
        (limit, offset) => {
            builder.push(" LIMIT ");
            builder.push_bind(limit.unwrap_or(UNBOUNDED_LIMIT));
            if let Some(offset) = offset {
                builder.push(" OFFSET ");
                builder.push_bind(offset);
            }
        }
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_core::domain::{Country, CountryField, Hotel, HotelField};
    use hotel_shared::SortOrder;

    #[test]
    fn test_plain_select_orders_by_key() {
        let builder = select(&Query::<Country>::new());
        assert_eq!(
            builder.sql(),
            "SELECT id, name, short_name FROM countries ORDER BY id ASC"
        );
    }

    #[test]
    fn test_filters_are_bound() {
        let query = Query::<Hotel>::new()
            .filter(Filter::ge(HotelField::Rating, 4.0))
            .filter(Filter::eq(HotelField::CountryId, 2))
            .order_by(HotelField::Rating, SortOrder::Desc)
            .with_offset(10)
            .with_limit(5);

        assert_eq!(
            select(&query).sql(),
            "SELECT id, name, address, rating, country_id FROM hotels \
             WHERE rating >= ? AND country_id = ? \
             ORDER BY rating DESC, id ASC LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn test_contains_and_in() {
        let query = Query::<Country>::new()
            .filter(Filter::contains(CountryField::Name, "Isl"))
            .filter(Filter::is_in(CountryField::Id, [1, 3]));

        assert_eq!(
            select(&query).sql(),
            "SELECT id, name, short_name FROM countries \
             WHERE LOWER(name) LIKE ? ESCAPE '\\\\' AND id IN (?, ?) ORDER BY id ASC"
        );
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        let filters = [Filter::is_in(CountryField::Id, Vec::<i64>::new())];
        assert_eq!(count::<Country>(&filters).sql(), "SELECT COUNT(*) FROM countries WHERE 1 = 0");
    }

    #[test]
    fn test_offset_without_limit() {
        let query = Query::<Country>::new().order_by(CountryField::Id, SortOrder::Desc).with_offset(2);
        assert_eq!(
            select(&query).sql(),
            "SELECT id, name, short_name FROM countries ORDER BY id DESC LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
