//! Domain layer containing business entities and the metadata the generic
//! repository needs to query them.

pub mod entities;
pub mod entity;

pub use entities::*;
pub use entity::{Entity, EntityField, EntityKind, Record, Value};
