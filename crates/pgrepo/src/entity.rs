//! Entity descriptors.

use crate::param::Request;
use crate::row::FromRow;

/// One column of an entity, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Source name before normalization (`id`, rendered as `"Id"` / `@Id`).
    pub name: &'static str,
    /// Part of the row's unique identifier.
    pub primary_key: bool,
}

impl Column {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            primary_key: false,
        }
    }

    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            primary_key: true,
        }
    }
}

/// A type stored as one row of one table.
///
/// Usually derived:
///
/// ```ignore
/// use pgrepo::Entity;
///
/// #[derive(Entity)]
/// struct User {
///     #[orm(id)]
///     id: uuid::Uuid,
///     name: String,
/// }
/// ```
pub trait Entity: FromRow + Send + Sync + 'static {
    /// All columns in declaration order. Names are unique.
    const COLUMNS: &'static [Column];

    /// The entity's fields as request arguments, one per column, in column order.
    fn to_request(&self) -> Request;

    /// Column names in declaration order.
    fn column_names() -> impl Iterator<Item = &'static str> {
        Self::COLUMNS.iter().map(|c| c.name)
    }

    /// Primary-key column names, in declaration order.
    fn primary_key_names() -> impl Iterator<Item = &'static str> {
        Self::COLUMNS
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name)
    }

    /// Non-key column names, in declaration order.
    fn value_column_names() -> impl Iterator<Item = &'static str> {
        Self::COLUMNS
            .iter()
            .filter(|c| !c.primary_key)
            .map(|c| c.name)
    }
}
