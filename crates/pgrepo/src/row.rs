//! Row mapping traits

use crate::error::{RepoError, RepoResult};
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct.
///
/// Implemented by `#[derive(Entity)]`, which reads each field from its
/// normalized column name (`id` -> `"Id"`).
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> RepoResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning RepoError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> RepoResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> RepoResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| RepoError::decode(column, e.to_string()))
    }
}
