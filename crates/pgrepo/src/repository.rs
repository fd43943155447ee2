//! Entity-typed repository base.
//!
//! A [`Repository`] borrows a connection, builds the four CRUD templates for its
//! entity once, and executes hand-written or template SQL with `@Name`
//! parameters taken from a [`Request`].
//!
//! # Example
//!
//! ```ignore
//! use pgrepo::{Entity, Repository, Request};
//!
//! #[derive(Entity)]
//! struct User {
//!     #[orm(id)]
//!     id: uuid::Uuid,
//!     name: String,
//! }
//!
//! let repo = Repository::<User>::new(&client, "app", "users")?;
//! let affected = repo
//!     .execute_command(
//!         repo.update_sql(),
//!         &Request::new().with("name", "Alice").with("id", user_id),
//!     )
//!     .await?;
//! ```
//!
//! Repositories for a specific table usually wrap the base and add their own
//! filters:
//!
//! ```ignore
//! struct UserRepository<'c> {
//!     base: Repository<'c, User>,
//! }
//!
//! impl UserRepository<'_> {
//!     async fn by_name(&self, name: &str) -> RepoResult<Vec<User>> {
//!         let request = Request::new().with("name", name);
//!         let sql = self.base.select_where(request.properties())?;
//!         self.base.query(&sql, &request).await
//!     }
//! }
//! ```

use crate::blocking::run_blocking;
use crate::client::GenericClient;
use crate::config::RepositoryConfig;
use crate::entity::Entity;
use crate::error::{RepoError, RepoResult};
use crate::named::NamedSql;
use crate::param::Request;
use crate::statement::{self, Templates, format_table_name};
use crate::value::DbValue;
use std::fmt;
use std::marker::PhantomData;
use tokio_postgres::Row;

/// Statement templates and execution helpers for entity `T` over connection `C`.
///
/// The connection is borrowed for the repository's lifetime; opening, closing
/// and pooling it stay with the caller. Templates are immutable after
/// construction.
pub struct Repository<'c, T, C = tokio_postgres::Client>
where
    T: Entity,
    C: GenericClient,
{
    conn: &'c C,
    table: String,
    templates: Templates,
    _entity: PhantomData<fn() -> T>,
}

impl<T, C> fmt::Debug for Repository<'_, T, C>
where
    T: Entity,
    C: GenericClient,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("table", &self.table)
            .field("templates", &self.templates)
            .finish_non_exhaustive()
    }
}

impl<'c, T, C> Repository<'c, T, C>
where
    T: Entity,
    C: GenericClient,
{
    /// Build the repository for `schema.table`.
    ///
    /// Fails if the schema or table name is invalid, or if `T` has no columns,
    /// no primary-key column, or no non-key column.
    pub fn new(conn: &'c C, schema: &str, table: &str) -> RepoResult<Self> {
        Self::with_config(conn, &RepositoryConfig::new(table).schema(schema))
    }

    /// Build the repository from a [`RepositoryConfig`].
    pub fn with_config(conn: &'c C, config: &RepositoryConfig) -> RepoResult<Self> {
        config.validate()?;

        let table = format_table_name(&config.schema, &config.table)?;
        let columns: Vec<&str> = T::column_names().collect();
        let primary_keys: Vec<&str> = T::primary_key_names().collect();
        let value_columns: Vec<&str> = T::value_column_names().collect();

        let templates = Templates::build(&table, &columns, &primary_keys, &value_columns)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            table = %table,
            columns = columns.len(),
            primary_keys = primary_keys.len(),
            "built statement templates"
        );

        Ok(Self {
            conn,
            table,
            templates,
            _entity: PhantomData,
        })
    }

    /// The borrowed connection.
    pub fn connection(&self) -> &'c C {
        self.conn
    }

    /// `schema."Table"` as used in every template.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// `SELECT <all columns> FROM <table>`, without WHERE or terminator.
    pub fn select_sql(&self) -> &str {
        &self.templates.select
    }

    /// `INSERT INTO <table> (<all columns>) VALUES (<all params>);`
    pub fn insert_sql(&self) -> &str {
        &self.templates.insert
    }

    /// `DELETE FROM <table> WHERE <keys>;`
    pub fn delete_sql(&self) -> &str {
        &self.templates.delete
    }

    /// `UPDATE <table> SET <non-keys> WHERE <keys>;`
    pub fn update_sql(&self) -> &str {
        &self.templates.update
    }

    /// `WHERE "C1" = @C1 AND ...;` from ad-hoc arguments. Fails if empty.
    pub fn build_where_clause(properties: &[(String, DbValue)]) -> RepoResult<String> {
        statement::build_where_clause(properties.iter().map(|(name, _)| name))
    }

    /// The SELECT template followed by a WHERE clause over `properties`.
    pub fn select_where(&self, properties: &[(String, DbValue)]) -> RepoResult<String> {
        Ok(format!(
            "{} {}",
            self.templates.select,
            Self::build_where_clause(properties)?
        ))
    }

    /// Execute `sql` and map exactly one row.
    ///
    /// No row is [`RepoError::NotFound`]; more than one is
    /// [`RepoError::TooManyRows`].
    pub async fn query_single(&self, sql: &str, request: &Request) -> RepoResult<T> {
        let rows = self.fetch_rows(sql, request).await?;
        match rows.as_slice() {
            [] => Err(RepoError::not_found(format!(
                "Expected 1 row from {}, got 0",
                self.table
            ))),
            [row] => T::from_row(row),
            _ => Err(RepoError::too_many_rows(1, rows.len())),
        }
    }

    /// Execute `sql` and map every returned row.
    pub async fn query(&self, sql: &str, request: &Request) -> RepoResult<Vec<T>> {
        let rows = self.fetch_rows(sql, request).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute `sql` and return the number of affected rows.
    pub async fn execute_command(&self, sql: &str, request: &Request) -> RepoResult<u64> {
        let params = request.bind()?;
        let named = NamedSql::parse(sql);
        let args = named.bind(params.as_ref())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(sql = named.sql(), params = args.len(), "execute");

        self.conn.execute_typed(named.sql(), &args).await
    }

    async fn fetch_rows(&self, sql: &str, request: &Request) -> RepoResult<Vec<Row>> {
        let params = request.bind()?;
        let named = NamedSql::parse(sql);
        let args = named.bind(params.as_ref())?;

        #[cfg(feature = "tracing")]
        tracing::debug!(sql = named.sql(), params = args.len(), "query");

        self.conn.query_typed(named.sql(), &args).await
    }

    /// Blocking [`Repository::query_single`].
    pub fn blocking_query_single(&self, sql: &str, request: &Request) -> RepoResult<T> {
        run_blocking(|| self.query_single(sql, request))
    }

    /// Blocking [`Repository::query`].
    pub fn blocking_query(&self, sql: &str, request: &Request) -> RepoResult<Vec<T>> {
        run_blocking(|| self.query(sql, request))
    }

    /// Blocking [`Repository::execute_command`].
    pub fn blocking_execute_command(&self, sql: &str, request: &Request) -> RepoResult<u64> {
        run_blocking(|| self.execute_command(sql, request))
    }

    /// Every row of the table.
    pub async fn find_all(&self) -> RepoResult<Vec<T>> {
        self.query(&self.templates.select, &Request::new()).await
    }

    /// Rows whose columns equal every argument of `request`.
    pub async fn find_where(&self, request: &Request) -> RepoResult<Vec<T>> {
        let sql = self.select_where(request.properties())?;
        self.query(&sql, request).await
    }

    /// Insert `entity` with the INSERT template.
    pub async fn insert(&self, entity: &T) -> RepoResult<u64> {
        self.execute_command(&self.templates.insert, &entity.to_request())
            .await
    }

    /// Update the row matching `entity`'s primary key with the UPDATE template.
    pub async fn update(&self, entity: &T) -> RepoResult<u64> {
        self.execute_command(&self.templates.update, &entity.to_request())
            .await
    }

    /// Delete the row matching `entity`'s primary key with the DELETE template.
    pub async fn delete(&self, entity: &T) -> RepoResult<u64> {
        self.execute_command(&self.templates.delete, &entity.to_request())
            .await
    }
}
