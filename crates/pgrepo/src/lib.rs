//! # pgrepo
//!
//! A typed PostgreSQL repository base.
//!
//! ## Features
//!
//! - **Pre-built CRUD templates**: SELECT/INSERT/DELETE/UPDATE derived once per entity
//! - **Named parameters**: statements use `@Name` placeholders bound from a [`Request`]
//! - **Explicit parameter types**: every value carries a [`DbType`] tag; NULLs are typed too
//! - **Compile-time entity descriptors**: `#[derive(Entity)]` lists columns and primary keys
//! - **Async and blocking**: every execute/query operation has a `blocking_*` twin
//!
//! ## Example
//!
//! ```ignore
//! use pgrepo::{Entity, Repository, Request};
//!
//! #[derive(Entity)]
//! struct User {
//!     #[orm(id)]
//!     id: uuid::Uuid,
//!     name: String,
//!     age: i32,
//! }
//!
//! let repo = Repository::<User>::new(&client, "public", "users")?;
//! assert_eq!(repo.select_sql(), r#"SELECT "Id", "Name", "Age" FROM public."Users""#);
//!
//! let user = repo
//!     .query_single(
//!         &repo.select_where(&[("id".into(), user_id.into())])?,
//!         &Request::new().with("id", user_id),
//!     )
//!     .await?;
//! ```

pub mod blocking;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod ident;
pub mod named;
pub mod param;
pub mod repository;
pub mod row;
pub mod statement;
pub mod value;

pub use client::GenericClient;
pub use config::RepositoryConfig;
pub use entity::{Column, Entity};
pub use error::{RepoError, RepoResult};
pub use named::NamedSql;
pub use param::{BoundParam, BoundParams, Request, create_parameters};
pub use repository::Repository;
pub use row::{FromRow, RowExt};
pub use statement::{Templates, build_where_clause};
pub use value::{DbType, DbValue, ToDbValue};

#[cfg(feature = "derive")]
pub use pgrepo_derive::Entity;

// Re-exported for use by derive macros
#[doc(hidden)]
pub use tokio_postgres;
