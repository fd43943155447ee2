//! Derive macros for pgrepo
//!
//! Provides `#[derive(Entity)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod entity;
mod sql_ident;

/// Derive `Entity` (and `FromRow`) for a struct.
///
/// # Example
///
/// ```ignore
/// use pgrepo::Entity;
///
/// #[derive(Entity)]
/// struct User {
///     #[orm(id)]
///     id: uuid::Uuid,
///     name: String,
///     #[orm(column = "emailAddress")]
///     email: Option<String>,
/// }
/// ```
///
/// # Generated
///
/// - `Entity::COLUMNS` - every field as a column, in declaration order
/// - `Entity::to_request` - the fields as request arguments
/// - `FromRow` - reads each field from its normalized column (`id` -> `"Id"`)
///
/// # Attributes
///
/// - `#[orm(id)]` / `#[orm(primary_key)]` - Mark field as (part of) the primary key
/// - `#[orm(column = "name")]` - Map field to a different column name
#[proc_macro_derive(Entity, attributes(orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
