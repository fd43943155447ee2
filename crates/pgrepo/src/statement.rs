//! Canonical CRUD statement templates.
//!
//! For an entity with columns `id` (primary key), `name`, `age` stored in
//! `public.users`:
//!
//! ```text
//! SELECT "Id", "Name", "Age" FROM public."Users"
//! INSERT INTO public."Users" ("Id", "Name", "Age") VALUES (@Id, @Name, @Age);
//! DELETE FROM public."Users" WHERE "Id" = @Id;
//! UPDATE public."Users" SET "Name" = @Name, "Age" = @Age WHERE "Id" = @Id;
//! ```
//!
//! The SELECT template carries no WHERE clause and no terminator so a clause
//! from [`build_where_clause`] can be appended.

use crate::error::RepoResult;
use crate::ident::{column_equals, join_with_delimiter, to_db_identifier, to_param_pointer};

pub const SELECT: &str = "SELECT";
pub const INSERT_INTO: &str = "INSERT INTO";
pub const DELETE: &str = "DELETE";
pub const UPDATE: &str = "UPDATE";
pub const FROM: &str = "FROM";
pub const WHERE: &str = "WHERE";
pub const SET: &str = "SET";
pub const VALUES: &str = "VALUES";
pub const AND: &str = "AND";

const LIST_DELIMITER: &str = ", ";
const AND_DELIMITER: &str = " AND ";

/// The four statement templates of one table, built once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub select: String,
    pub insert: String,
    pub delete: String,
    pub update: String,
}

impl Templates {
    /// Build all four templates.
    ///
    /// `columns` is every column in declaration order, `primary_keys` the key
    /// columns and `value_columns` the rest. Fails if any of them is empty.
    pub fn build(
        table: &str,
        columns: &[&str],
        primary_keys: &[&str],
        value_columns: &[&str],
    ) -> RepoResult<Self> {
        Ok(Self {
            select: select_template(table, columns)?,
            insert: insert_template(table, columns)?,
            delete: delete_template(table, primary_keys)?,
            update: update_template(table, value_columns, primary_keys)?,
        })
    }
}

/// `schema."Table"`; the schema is emitted as given.
pub fn format_table_name(schema: &str, table: &str) -> RepoResult<String> {
    Ok(format!("{}.{}", schema, to_db_identifier(table)?))
}

/// `SELECT "C1", "C2" FROM table`
pub fn select_template(table: &str, columns: &[&str]) -> RepoResult<String> {
    Ok(format!(
        "{SELECT} {} {FROM} {table}",
        column_list(columns, "SELECT column list")?
    ))
}

/// `INSERT INTO table ("C1", "C2") VALUES (@C1, @C2);`
pub fn insert_template(table: &str, columns: &[&str]) -> RepoResult<String> {
    let params = columns
        .iter()
        .map(|c| to_param_pointer(c))
        .collect::<RepoResult<Vec<_>>>()?;

    Ok(format!(
        "{INSERT_INTO} {table} ({}) {VALUES} ({});",
        column_list(columns, "INSERT column list")?,
        join_with_delimiter(&params, LIST_DELIMITER, "INSERT value list")?
    ))
}

/// `DELETE FROM table WHERE "K1" = @K1 AND "K2" = @K2;`
pub fn delete_template(table: &str, primary_keys: &[&str]) -> RepoResult<String> {
    Ok(format!(
        "{DELETE} {FROM} {table} {WHERE} {};",
        equals_list(primary_keys, AND_DELIMITER, "DELETE key predicate")?
    ))
}

/// `UPDATE table SET "V1" = @V1, "V2" = @V2 WHERE "K1" = @K1;`
pub fn update_template(
    table: &str,
    value_columns: &[&str],
    primary_keys: &[&str],
) -> RepoResult<String> {
    Ok(format!(
        "{UPDATE} {table} {SET} {} {WHERE} {};",
        equals_list(value_columns, LIST_DELIMITER, "UPDATE SET list")?,
        equals_list(primary_keys, AND_DELIMITER, "UPDATE key predicate")?
    ))
}

/// `WHERE "C1" = @C1 AND "C2" = @C2;` from the names of ad-hoc arguments.
///
/// Fails on an empty list rather than rendering `WHERE ;`.
pub fn build_where_clause<I, S>(names: I) -> RepoResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fragments = names
        .into_iter()
        .map(|n| column_equals(n.as_ref()))
        .collect::<RepoResult<Vec<_>>>()?;

    Ok(format!(
        "{WHERE} {};",
        join_with_delimiter(&fragments, AND_DELIMITER, "WHERE clause")?
    ))
}

fn column_list(columns: &[&str], what: &'static str) -> RepoResult<String> {
    let idents = columns
        .iter()
        .map(|c| to_db_identifier(c))
        .collect::<RepoResult<Vec<_>>>()?;
    join_with_delimiter(&idents, LIST_DELIMITER, what)
}

fn equals_list(columns: &[&str], delimiter: &str, what: &'static str) -> RepoResult<String> {
    let fragments = columns
        .iter()
        .map(|c| column_equals(c))
        .collect::<RepoResult<Vec<_>>>()?;
    join_with_delimiter(&fragments, delimiter, what)
}

#[cfg(test)]
mod tests;
