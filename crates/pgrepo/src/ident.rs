//! Identifier and clause formatting.
//!
//! Every column and parameter name goes through one normalization rule,
//! [`upper_case_first_char`], so a field `id` maps to the column `"Id"` and the
//! parameter `@Id`. A statement template and a parameter set built from the same
//! source name are therefore always compatible.
//!
//! # Example
//! ```ignore
//! use pgrepo::ident;
//!
//! assert_eq!(ident::to_db_identifier("id")?, r#""Id""#);
//! assert_eq!(ident::to_param_pointer("id")?, "@Id");
//! assert_eq!(ident::column_equals("name")?, r#""Name" = @Name"#);
//! # Ok::<(), pgrepo::RepoError>(())
//! ```

use crate::error::{RepoError, RepoResult};

/// Quoted-identifier delimiter.
pub const QUOTE: char = '"';

/// Named parameter marker.
pub const PARAM_MARKER: char = '@';

/// Upper-case the first character of `name`, leaving the rest unchanged.
pub fn upper_case_first_char(name: &str) -> RepoResult<String> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(RepoError::EmptyIdentifier)?;

    let mut out = String::with_capacity(name.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    Ok(out)
}

/// Render `name` as a quoted database identifier: `id` -> `"Id"`.
///
/// Embedded quotes are doubled.
pub fn to_db_identifier(name: &str) -> RepoResult<String> {
    let normalized = upper_case_first_char(name)?;

    let mut out = String::with_capacity(normalized.len() + 2);
    out.push(QUOTE);
    for ch in normalized.chars() {
        if ch == QUOTE {
            out.push(QUOTE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
    Ok(out)
}

/// Render `name` as a named parameter reference: `id` -> `@Id`.
pub fn to_param_pointer(name: &str) -> RepoResult<String> {
    let normalized = upper_case_first_char(name)?;

    let mut out = String::with_capacity(normalized.len() + 1);
    out.push(PARAM_MARKER);
    out.push_str(&normalized);
    Ok(out)
}

/// Join `items` with `delimiter`.
///
/// An empty sequence is an error: no clause may be rendered from zero columns.
/// `what` names the clause for the error message.
pub fn join_with_delimiter<I, S>(items: I, delimiter: &str, what: &'static str) -> RepoResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut iter = items.into_iter();
    let first = iter.next().ok_or(RepoError::EmptyJoin(what))?;

    let mut out = first.as_ref().to_string();
    for item in iter {
        out.push_str(delimiter);
        out.push_str(item.as_ref());
    }
    Ok(out)
}

/// `"Name" = @Name`, the fragment shared by WHERE and SET clauses.
pub fn column_equals(name: &str) -> RepoResult<String> {
    Ok(format!(
        "{} = {}",
        to_db_identifier(name)?,
        to_param_pointer(name)?
    ))
}
