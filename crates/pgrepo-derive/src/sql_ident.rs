use std::collections::HashSet;

use proc_macro2::Span;
use syn::{Error, Result};

pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub(crate) fn parse_sql_ident_with_span(s: &str, span: Span, what: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::new(span, format!("{what} must not be empty")));
    }
    if !is_valid_sql_ident(s) {
        return Err(Error::new(
            span,
            format!("{what} must be a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_]*)"),
        ));
    }
    Ok(s.to_string())
}

/// Same rule the runtime applies to column and parameter names.
pub(crate) fn upper_case_first_char(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Tracks normalized column names to reject collisions such as `id` / `Id`.
#[derive(Default)]
pub(crate) struct ColumnSet {
    seen: HashSet<String>,
}

impl ColumnSet {
    pub(crate) fn insert(&mut self, column: &str, span: Span) -> Result<()> {
        let normalized = upper_case_first_char(column);
        if !self.seen.insert(normalized.clone()) {
            return Err(Error::new(
                span,
                format!("duplicate column '{normalized}'"),
            ));
        }
        Ok(())
    }
}
