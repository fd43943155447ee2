//! `@Name` placeholder rewriting.
//!
//! Templates and hand-written statements reference parameters by name
//! (`WHERE "Id" = @Id`). The PostgreSQL wire protocol only knows positional
//! placeholders, so before execution the statement is rewritten to `$1, $2, ...`
//! and the bound parameters are arranged in placeholder order.
//!
//! Text inside single-quoted literals (including `E'...'` escape strings),
//! double-quoted identifiers and comments is left untouched. Dollar-quoted
//! bodies are not recognized.
//!
//! Placeholder names get the same first-character upper-casing as argument
//! names, so `@name` and `@Name` both bind the argument `name`.

use crate::error::{RepoError, RepoResult};
use crate::param::BoundParams;
use tokio_postgres::types::{ToSql, Type};

/// A statement with its named placeholders resolved to positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSql {
    sql: String,
    names: Vec<String>,
}

impl NamedSql {
    /// Rewrite `@Name` placeholders to `$n`.
    ///
    /// The first occurrence of a name assigns its index; later occurrences reuse it.
    /// An `@` directly after another `@` is an operator, not a placeholder.
    pub fn parse(sql: &str) -> Self {
        let mut out = String::with_capacity(sql.len());
        let mut names: Vec<String> = Vec::new();
        let mut chars = sql.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\'' | '"' => {
                    let backslash_escapes = c == '\'' && is_escape_string_prefix(&out);
                    out.push(c);
                    while let Some(ch) = chars.next() {
                        out.push(ch);
                        if backslash_escapes && ch == '\\' {
                            if let Some(escaped) = chars.next() {
                                out.push(escaped);
                            }
                            continue;
                        }
                        if ch == c {
                            // Doubled delimiter is an escape, not the end.
                            if chars.peek() == Some(&c) {
                                out.push(c);
                                chars.next();
                            } else {
                                break;
                            }
                        }
                    }
                }
                '-' if chars.peek() == Some(&'-') => {
                    out.push(c);
                    for ch in chars.by_ref() {
                        out.push(ch);
                        if ch == '\n' {
                            break;
                        }
                    }
                }
                '/' if chars.peek() == Some(&'*') => {
                    out.push(c);
                    out.push('*');
                    chars.next();
                    let mut prev = '\0';
                    for ch in chars.by_ref() {
                        out.push(ch);
                        if prev == '*' && ch == '/' {
                            break;
                        }
                        prev = ch;
                    }
                }
                '@' if !out.ends_with('@')
                    && chars.peek().is_some_and(|n| *n == '_' || n.is_ascii_alphabetic()) =>
                {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if n == '_' || n.is_ascii_alphanumeric() {
                            name.push(n);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    if let Some(first) = name.get_mut(..1) {
                        first.make_ascii_uppercase();
                    }
                    let index = match names.iter().position(|n| *n == name) {
                        Some(i) => i + 1,
                        None => {
                            names.push(name);
                            names.len()
                        }
                    };
                    out.push('$');
                    out.push_str(&index.to_string());
                }
                _ => out.push(c),
            }
        }

        Self { sql: out, names }
    }

    /// The rewritten statement.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Placeholder names in positional order (`names()[0]` is `$1`).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Arrange bound parameters in placeholder order, each with its declared type.
    ///
    /// Every placeholder must have a bound value. Bound values the statement
    /// does not reference are ignored.
    pub fn bind<'p>(
        &self,
        params: Option<&'p BoundParams>,
    ) -> RepoResult<Vec<(&'p (dyn ToSql + Sync), Type)>> {
        let mut args = Vec::with_capacity(self.names.len());
        for name in &self.names {
            let param = params
                .and_then(|p| p.get(name))
                .ok_or_else(|| RepoError::MissingParameter(name.clone()))?;
            args.push((&param.value as &(dyn ToSql + Sync), param.db_type.pg_type()));
        }

        #[cfg(feature = "tracing")]
        if let Some(params) = params {
            for unused in params.names().filter(|n| !self.names.iter().any(|m| m == n)) {
                tracing::trace!(parameter = unused, "bound parameter not referenced by statement");
            }
        }

        Ok(args)
    }
}

// `E'...'` / `e'...'`, but not a quote after an identifier ending in `e`.
fn is_escape_string_prefix(out: &str) -> bool {
    let mut rev = out.chars().rev();
    matches!(rev.next(), Some('E' | 'e'))
        && !rev.next().is_some_and(|p| p == '_' || p.is_alphanumeric())
}
