//! Repository configuration.

use crate::error::{RepoError, RepoResult};

/// Environment variable holding the schema name.
pub const SCHEMA_ENV: &str = "PGREPO_SCHEMA";

/// Environment variable holding the table name.
pub const TABLE_ENV: &str = "PGREPO_TABLE";

/// Schema used when none is configured.
pub const DEFAULT_SCHEMA: &str = "public";

/// Where a repository's table lives.
///
/// The table name is rendered through the identifier rule (`users` ->
/// `"Users"`); the schema is emitted as-is and must be a plain identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Schema name, emitted unquoted.
    pub schema: String,
    /// Table name, emitted as a quoted identifier.
    pub table: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            schema: DEFAULT_SCHEMA.to_string(),
            table: String::new(),
        }
    }
}

impl RepositoryConfig {
    /// Create a configuration for `table` in the default schema.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Set the schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Set the table.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Read `PGREPO_SCHEMA` (default `public`) and `PGREPO_TABLE`.
    pub fn from_env() -> RepoResult<Self> {
        let schema = std::env::var(SCHEMA_ENV).unwrap_or_else(|_| DEFAULT_SCHEMA.to_string());
        let table = std::env::var(TABLE_ENV)
            .map_err(|_| RepoError::configuration(format!("{TABLE_ENV} is not set")))?;
        let config = Self { schema, table };
        config.validate()?;
        Ok(config)
    }

    /// Check the schema is a plain identifier and the table name is usable.
    pub fn validate(&self) -> RepoResult<()> {
        if !is_plain_ident(&self.schema) {
            return Err(RepoError::configuration(format!(
                "invalid schema name '{}' (expected [A-Za-z_][A-Za-z0-9_$]*)",
                self.schema
            )));
        }
        if self.table.is_empty() {
            return Err(RepoError::configuration("table name cannot be empty"));
        }
        if self.table.contains('\0') {
            return Err(RepoError::configuration(
                "table name cannot contain NUL character",
            ));
        }
        Ok(())
    }
}

fn is_plain_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
