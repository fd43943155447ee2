//! Error types for pgrepo

use thiserror::Error;

/// Result type alias for pgrepo operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Error types for statement construction, parameter binding and execution
#[derive(Debug, Error)]
pub enum RepoError {
    /// Invalid repository configuration (schema, table, environment)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A clause was assembled from an empty column/key list
    #[error("Cannot build {0}: no columns to join")]
    EmptyJoin(&'static str),

    /// An empty name was passed where a column or parameter name is required
    #[error("Identifier cannot be empty")]
    EmptyIdentifier,

    /// The same parameter name appears more than once in a request
    #[error("Duplicate parameter: @{0}")]
    DuplicateParameter(String),

    /// A statement references a parameter that was not bound
    #[error("Missing parameter: @{0}")]
    MissingParameter(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// More rows than expected
    #[error("Expected {expected} row(s), got {got}")]
    TooManyRows { expected: usize, got: usize },

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// The blocking bridge could not drive the future to completion
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl RepoError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a too-many-rows error
    pub fn too_many_rows(expected: usize, got: usize) -> Self {
        Self::TooManyRows { expected, got }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Parse a tokio_postgres error into a more specific RepoError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}
