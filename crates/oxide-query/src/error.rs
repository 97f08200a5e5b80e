//! Error types for statement execution.

use oxide_query_core::TokenError;

/// Errors that can occur while binding parameters and running a statement.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Failed to open the database.
    #[error("cannot open database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Failed to start the transaction.
    #[error("cannot begin transaction: {0}")]
    Begin(#[source] sqlx::Error),

    /// Failed to compile the statement.
    #[error("cannot prepare statement: {0}")]
    Prepare(#[source] sqlx::Error),

    /// Failed while executing the statement or fetching a row.
    #[error("cannot evaluate statement: {0}")]
    Evaluate(#[source] sqlx::Error),

    /// A result column could not be read back as a value.
    #[error("cannot decode column {column}: {source}")]
    Decode {
        /// Zero-based column index.
        column: usize,
        /// Underlying driver error.
        #[source]
        source: sqlx::Error,
    },

    /// Failed to commit the transaction.
    #[error("cannot commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    /// A token would bind past the statement's last parameter.
    #[error("parameter index {slot} out of range (statement has {count})")]
    ParameterOutOfRange {
        /// One-based slot the token targets.
        slot: usize,
        /// Number of parameters the statement declares.
        count: usize,
    },

    /// The statement uses a parameter name that cannot be bound by position.
    #[error("named parameter {0} is not supported; use ?, ?NNN or $NNN")]
    NamedParameter(String),

    /// A value exceeds the engine's string or blob length limit.
    #[error("string or blob too big for parameter {slot} ({length} bytes)")]
    TooBig {
        /// One-based slot of the value.
        slot: usize,
        /// Length of the value in bytes.
        length: usize,
    },

    /// Failed to read parameter input.
    #[error("cannot read input: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write a result row.
    #[error("cannot write output: {0}")]
    Write(#[source] std::io::Error),

    /// A parameter token is malformed.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
