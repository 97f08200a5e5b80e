//! Run a prepared SQLite statement with parameters given as plain text.
//!
//! `oxide-query` binds statement parameters from tokens in the grammar of
//! [`oxide_query_core`] and writes result rows back in the same grammar:
//!
//! - **Arguments** fill the leading parameters once per run
//! - **Input records** fill the remaining parameters; the statement runs once
//!   per record, all inside one transaction
//! - **Rows** are written one per line, columns separated by tabs
//!
//! # CLI Usage
//!
//! ```bash
//! # One execution, no input read
//! oxide-query app.db "SELECT name FROM users WHERE id = ?" 42
//!
//! # One insert per input line
//! printf "1 'alice'\n2 'bob'\n" | oxide-query app.db "INSERT INTO users VALUES (?, ?)"
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use oxide_query::prelude::*;
//!
//! let pool = SqlitePoolOptions::new().connect(":memory:").await?;
//! let executor = QueryExecutor::new(pool, Symbols::default());
//! let mut output = Vec::new();
//! executor
//!     .run("SELECT ? * 2", &[], "1\n2\n".as_bytes(), &mut output)
//!     .await?;
//! assert_eq!(output, b"2\n4\n");
//! ```

pub mod binder;
pub mod error;
pub mod executor;
pub mod placeholder;
pub mod source;

pub use error::{QueryError, Result};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::binder::Bindings;
    pub use crate::error::{QueryError, Result};
    pub use crate::executor::{QueryExecutor, RunSummary};
    pub use crate::source::{bind_arguments, StreamSource};
    pub use oxide_query_core::{SqlValue, Symbols};
    pub use sqlx::sqlite::SqlitePoolOptions;
}
