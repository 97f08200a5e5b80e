//! # oxide-query-core
//!
//! The token grammar used by `oxide-query` to carry SQL parameters and result
//! rows as plain text.
//!
//! This crate provides:
//! - A UTF-8 codepoint stepper that distinguishes incomplete from invalid input
//! - A classifier and value parsers turning one token into a [`SqlValue`]
//! - The inverse encoder rendering values (and whole rows) back into tokens
//! - A streaming lexer that splits line-oriented input into tokens while
//!   tracking quoted spans across line boundaries
//!
//! ## Token grammar
//!
//! | Form | Pattern | Value |
//! |---|---|---|
//! | Quoted text | `'it''s'` | `Text(b"it's")` |
//! | Blob | `{0a0b}` | `Blob([0x0a, 0x0b])` |
//! | Zero blob | `[16]` | `ZeroBlob(16)` |
//! | Numeric | `42`, `-0x1f`, `2.5e3` | `Integer` / `Float` |
//! | Null | `nil` | `Null` |
//! | Keyword | `abc` | `Text(b"abc")` |
//!
//! ```rust
//! use oxide_query_core::{parse_token, SqlValue, Symbols, Token};
//!
//! let symbols = Symbols::default();
//! let value = parse_token(Token::from("'it''s'"), &symbols).unwrap();
//! assert_eq!(value, SqlValue::text("it's"));
//! assert_eq!(value.to_string(), "'it''s'");
//! ```

pub mod error;
pub mod lexer;
pub mod symbols;
pub mod value;

pub use error::{Result, TokenError};
pub use lexer::{Scan, Step, StreamLexer, Token};
pub use symbols::Symbols;
pub use value::{encode_row, parse_token, SqlValue};
