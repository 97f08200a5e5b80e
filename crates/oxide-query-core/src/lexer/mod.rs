//! Token lexing
//!
//! Character stepping, token storage, and the streaming tokenizer that splits
//! line-oriented input into parameter tokens.

mod codepoint;
mod stream;
mod token;

pub use codepoint::{step, Step};
pub use stream::{is_delimiter, Scan, StreamLexer};
pub use token::Token;
