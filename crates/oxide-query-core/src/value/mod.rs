//! SQL values and their token representation.
//!
//! [`parse_token`] turns a token into a [`SqlValue`]; the [`Display`]
//! implementation of [`SqlValue`] renders it back into the same grammar.
//!
//! [`Display`]: std::fmt::Display

mod encode;
mod numeric;
mod parse;

pub use encode::{encode_row, format_float};
pub use parse::parse_token;

/// A value bound to a statement parameter or read from a result column.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Text bytes.
    ///
    /// Always valid UTF-8 when parsed from a token. Text read back from a
    /// result column keeps the engine's bytes as they are.
    Text(Vec<u8>),
    /// Binary blob.
    Blob(Vec<u8>),
    /// A blob of the given length whose bytes are all zero.
    ZeroBlob(usize),
}

impl SqlValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_constructor() {
        assert_eq!(SqlValue::text("héllo"), SqlValue::Text("héllo".as_bytes().to_vec()));
    }
}
