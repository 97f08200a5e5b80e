//! Token classification and conversion into values.

use super::numeric::{scan_float, scan_signed, scan_unsigned, FloatScan, IntegerScan};
use super::SqlValue;
use crate::error::{Result, TokenError};
use crate::lexer::{step, Step, Token};
use crate::symbols::Symbols;

/// The keyword that binds NULL.
const NULL_KEYWORD: &[u8] = b"nil";

/// Converts a token into a value according to its first character.
///
/// | First character | Form |
/// |---|---|
/// | `'` | quoted text |
/// | `{` | blob |
/// | `[` | zero blob |
/// | digit, radix point, sign | integer or float |
/// | alphabetic | `nil` or verbatim text |
pub fn parse_token(token: Token, symbols: &Symbols) -> Result<SqlValue> {
    if token.is_empty() {
        return Err(TokenError::UnknownToken(String::new()));
    }

    let first = match step(token.as_bytes())? {
        Step::Char(c, _) => c,
        Step::Incomplete => return Err(TokenError::IncompleteCharacter),
    };

    match first {
        '\'' => parse_quoted(token),
        '{' => parse_blob(token),
        '[' => parse_zero_blob(&token),
        c if symbols.starts_numeric(c) => parse_numeric(&token, symbols),
        c if c.is_alphabetic() => parse_keyword(token),
        _ => Err(TokenError::UnknownToken(token.to_string())),
    }
}

/// Parses `'...'`, collapsing each `''` into one quotation mark.
///
/// The unescaped text is compacted towards the start of the token's own
/// buffer, which is then truncated to become the value.
fn parse_quoted(mut token: Token) -> Result<SqlValue> {
    if token.len() < 2 || token.last() != Some(b'\'') {
        return Err(TokenError::UnterminatedText);
    }

    let end = token.len() - 1;
    let bytes = token.as_bytes_mut();
    let mut pending = false;
    let mut head = 0;
    let mut tail = 1;

    while tail < end {
        let (c, width) = match step(&bytes[tail..end])? {
            Step::Char(c, width) => (c, width),
            Step::Incomplete => return Err(TokenError::IncompleteQuotedCharacter),
        };

        if pending {
            if c != '\'' {
                return Err(TokenError::UnescapedQuote);
            }
            pending = false;
        } else {
            pending = c == '\'';
            bytes.copy_within(tail..tail + width, head);
            head += width;
        }

        tail += width;
    }

    if pending {
        return Err(TokenError::UnescapedQuote);
    }

    // Every byte kept was part of a decoded character, so the text is UTF-8.
    Ok(SqlValue::Text(token.truncated(head)))
}

/// Parses `{hex...}`, decoding over the token's own storage.
fn parse_blob(mut token: Token) -> Result<SqlValue> {
    if token.len() % 2 != 0 {
        return Err(TokenError::BlobLength);
    }
    if token.len() < 2 || token.last() != Some(b'}') {
        return Err(TokenError::UnterminatedBlob);
    }

    let len = token.len() / 2 - 1;
    let bytes = token.as_bytes_mut();
    for i in 0..len {
        // Output index `i` trails both input indices, so nothing unread is
        // overwritten.
        let high = nibble(bytes[1 + 2 * i])?;
        let low = nibble(bytes[2 + 2 * i])?;
        bytes[i] = (high << 4) | low;
    }

    Ok(SqlValue::Blob(token.truncated(len)))
}

fn nibble(byte: u8) -> Result<u8> {
    char::from(byte)
        .to_digit(16)
        .and_then(|digit| u8::try_from(digit).ok())
        .ok_or(TokenError::InvalidNibble)
}

/// Parses `[N]`, where `N` is an unsigned integer literal.
fn parse_zero_blob(token: &Token) -> Result<SqlValue> {
    if token.len() < 2 || token.last() != Some(b']') {
        return Err(TokenError::UnterminatedZeroBlob);
    }

    let interior = String::from_utf8_lossy(&token.as_bytes()[1..token.len() - 1]);
    let length = if interior.is_empty() {
        Some(0)
    } else {
        scan_unsigned(&interior)
            .ok_or_else(|| TokenError::InvalidZeroBlobLength(interior.to_string()))?
    };

    length
        .and_then(|n| i32::try_from(n).ok())
        .and_then(|n| usize::try_from(n).ok())
        .map(SqlValue::ZeroBlob)
        .ok_or_else(|| TokenError::ZeroBlobOutOfRange(interior.to_string()))
}

/// Parses an integer, falling back to a float in the locale's notation.
fn parse_numeric(token: &Token, symbols: &Symbols) -> Result<SqlValue> {
    let text = std::str::from_utf8(token.as_bytes()).map_err(|_| TokenError::InvalidCharacter)?;

    match scan_signed(text) {
        IntegerScan::Value(n) => Ok(SqlValue::Integer(n)),
        IntegerScan::OutOfRange => Err(TokenError::IntegerOutOfRange(text.to_string())),
        IntegerScan::NotInteger => match scan_float(text, symbols.radix) {
            FloatScan::Value(x) => Ok(SqlValue::Float(x)),
            FloatScan::OutOfRange => Err(TokenError::FloatOutOfRange(text.to_string())),
            FloatScan::NotFloat => Err(TokenError::InvalidNumeric(text.to_string())),
        },
    }
}

/// Binds `nil` as NULL and any other word as its own text.
fn parse_keyword(token: Token) -> Result<SqlValue> {
    if token.as_bytes() == NULL_KEYWORD {
        return Ok(SqlValue::Null);
    }

    std::str::from_utf8(token.as_bytes()).map_err(|_| TokenError::InvalidCharacter)?;
    Ok(SqlValue::Text(token.into_bytes()))
}
