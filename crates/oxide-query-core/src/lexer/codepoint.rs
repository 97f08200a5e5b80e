//! One-codepoint-at-a-time UTF-8 decoding.

use crate::error::{Result, TokenError};

/// Longest UTF-8 encoding of a single codepoint.
const MAX_WIDTH: usize = 4;

/// The outcome of decoding the next character of a byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A full character and the number of bytes it occupies (at least 1).
    Char(char, usize),
    /// The span ends inside a multi-byte sequence, or is empty.
    Incomplete,
}

/// Decodes the first character of `bytes`.
///
/// Returns [`Step::Incomplete`] when more bytes are needed and
/// [`TokenError::InvalidCharacter`] when no continuation could make the
/// sequence valid. A NUL byte decodes as a one-byte character.
pub fn step(bytes: &[u8]) -> Result<Step> {
    let window = &bytes[..bytes.len().min(MAX_WIDTH)];
    let valid = match std::str::from_utf8(window) {
        Ok(text) => text,
        Err(err) if err.valid_up_to() > 0 => std::str::from_utf8(&window[..err.valid_up_to()])
            .map_err(|_| TokenError::InvalidCharacter)?,
        Err(err) => {
            return match err.error_len() {
                None => Ok(Step::Incomplete),
                Some(_) => Err(TokenError::InvalidCharacter),
            };
        }
    };

    Ok(valid
        .chars()
        .next()
        .map_or(Step::Incomplete, |c| Step::Char(c, c.len_utf8())))
}
