//! Parameter placeholders in statement text.
//!
//! Values are bound by position, which covers `?`, `?NNN` and `$NNN`.
//! SQLite also accepts named forms (`:name`, `@name`, `$name`) that cannot
//! be bound this way; [`find_named_parameter`] reports the first of them.

/// Returns the first named parameter in `sql`, including its prefix.
///
/// String literals, quoted identifiers and comments are skipped.
#[must_use]
pub fn find_named_parameter(sql: &str) -> Option<&str> {
    let bytes = sql.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => i = skip_past(bytes, i + 1, quote),
            b'[' => i = skip_past(bytes, i + 1, b']'),
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_past(bytes, i + 2, b'\n'),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i + 2),
            prefix @ (b':' | b'@' | b'$') => {
                let end = name_end(bytes, i + 1);
                let name = &sql[i + 1..end];
                let positional = prefix == b'$' && name.bytes().all(|b| b.is_ascii_digit());
                if !name.is_empty() && !positional {
                    return Some(&sql[i..end]);
                }
                i = end;
            }
            _ => i += 1,
        }
    }

    None
}

/// Returns the index just past the next `close` at or after `from`.
fn skip_past(bytes: &[u8], from: usize, close: u8) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == close)
        .map_or(bytes.len(), |at| from + at + 1)
}

fn skip_block_comment(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .windows(2)
        .position(|pair| pair == b"*/")
        .map_or(bytes.len(), |at| from + at + 2)
}

/// Returns the end of the identifier starting at `from`.
///
/// Non-ASCII bytes count as identifier bytes, so the end always falls on a
/// character boundary.
fn name_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80))
        .map_or(bytes.len(), |at| from + at)
}
