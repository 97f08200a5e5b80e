//! Sources of parameter values.
//!
//! Command-line arguments fill the leading slots once per run. Any slots left
//! over are filled from a line-oriented input stream, one record per
//! execution.

use oxide_query_core::{parse_token, Scan, StreamLexer, Symbols, Token};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{trace, warn};

use crate::binder::Bindings;
use crate::error::{QueryError, Result};

/// Binds each argument, in order, to the leading slots.
///
/// Returns the number of slots filled, which is where the stream source
/// starts.
pub fn bind_arguments<S: AsRef<str>>(
    arguments: &[S],
    symbols: &Symbols,
    bindings: &mut Bindings,
) -> Result<usize> {
    for (index, argument) in arguments.iter().enumerate() {
        let value = parse_token(Token::from(argument.as_ref()), symbols)?;
        bindings.bind(index + 1, value)?;
    }
    Ok(arguments.len())
}

/// Reads records of parameter tokens from line-oriented input.
///
/// A record ends at the end of a line, or as soon as every remaining slot
/// has a value; tokens left on the line then begin the next record. Quoted
/// text may span several lines.
pub struct StreamSource<R> {
    reader: R,
    lexer: StreamLexer,
    line: Vec<u8>,
    lines_read: usize,
}

impl<R: AsyncBufRead + Unpin> StreamSource<R> {
    /// Creates a source reading from `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            lexer: StreamLexer::new(),
            line: Vec::new(),
            lines_read: 0,
        }
    }

    /// Returns the number of lines read so far.
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Fills the slots after `offset` with the next record.
    ///
    /// Slots the record does not reach are set to NULL. Returns `false` once
    /// the input is exhausted; a record still incomplete at that point is
    /// discarded.
    pub async fn next_record(
        &mut self,
        bindings: &mut Bindings,
        offset: usize,
        symbols: &Symbols,
    ) -> Result<bool> {
        bindings.clear_from(offset);
        let mut slot = offset;

        loop {
            match self.lexer.next_scan()? {
                Scan::Token(token) => {
                    slot += 1;
                    bindings.bind(slot, parse_token(token, symbols)?)?;
                    if slot >= bindings.count() {
                        self.lexer.skip_delimiters()?;
                        return Ok(true);
                    }
                }
                Scan::LineEnd => return Ok(true),
                Scan::NeedInput => {
                    if !self.read_line().await? {
                        if let Some(token) = self.lexer.finish()? {
                            warn!(
                                token = %token,
                                line = self.lines_read,
                                "Ignoring unterminated token at end of input"
                            );
                        }
                        return Ok(false);
                    }
                }
            }
        }
    }

    /// Appends the next input line to the lexer. Returns `false` at end of input.
    async fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.line)
            .await
            .map_err(QueryError::Read)?;
        if read == 0 {
            return Ok(false);
        }

        self.lines_read += 1;
        trace!(line = self.lines_read, bytes = read, "Read input line");
        self.lexer.push_line(&self.line);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_query_core::{SqlValue, TokenError};

    fn int(n: i64) -> SqlValue {
        SqlValue::Integer(n)
    }

    /// Collects every record `input` yields for a statement with `count`
    /// parameters, none of them bound from arguments.
    async fn records(input: &str, count: usize) -> Result<Vec<Vec<SqlValue>>> {
        let symbols = Symbols::default();
        let mut bindings = Bindings::new(count);
        let mut source = StreamSource::new(input.as_bytes());
        let mut records = Vec::new();
        while source.next_record(&mut bindings, 0, &symbols).await? {
            records.push(bindings.values().to_vec());
        }
        Ok(records)
    }

    #[test]
    fn test_bind_arguments() {
        let mut bindings = Bindings::new(3);
        let filled = bind_arguments(&["1", "'a'"], &Symbols::default(), &mut bindings).unwrap();
        assert_eq!(filled, 2);
        assert_eq!(
            bindings.values(),
            &[int(1), SqlValue::text("a"), SqlValue::Null]
        );
    }

    #[test]
    fn test_bind_arguments_out_of_range() {
        let mut bindings = Bindings::new(1);
        let result = bind_arguments(&["1", "2"], &Symbols::default(), &mut bindings);
        assert!(matches!(
            result,
            Err(QueryError::ParameterOutOfRange { slot: 2, count: 1 })
        ));
    }

    #[test]
    fn test_bind_arguments_invalid_token() {
        let mut bindings = Bindings::new(1);
        let result = bind_arguments(&["12abc"], &Symbols::default(), &mut bindings);
        assert!(matches!(
            result,
            Err(QueryError::Token(TokenError::InvalidNumeric(_)))
        ));
    }

    #[tokio::test]
    async fn test_one_record_per_line() {
        assert_eq!(
            records("1 2\n3 4\n", 2).await.unwrap(),
            vec![vec![int(1), int(2)], vec![int(3), int(4)]]
        );
    }

    #[tokio::test]
    async fn test_short_line_pads_with_null() {
        assert_eq!(
            records("1\n\n", 2).await.unwrap(),
            vec![
                vec![int(1), SqlValue::Null],
                vec![SqlValue::Null, SqlValue::Null],
            ]
        );
    }

    #[tokio::test]
    async fn test_long_line_starts_next_record() {
        assert_eq!(
            records("1 2 3\n", 2).await.unwrap(),
            vec![vec![int(1), int(2)], vec![int(3), SqlValue::Null]]
        );
    }

    #[tokio::test]
    async fn test_quote_spans_lines() {
        assert_eq!(
            records("'a\nb' 1\n", 2).await.unwrap(),
            vec![vec![SqlValue::text("a\nb"), int(1)]]
        );
    }

    #[tokio::test]
    async fn test_unterminated_last_line_is_discarded() {
        assert_eq!(
            records("1 2\n3 4", 2).await.unwrap(),
            vec![vec![int(1), int(2)]]
        );
    }

    #[tokio::test]
    async fn test_open_quote_at_end_of_input() {
        let result = records("1 'open\n", 2).await;
        assert!(matches!(
            result,
            Err(QueryError::Token(TokenError::UnmatchedQuote))
        ));
    }

    #[tokio::test]
    async fn test_offset_keeps_arguments() {
        let symbols = Symbols::default();
        let mut bindings = Bindings::new(3);
        let offset = bind_arguments(&["[5]"], &symbols, &mut bindings).unwrap();
        let mut source = StreamSource::new(&b"\n"[..]);

        assert!(source
            .next_record(&mut bindings, offset, &symbols)
            .await
            .unwrap());
        assert_eq!(
            bindings.values(),
            &[SqlValue::ZeroBlob(5), SqlValue::Null, SqlValue::Null]
        );
        assert!(!source
            .next_record(&mut bindings, offset, &symbols)
            .await
            .unwrap());
        assert_eq!(source.lines_read(), 1);
    }
}
