//! Incremental tokenizer for line-oriented parameter input.
//!
//! The lexer owns a byte buffer that the caller refills one line at a time.
//! Tokens are separated by whitespace or control characters. A single quote
//! opens a span in which separators are ordinary bytes; the span may continue
//! onto following lines, which are appended to the same buffer. Unescaping is
//! left to the value parser once the whole token is known.

use super::codepoint::{step, Step};
use super::Token;
use crate::error::{Result, TokenError};

/// The next event produced by [`StreamLexer::next_scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// A complete token.
    Token(Token),
    /// The current line has been consumed entirely, outside any quote.
    LineEnd,
    /// More input is required before scanning can continue.
    NeedInput,
}

/// Streaming lexer state carried across line reads.
#[derive(Debug, Clone)]
pub struct StreamLexer {
    /// Unconsumed input, starting at the oldest byte still needed.
    buf: Vec<u8>,
    /// Start of the token being accumulated.
    head: usize,
    /// Next byte to examine.
    tail: usize,
    /// Inside a quoted span.
    quote: bool,
    /// `LineEnd` has already been reported for the buffered line.
    line_done: bool,
}

impl StreamLexer {
    /// Creates a lexer with no buffered input.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            head: 0,
            tail: 0,
            quote: false,
            line_done: true,
        }
    }

    /// Appends a line of input.
    ///
    /// Bytes before the token in progress are discarded; an open token (for
    /// instance a quoted span crossing the line break) continues into `line`.
    pub fn push_line(&mut self, line: &[u8]) {
        self.buf.drain(..self.head);
        self.tail -= self.head;
        self.head = 0;
        self.buf.extend_from_slice(line);
        self.line_done = false;
    }

    /// Decodes the character at the scan position.
    fn peek(&self) -> Result<Option<(char, usize)>> {
        match step(&self.buf[self.tail..])? {
            Step::Char(c, width) => Ok(Some((c, width))),
            Step::Incomplete => Ok(None),
        }
    }

    /// Returns true when the buffer holds a complete, newline-terminated line.
    fn line_terminated(&self) -> bool {
        self.buf.last() == Some(&b'\n')
    }

    /// Scans up to the next token or line boundary.
    pub fn next_scan(&mut self) -> Result<Scan> {
        while let Some((c, width)) = self.peek()? {
            let end = self.tail;
            self.tail += width;

            if self.quote {
                if c == '\'' {
                    self.quote = false;
                }
            } else if c == '\'' {
                self.quote = true;
            } else if is_delimiter(c) {
                let start = self.head;
                self.head = self.tail;
                if start < end {
                    return Ok(Scan::Token(Token::from(&self.buf[start..end])));
                }
            }
        }

        if self.line_done || self.quote || self.head < self.buf.len() || !self.line_terminated()
        {
            return Ok(Scan::NeedInput);
        }

        self.line_done = true;
        Ok(Scan::LineEnd)
    }

    /// Consumes separators following the last token.
    ///
    /// When nothing but separators remains on the line, the line counts as
    /// consumed and the next scan asks for input instead of reporting an
    /// empty line end.
    pub fn skip_delimiters(&mut self) -> Result<()> {
        if self.quote || self.head < self.tail {
            return Ok(());
        }

        while let Some((c, width)) = self.peek()? {
            if !is_delimiter(c) {
                return Ok(());
            }
            self.tail += width;
            self.head = self.tail;
        }

        if self.tail >= self.buf.len() && self.line_terminated() {
            self.line_done = true;
        }
        Ok(())
    }

    /// Closes the stream.
    ///
    /// Fails if a quoted span is still open. Otherwise returns any trailing
    /// text that was never terminated by a separator.
    pub fn finish(&mut self) -> Result<Option<Token>> {
        if self.quote {
            return Err(TokenError::UnmatchedQuote);
        }

        let rest = (self.head < self.buf.len()).then(|| Token::from(&self.buf[self.head..]));
        self.buf.clear();
        self.head = 0;
        self.tail = 0;
        self.line_done = true;
        Ok(rest)
    }
}

impl Default for StreamLexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true for characters that end a token outside quotes.
#[must_use]
pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c.is_control()
}
