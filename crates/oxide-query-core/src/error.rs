//! Error types for the token grammar.

/// Errors raised while decoding, classifying or converting tokens.
///
/// Every variant is fatal to a run. Variants that concern a specific token
/// carry its text verbatim so the diagnostic names the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The input is not valid UTF-8.
    #[error("invalid multi-byte character in input")]
    InvalidCharacter,

    /// A token ends in the middle of a multi-byte character.
    #[error("incomplete multi-byte character at end of token")]
    IncompleteCharacter,

    /// Quoted text ends in the middle of a multi-byte character.
    #[error("incomplete multi-byte character inside quoted text")]
    IncompleteQuotedCharacter,

    /// Quoted text is missing its closing quotation mark.
    #[error("no single quotation mark at end of text")]
    UnterminatedText,

    /// A quotation mark inside quoted text is not doubled.
    #[error("unescaped quotation mark inside quoted text")]
    UnescapedQuote,

    /// A blob token has an odd number of bytes.
    #[error("invalid blob token length")]
    BlobLength,

    /// A blob token is missing its closing brace.
    #[error("no closing brace at end of blob")]
    UnterminatedBlob,

    /// A blob token contains a byte that is not a hex digit.
    #[error("invalid nibble in blob")]
    InvalidNibble,

    /// A zero blob token is missing its closing bracket.
    #[error("no closing bracket at end of zero blob")]
    UnterminatedZeroBlob,

    /// The interior of a zero blob token is not an unsigned integer.
    #[error("invalid zero blob length “{0}”")]
    InvalidZeroBlobLength(String),

    /// The zero blob length does not fit the engine's length type.
    #[error("zero blob length {0} out of range")]
    ZeroBlobOutOfRange(String),

    /// A token starting like a number is neither an integer nor a float.
    #[error("invalid numeric value “{0}”")]
    InvalidNumeric(String),

    /// An integer literal does not fit in 64 bits.
    #[error("integer value {0} out of range")]
    IntegerOutOfRange(String),

    /// A floating-point literal overflows or underflows.
    #[error("floating-point value {0} out of range")]
    FloatOutOfRange(String),

    /// A token starts with a character no value form begins with.
    #[error("unknown token “{0}”")]
    UnknownToken(String),

    /// The input ended while a quoted span was still open.
    #[error("unmatched quotation mark in input line")]
    UnmatchedQuote,
}

/// Result type for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;
