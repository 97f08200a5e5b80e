//! Locale-dependent numeric symbols.

/// The three characters a numeric token may start with besides digits.
///
/// Resolved once at startup and passed by reference to the parsers. The
/// radix point is also the decimal separator accepted by the float parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    /// Decimal point.
    pub radix: char,
    /// Positive sign.
    pub positive: char,
    /// Negative sign.
    pub negative: char,
}

impl Symbols {
    /// Creates a symbol set.
    #[must_use]
    pub const fn new(radix: char, positive: char, negative: char) -> Self {
        Self {
            radix,
            positive,
            negative,
        }
    }

    /// Returns true if `c` may begin a numeric token.
    #[must_use]
    pub fn starts_numeric(&self, c: char) -> bool {
        c.is_ascii_digit() || c == self.radix || c == self.positive || c == self.negative
    }
}

/// The symbols of the C locale.
impl Default for Symbols {
    fn default() -> Self {
        Self::new('.', '+', '-')
    }
}
