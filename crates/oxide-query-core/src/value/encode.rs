//! Rendering values back into tokens.

use std::fmt;

use super::SqlValue;

/// Significant digits kept when rendering floats.
const FLOAT_PRECISION: usize = 8;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

impl SqlValue {
    /// Appends the token form of the value to `out`.
    ///
    /// Text is written byte for byte with each `'` doubled, so result text
    /// that is not valid UTF-8 passes through unchanged.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Null => out.extend_from_slice(b"nil"),
            Self::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Self::Float(x) => out.extend_from_slice(format_float(*x).as_bytes()),
            Self::Text(bytes) => {
                out.push(b'\'');
                for &byte in bytes {
                    if byte == b'\'' {
                        out.push(b'\'');
                    }
                    out.push(byte);
                }
                out.push(b'\'');
            }
            Self::Blob(bytes) => {
                out.push(b'{');
                for &byte in bytes {
                    out.push(HEX_DIGITS[usize::from(byte >> 4)]);
                    out.push(HEX_DIGITS[usize::from(byte & 0x0f)]);
                }
                out.push(b'}');
            }
            Self::ZeroBlob(len) => {
                out.push(b'{');
                out.resize(out.len() + 2 * len, b'0');
                out.push(b'}');
            }
        }
    }
}

/// Renders the token form, replacing bytes that are not valid UTF-8.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = Vec::new();
        self.encode_into(&mut bytes);
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

/// Formats a float like C's `%.8g`, always with `.` as decimal point.
///
/// Uses fixed notation when the decimal exponent lies in `-4..8` and
/// scientific notation (`1.2345679e+08`) otherwise; trailing zeros and a
/// trailing decimal point are removed.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::from(if value.is_sign_negative() { "-nan" } else { "nan" });
    }
    if value.is_infinite() {
        return String::from(if value < 0.0 { "-inf" } else { "inf" });
    }
    if value == 0.0 {
        return String::from(if value.is_sign_negative() { "-0" } else { "0" });
    }

    let scientific = format!("{:.*e}", FLOAT_PRECISION - 1, value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();

    #[allow(clippy::cast_possible_wrap)]
    let precision = FLOAT_PRECISION as i32;
    if exponent < -4 || exponent >= precision {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(precision - 1 - exponent).unwrap_or_default();
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Strips trailing zeros after a decimal point, then the point itself.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Renders a result row: tab-separated tokens terminated by a newline.
#[must_use]
pub fn encode_row(values: &[SqlValue]) -> Vec<u8> {
    let mut line = Vec::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            line.push(b'\t');
        }
        value.encode_into(&mut line);
    }
    line.push(b'\n');
    line
}
