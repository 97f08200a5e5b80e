//! Numeric literal scanning with C library semantics.
//!
//! Integers follow `strtoll(s, &end, 0)`: an optional sign, then `0x`/`0X`
//! hexadecimal, a leading `0` for octal, or decimal. Floats follow `strtod`:
//! decimal with optional exponent, `inf`/`infinity`/`nan`, or hexadecimal
//! with a binary exponent. A literal only counts when it spans the whole text.

use std::borrow::Cow;

/// Result of scanning a signed integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegerScan {
    Value(i64),
    OutOfRange,
    NotInteger,
}

/// Result of scanning a floating-point literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FloatScan {
    Value(f64),
    OutOfRange,
    NotFloat,
}

/// Scans an unsigned integer literal.
///
/// Returns `None` if `text` is not entirely an integer literal and
/// `Some(None)` if it is one but exceeds `u64`.
pub(crate) fn scan_unsigned(text: &str) -> Option<Option<u64>> {
    let (radix, digits) = if let Some(rest) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        (16, rest)
    } else if text.len() > 1 && text.starts_with('0') {
        (8, &text[1..])
    } else {
        (10, text)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    Some(digits.chars().try_fold(0_u64, |acc, c| {
        acc.checked_mul(u64::from(radix))?
            .checked_add(u64::from(c.to_digit(radix)?))
    }))
}

/// Scans a signed 64-bit integer literal.
pub(crate) fn scan_signed(text: &str) -> IntegerScan {
    let (negative, digits) = split_sign(text);

    match scan_unsigned(digits) {
        None => IntegerScan::NotInteger,
        Some(None) => IntegerScan::OutOfRange,
        Some(Some(magnitude)) => {
            let magnitude = i128::from(magnitude);
            let value = if negative { -magnitude } else { magnitude };
            i64::try_from(value).map_or(IntegerScan::OutOfRange, IntegerScan::Value)
        }
    }
}

/// Scans a floating-point literal whose decimal point is `radix`.
pub(crate) fn scan_float(text: &str, radix: char) -> FloatScan {
    let text: Cow<'_, str> = if radix == '.' {
        Cow::Borrowed(text)
    } else if text.contains('.') {
        return FloatScan::NotFloat;
    } else {
        Cow::Owned(text.replace(radix, "."))
    };

    let (negative, body) = split_sign(&text);
    let scanned = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        scan_hex_float(hex)
    } else {
        scan_decimal_float(&text, body)
    };

    match scanned {
        FloatScan::Value(value) if negative => FloatScan::Value(-value),
        other => other,
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

/// Scans a decimal float. `body` is `text` without its sign; the returned
/// value is unsigned.
fn scan_decimal_float(text: &str, body: &str) -> FloatScan {
    if body.starts_with(['+', '-']) {
        return FloatScan::NotFloat;
    }
    let Ok(value) = text.parse::<f64>() else {
        return FloatScan::NotFloat;
    };
    let value = value.abs();

    let lowered = body.to_ascii_lowercase();
    if lowered.starts_with("inf") || lowered.starts_with("nan") {
        return FloatScan::Value(value);
    }
    if value.is_infinite() {
        return FloatScan::OutOfRange;
    }

    let mantissa = lowered.split('e').next().unwrap_or_default();
    if underflowed(value, mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'))) {
        return FloatScan::OutOfRange;
    }
    FloatScan::Value(value)
}

/// Scans the part of a hexadecimal float after `0x`.
fn scan_hex_float(hex: &str) -> FloatScan {
    let (mantissa, exponent) = match hex.find(['p', 'P']) {
        Some(at) => (&hex[..at], Some(&hex[at + 1..])),
        None => (hex, None),
    };

    let mut value = 0.0_f64;
    let mut scale = 0_i64;
    let mut seen_point = false;
    let mut seen_digit = false;
    let mut nonzero = false;
    for c in mantissa.chars() {
        if c == '.' && !seen_point {
            seen_point = true;
        } else if let Some(digit) = c.to_digit(16) {
            seen_digit = true;
            nonzero |= digit != 0;
            value = value.mul_add(16.0, f64::from(digit));
            if seen_point {
                scale -= 4;
            }
        } else {
            return FloatScan::NotFloat;
        }
    }
    if !seen_digit {
        return FloatScan::NotFloat;
    }

    if let Some(exponent) = exponent {
        let (negative, digits) = split_sign(exponent);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return FloatScan::NotFloat;
        }
        let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
        scale = if negative {
            scale.saturating_sub(magnitude)
        } else {
            scale.saturating_add(magnitude)
        };
    }

    let scale = i32::try_from(scale).unwrap_or(if scale < 0 { i32::MIN } else { i32::MAX });
    let value = value * 2.0_f64.powi(scale);
    if value.is_infinite() || underflowed(value, nonzero) {
        return FloatScan::OutOfRange;
    }
    FloatScan::Value(value)
}

/// Returns true if a literal with nonzero digits lost its magnitude.
fn underflowed(value: f64, nonzero: bool) -> bool {
    nonzero && (value == 0.0 || value.is_subnormal())
}
