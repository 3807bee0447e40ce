//! Number to text conversions.
//!
//! The serializer uses [`write_json`]. `Display for Value` uses [`write_general`],
//! which keeps six significant digits and is not meant to round-trip.

use std::fmt;

/// Absolute tolerance used when comparing numbers for equality.
pub const NUMBER_TOLERANCE: f64 = 1e-12;

// 2^63: every integral f64 strictly inside (-2^63, 2^63) converts losslessly
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn as_exact_i64(value: f64) -> Option<i64> {
    if value.is_finite() && value.floor() == value && value.abs() < I64_BOUND {
        // Lossless, checked above
        Some(value as i64)
    } else {
        None
    }
}

pub(crate) fn write_json(out: &mut String, value: f64) {
    if !value.is_finite() {
        out.push_str("null");
        return;
    }

    match as_exact_i64(value) {
        Some(integer) => out.push_str(itoa::Buffer::new().format(integer)),
        // Shortest round-trip representation, never in exponent form
        None => out.push_str(&value.to_string()),
    }
}

pub(crate) fn write_general(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    const PRECISION: i32 = 6;

    if let Some(integer) = as_exact_i64(value) {
        return write!(f, "{integer}");
    }
    if value.is_nan() {
        return f.write_str("nan");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }

    // The exponent after rounding to PRECISION digits picks the notation
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(
            f,
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        let fixed = format!("{value:.decimals$}");
        f.write_str(trim_fraction(&fixed))
    }
}

fn trim_fraction(digits: &str) -> &str {
    if !digits.contains('.') {
        return digits;
    }
    digits.trim_end_matches('0').trim_end_matches('.')
}
