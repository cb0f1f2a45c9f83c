// Rule parameter coercion
//
// Integer parameters accept prefixed literals: an optional sign, `0x`/`0o`/`0b`
// prefixes, a bare leading `0` for octal, and `_` separators between digits.
// Float parameters accept decimal and exponent notation, `inf`/`nan`
// spellings, and hexadecimal mantissas with a binary exponent (`0x1.8p3`).

use crate::FieldError;
use std::borrow::Cow;

/// Parse a parameter as a signed 64-bit integer.
pub fn parse_int(param: &str) -> Result<i64, FieldError> {
    let (negative, body) = match param.as_bytes().first() {
        Some(b'-') => (true, &param[1..]),
        Some(b'+') => (false, &param[1..]),
        _ => (false, param),
    };
    let magnitude = parse_magnitude(body)?;

    if negative {
        // i64::MIN has no positive counterpart
        if magnitude == i64::MIN.unsigned_abs() {
            return Ok(i64::MIN);
        }
        i64::try_from(magnitude)
            .map(|m| -m)
            .map_err(|_| FieldError::BadParameter)
    } else {
        i64::try_from(magnitude).map_err(|_| FieldError::BadParameter)
    }
}

/// Parse a parameter as an unsigned 64-bit integer. Signs are rejected.
pub fn parse_uint(param: &str) -> Result<u64, FieldError> {
    parse_magnitude(param)
}

/// Parse a parameter as a 64-bit float.
pub fn parse_float(param: &str) -> Result<f64, FieldError> {
    let (negative, body) = match param.as_bytes().first() {
        Some(b'-') => (true, &param[1..]),
        Some(b'+') => (false, &param[1..]),
        _ => (false, param),
    };

    match body.get(..2) {
        Some("0x" | "0X") => {
            let value = parse_hex_float(&body[2..])?;
            Ok(if negative { -value } else { value })
        }
        _ => param.parse::<f64>().map_err(|_| FieldError::BadParameter),
    }
}

/// Split a comma-separated parameter into trimmed entries.
pub fn parse_list(param: &str) -> Vec<&str> {
    param.split(',').map(str::trim).collect()
}

pub fn parse_int_list(param: &str) -> Result<Vec<i64>, FieldError> {
    parse_list(param).into_iter().map(parse_int).collect()
}

pub fn parse_uint_list(param: &str) -> Result<Vec<u64>, FieldError> {
    parse_list(param).into_iter().map(parse_uint).collect()
}

pub fn parse_float_list(param: &str) -> Result<Vec<f64>, FieldError> {
    parse_list(param).into_iter().map(parse_float).collect()
}

fn parse_magnitude(body: &str) -> Result<u64, FieldError> {
    let (radix, digits) = split_radix(body);
    // a prefix counts as a digit for separator placement
    let digits = if digits.len() < body.len() {
        digits.strip_prefix('_').unwrap_or(digits)
    } else {
        digits
    };
    let digits = strip_separators(digits)?;

    // from_str_radix tolerates a leading '+', strconv does not
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(FieldError::BadParameter);
    }
    u64::from_str_radix(&digits, radix).map_err(|_| FieldError::BadParameter)
}

// Hex mantissa with optional fraction, then a mandatory `p` exponent.
fn parse_hex_float(body: &str) -> Result<f64, FieldError> {
    let (mantissa, exponent) = body
        .split_once(['p', 'P'])
        .ok_or(FieldError::BadParameter)?;
    let mantissa = mantissa.strip_prefix('_').unwrap_or(mantissa);
    let mantissa = strip_separators(mantissa)?;
    let exponent: i32 = exponent.parse().map_err(|_| FieldError::BadParameter)?;

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((&*mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(FieldError::BadParameter);
    }

    let mut value = 0f64;
    for c in whole.chars().chain(fraction.chars()) {
        let digit = c.to_digit(16).ok_or(FieldError::BadParameter)?;
        value = value * 16.0 + f64::from(digit);
    }

    let shift = i32::try_from(fraction.len())
        .ok()
        .and_then(|n| n.checked_mul(4))
        .and_then(|bits| exponent.checked_sub(bits))
        .ok_or(FieldError::BadParameter)?;
    let value = value * 2f64.powi(shift);

    if value.is_finite() {
        Ok(value)
    } else {
        Err(FieldError::BadParameter)
    }
}

fn split_radix(body: &str) -> (u32, &str) {
    let prefix = body.get(..2).map(str::to_ascii_lowercase);
    match prefix.as_deref() {
        Some("0x") => (16, &body[2..]),
        Some("0o") => (8, &body[2..]),
        Some("0b") => (2, &body[2..]),
        _ if body.len() > 1 && body.starts_with('0') => (8, &body[1..]),
        _ => (10, body),
    }
}

fn strip_separators(raw: &str) -> Result<Cow<'_, str>, FieldError> {
    if !raw.contains('_') {
        return Ok(Cow::Borrowed(raw));
    }
    // every underscore must sit between two digits
    let bytes = raw.as_bytes();
    let is_digit = |i: Option<usize>| {
        i.and_then(|i| bytes.get(i))
            .is_some_and(|b| b.is_ascii_alphanumeric())
    };
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'_' && !(is_digit(i.checked_sub(1)) && is_digit(Some(i + 1))) {
            return Err(FieldError::BadParameter);
        }
    }
    Ok(Cow::Owned(raw.replace('_', "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_decimal() {
        assert_eq!(parse_int("24"), Ok(24));
        assert_eq!(parse_int("-7"), Ok(-7));
        assert_eq!(parse_int("+7"), Ok(7));
        assert_eq!(parse_int("0"), Ok(0));
        assert_eq!(parse_int("1_000"), Ok(1000));
    }

    #[test]
    fn test_parse_int_prefixes() {
        assert_eq!(parse_int("0x1F"), Ok(31));
        assert_eq!(parse_int("0X1f"), Ok(31));
        assert_eq!(parse_int("0o17"), Ok(15));
        assert_eq!(parse_int("017"), Ok(15));
        assert_eq!(parse_int("0b101"), Ok(5));
        assert_eq!(parse_int("0x_ff"), Ok(255));
        assert_eq!(parse_int("-0x10"), Ok(-16));
    }

    #[test]
    fn test_parse_int_bounds() {
        assert_eq!(parse_int("-9223372036854775808"), Ok(i64::MIN));
        assert_eq!(parse_int("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(parse_int("9223372036854775808"), Err(FieldError::BadParameter));
    }

    #[test]
    fn test_parse_int_rejects_garbage() {
        assert_eq!(parse_int(""), Err(FieldError::BadParameter));
        assert_eq!(parse_int("abc"), Err(FieldError::BadParameter));
        assert_eq!(parse_int("1.5"), Err(FieldError::BadParameter));
        assert_eq!(parse_int("08"), Err(FieldError::BadParameter));
        assert_eq!(parse_int("0x"), Err(FieldError::BadParameter));
        assert_eq!(parse_int("1__0"), Err(FieldError::BadParameter));
        assert_eq!(parse_int("10_"), Err(FieldError::BadParameter));
        assert_eq!(parse_int("-"), Err(FieldError::BadParameter));
    }

    #[test]
    fn test_parse_uint() {
        assert_eq!(parse_uint("18446744073709551615"), Ok(u64::MAX));
        assert_eq!(parse_uint("0xff"), Ok(255));
        assert_eq!(parse_uint("-1"), Err(FieldError::BadParameter));
        assert_eq!(parse_uint("+1"), Err(FieldError::BadParameter));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("1.5"), Ok(1.5));
        assert_eq!(parse_float("-2e3"), Ok(-2000.0));
        assert_eq!(parse_float("3"), Ok(3.0));
        assert!(parse_float("inf").unwrap().is_infinite());
        assert_eq!(parse_float("x1"), Err(FieldError::BadParameter));
        assert_eq!(parse_float("1_0.5"), Err(FieldError::BadParameter));
    }

    #[test]
    fn test_parse_float_hex() {
        assert_eq!(parse_float("0x1p4"), Ok(16.0));
        assert_eq!(parse_float("0X1.8p1"), Ok(3.0));
        assert_eq!(parse_float("-0x.8p0"), Ok(-0.5));
        assert_eq!(parse_float("0x_1_0p-4"), Ok(1.0));
        assert_eq!(parse_float("0x1"), Err(FieldError::BadParameter));
        assert_eq!(parse_float("0xgp1"), Err(FieldError::BadParameter));
        assert_eq!(parse_float("0xp1"), Err(FieldError::BadParameter));
        assert_eq!(parse_float("0x1p99999"), Err(FieldError::BadParameter));
    }

    #[test]
    fn test_lists() {
        assert_eq!(parse_list(" a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_int_list("1, 2,3"), Ok(vec![1, 2, 3]));
        assert_eq!(parse_uint_list("1,x"), Err(FieldError::BadParameter));
        assert_eq!(parse_float_list("0.5, 1"), Ok(vec![0.5, 1.0]));
    }
}
