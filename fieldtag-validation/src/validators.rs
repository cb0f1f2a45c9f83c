// Built-in rules

use crate::params::{
    parse_float, parse_float_list, parse_int, parse_int_list, parse_list, parse_uint,
    parse_uint_list,
};
use crate::{FieldError, Value};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const NONZERO: &str = "nonzero";
pub const LEN: &str = "len";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const REGEX: &str = "regex";
pub const NONNIL: &str = "nonnil";
pub const ENUM: &str = "enum";

/// Signature shared by every built-in rule.
pub type BuiltinRule = fn(&Value<'_>, &str) -> Result<(), FieldError>;

/// Built-in rules in registration order.
pub const BUILTIN_RULES: [(&str, BuiltinRule); 7] = [
    (NONZERO, nonzero),
    (LEN, length),
    (MIN, min),
    (MAX, max),
    (REGEX, regex),
    (NONNIL, nonnil),
    (ENUM, one_of),
];

// Compiled patterns, keyed by source text. Tag strings are static so the
// set stays small.
static PATTERNS: Lazy<RwLock<HashMap<String, Regex>>> = Lazy::new(Default::default);

/// Fails when the value is the zero value for its kind.
///
/// Structs are never zero; an invalid value always is.
pub fn nonzero(value: &Value<'_>, _param: &str) -> Result<(), FieldError> {
    let valid = match value {
        Value::Str(s) => !s.is_empty(),
        Value::Pointer(target) => target.is_some(),
        Value::Collection(n) => *n != 0,
        Value::Int(i) => *i != 0,
        Value::Uint(u) => *u != 0,
        Value::Float(f) => *f != 0.0,
        Value::Bool(b) => *b,
        Value::Struct(_) => true,
        Value::Invalid => false,
    };

    if valid { Ok(()) } else { Err(FieldError::ZeroValue) }
}

/// Tests whether a value's length equals the parameter.
///
/// Strings are measured in characters, collections in items and numbers
/// are compared directly.
pub fn length(value: &Value<'_>, param: &str) -> Result<(), FieldError> {
    check_size(value, param, FieldError::Len, |ord| ord != Some(Ordering::Equal))
}

/// Tests whether a value is greater than or equal to the parameter.
pub fn min(value: &Value<'_>, param: &str) -> Result<(), FieldError> {
    check_size(value, param, FieldError::Min, |ord| ord == Some(Ordering::Less))
}

/// Tests whether a value is less than or equal to the parameter.
pub fn max(value: &Value<'_>, param: &str) -> Result<(), FieldError> {
    check_size(value, param, FieldError::Max, |ord| ord == Some(Ordering::Greater))
}

/// Checks that a string, or the string behind a pointer, matches the
/// regular expression given as parameter. Nil pointers pass.
pub fn regex(value: &Value<'_>, param: &str) -> Result<(), FieldError> {
    let text = match value {
        Value::Str(s) => *s,
        Value::Pointer(None) => return Ok(()),
        Value::Pointer(Some(target)) => match target.as_ref() {
            Value::Str(s) => *s,
            _ => return Err(FieldError::Unsupported),
        },
        _ => return Err(FieldError::Unsupported),
    };

    if compile(param)?.is_match(text) {
        Ok(())
    } else {
        Err(FieldError::Regexp)
    }
}

/// Requires a non-nil pointer. Any non-pointer value passes.
pub fn nonnil(value: &Value<'_>, _param: &str) -> Result<(), FieldError> {
    match value {
        Value::Pointer(None) | Value::Invalid => Err(FieldError::NilValue),
        _ => Ok(()),
    }
}

/// Requires the value to equal one entry of a comma-separated list.
pub fn one_of(value: &Value<'_>, param: &str) -> Result<(), FieldError> {
    let Some(target) = value.indirect() else {
        return Ok(());
    };

    let allowed = match target {
        Value::Str(s) => parse_list(param).contains(s),
        Value::Int(i) => parse_int_list(param)?.contains(i),
        Value::Uint(u) => parse_uint_list(param)?.contains(u),
        Value::Float(f) => parse_float_list(param)?.contains(f),
        _ => return Err(FieldError::Unsupported),
    };

    if allowed { Ok(()) } else { Err(FieldError::Enum) }
}

fn check_size(
    value: &Value<'_>,
    param: &str,
    failure: FieldError,
    violates: fn(Option<Ordering>) -> bool,
) -> Result<(), FieldError> {
    // nil pointers opt out of size constraints
    let Some(target) = value.indirect() else {
        return Ok(());
    };

    if violates(measure(target, param)?) {
        Err(failure)
    } else {
        Ok(())
    }
}

fn measure(value: &Value<'_>, param: &str) -> Result<Option<Ordering>, FieldError> {
    let ordering = match value {
        Value::Str(s) => (s.chars().count() as i64).partial_cmp(&parse_int(param)?),
        Value::Collection(n) => (*n as i64).partial_cmp(&parse_int(param)?),
        Value::Int(i) => i.partial_cmp(&parse_int(param)?),
        Value::Uint(u) => u.partial_cmp(&parse_uint(param)?),
        Value::Float(f) => f.partial_cmp(&parse_float(param)?),
        _ => return Err(FieldError::Unsupported),
    };
    Ok(ordering)
}

fn compile(pattern: &str) -> Result<Regex, FieldError> {
    if let Some(re) = PATTERNS.read().get(pattern) {
        return Ok(re.clone());
    }

    let re = Regex::new(pattern).map_err(|_| FieldError::BadParameter)?;
    PATTERNS.write().insert(pattern.to_string(), re.clone());
    Ok(re)
}
