// Validation errors

use crate::Kind;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Failure produced by a rule function for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Value is the zero value for its kind
    #[error("not allowed zero")]
    ZeroValue,

    /// Length or exact value mismatch
    #[error("invalid length")]
    Len,

    /// Below the inclusive lower bound
    #[error("less than min")]
    Min,

    /// Above the inclusive upper bound
    #[error("greater than max")]
    Max,

    /// String does not match the pattern
    #[error("regular expression mismatch")]
    Regexp,

    /// Nil pointer or absent value
    #[error("not allowed nil")]
    NilValue,

    /// Value is not one of the allowed entries
    #[error("not allowed out of enum value")]
    Enum,

    /// Rule cannot be applied to the value's kind
    #[error("unsupported type")]
    Unsupported,

    /// Rule parameter could not be coerced or compiled
    #[error("bad parameter")]
    BadParameter,

    /// Message from a custom rule or an override template
    #[error("{0}")]
    Custom(String),
}

impl FieldError {
    /// Create a custom error with the given message
    pub fn custom(message: impl Into<String>) -> Self {
        FieldError::Custom(message.into())
    }

    /// Whether this error comes from a malformed rule parameter rather than
    /// from the field's data.
    pub fn is_bad_parameter(&self) -> bool {
        matches!(self, FieldError::BadParameter)
    }
}

/// Error that aborts validation of a whole record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// Input is not struct-shaped after pointer indirection
    #[error("unsupported validate type: {kind}")]
    NotSupported { kind: Kind },
}

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// Rule that failed
    pub rule: String,

    /// Raw rule parameter
    pub param: String,

    /// Underlying failure, possibly replaced by an override message
    pub error: FieldError,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, rule: impl Into<String>, error: FieldError) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            param: String::new(),
            error,
        }
    }

    /// Set the raw rule parameter
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    /// Error message
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Per-field validation result.
///
/// Holds at most one entry per field, in field declaration order. Fields
/// that passed have no entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of failed fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Record a failure, replacing any earlier entry for the same field
    pub fn add(&mut self, error: ValidationError) {
        match self.errors.iter_mut().find(|e| e.field == error.field) {
            Some(existing) => *existing = error,
            None => self.errors.push(error),
        }
    }

    /// Get the error recorded for a field
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.entry(field).map(|e| &e.error)
    }

    /// Get the full entry recorded for a field
    pub fn entry(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Check whether a field failed
    pub fn contains(&self, field: &str) -> bool {
        self.entry(field).is_some()
    }

    /// Names of failed fields
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Convert into a field name to error map
    pub fn into_map(self) -> HashMap<String, FieldError> {
        self.errors.into_iter().map(|e| (e.field, e.error)).collect()
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "field": e.field,
                    "rule": e.rule,
                    "param": e.param,
                    "message": e.message(),
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::ZeroValue.to_string(), "not allowed zero");
        assert_eq!(FieldError::Max.to_string(), "greater than max");
        assert_eq!(FieldError::custom("age too high").to_string(), "age too high");
        assert!(FieldError::BadParameter.is_bad_parameter());
        assert!(!FieldError::Min.is_bad_parameter());
    }

    #[test]
    fn test_validate_error_message() {
        let err = ValidateError::NotSupported { kind: Kind::Int };
        assert_eq!(err.to_string(), "unsupported validate type: int");
    }

    #[test]
    fn test_one_entry_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("Name", "len", FieldError::Len).with_param("7"));
        errors.add(ValidationError::new("Age", "max", FieldError::Max));
        errors.add(ValidationError::new("Name", "nonzero", FieldError::ZeroValue));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("Name"), Some(&FieldError::ZeroValue));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["Name", "Age"]);
        assert!(!errors.contains("Pics"));
    }

    #[test]
    fn test_to_json() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("Age", "max", FieldError::Max).with_param("24"));

        let json = errors.to_json();
        assert_eq!(json["errors"][0]["field"], "Age");
        assert_eq!(json["errors"][0]["rule"], "max");
        assert_eq!(json["errors"][0]["param"], "24");
        assert_eq!(json["errors"][0]["message"], "greater than max");
    }

    #[test]
    fn test_display() {
        let error = ValidationError::new("Pics", "min", FieldError::Min);
        assert_eq!(error.to_string(), "Pics: less than min");
        assert_eq!(error.message(), "less than min");
    }
}
