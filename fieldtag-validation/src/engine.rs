// Validation engine

use crate::config::normalize_tag_name;
use crate::overrides::render;
use crate::{
    ErrorOverride, Field, FieldError, Inspect, OverrideTable, RuleFn, RuleRegistry,
    ValidateError, ValidationError, ValidationErrors, ValidatorConfig, Value, tag,
};

/// Evaluates field tags against a rule registry.
///
/// Each validator owns its tag key, rules and override messages, so
/// independent instances never observe each other's configuration.
#[derive(Debug, Clone)]
pub struct Validator {
    tag_name: String,
    rules: RuleRegistry,
    overrides: OverrideTable,
}

impl Validator {
    /// Create a validator reading the `valid` tag with the built-in rules
    pub fn new() -> Self {
        Self::from_config(ValidatorConfig::default())
    }

    /// Create validator from configuration
    pub fn from_config(config: ValidatorConfig) -> Self {
        Self {
            tag_name: config.tag_name,
            rules: RuleRegistry::new(),
            overrides: OverrideTable::new(),
        }
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Change the tag key. Surrounding whitespace is trimmed and a blank
    /// name is ignored.
    pub fn set_tag_name(&mut self, name: impl Into<String>) {
        if let Some(name) = normalize_tag_name(&name.into()) {
            self.tag_name = name;
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Register or override a rule
    pub fn set_rule<F>(&mut self, name: &str, rule: F)
    where
        F: Fn(&Value<'_>, &str) -> Result<(), FieldError> + Send + Sync + 'static,
    {
        self.rules.set(name, rule);
    }

    /// Register, override or (with `None`) remove a rule
    pub fn register_rule(&mut self, name: &str, rule: Option<RuleFn>) {
        self.rules.register(name, rule);
    }

    pub fn remove_rule(&mut self, name: &str) -> bool {
        self.rules.remove(name)
    }

    /// Merge override messages; later entries for the same pair win
    pub fn set_overrides<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = ErrorOverride>,
    {
        self.overrides.extend(overrides);
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleRegistry {
        &mut self.rules
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Validate a record.
    ///
    /// Pointers are followed until a concrete value is reached; anything
    /// other than a record is rejected as a whole. On success the result
    /// holds one entry per failed field.
    pub fn validate<T>(&self, record: &T) -> Result<ValidationErrors, ValidateError>
    where
        T: Inspect + ?Sized,
    {
        self.validate_value(&record.to_value())
    }

    /// Validate an already inspected value
    pub fn validate_value(&self, value: &Value<'_>) -> Result<ValidationErrors, ValidateError> {
        let mut current = value;
        while let Value::Pointer(Some(target)) = current {
            current = &**target;
        }

        let record = match current {
            Value::Struct(record) => *record,
            other => {
                tracing::debug!(kind = %other.kind(), "Rejecting non-record input");
                return Err(ValidateError::NotSupported { kind: other.kind() });
            }
        };

        let mut errors = ValidationErrors::new();
        for field in record.fields() {
            if let Some(error) = self.validate_field(&field) {
                errors.add(error);
            }
        }

        tracing::trace!(
            record = record.record_name(),
            failed = errors.len(),
            "Record validated"
        );
        Ok(errors)
    }

    /// Evaluate one field's rules in declaration order, stopping at the
    /// first failure.
    pub fn validate_field(&self, field: &Field<'_>) -> Option<ValidationError> {
        let tag = field.tag(&self.tag_name).unwrap_or_default();
        if tag.is_empty() {
            return None;
        }

        for spec in tag::parse(tag) {
            let Some(rule) = self.rules.get(spec.name) else {
                tracing::debug!(field = field.name, rule = spec.name, "Skipping unknown rule");
                continue;
            };

            tracing::trace!(field = field.name, rule = %spec, "Evaluating rule");
            if let Err(error) = rule(&field.value, spec.param) {
                let template = self.overrides.get(field.name, spec.name);
                let error = match template {
                    Some(template) => FieldError::Custom(render(template, spec.param)),
                    None => error,
                };
                tracing::debug!(
                    field = field.name,
                    rule = spec.name,
                    overridden = template.is_some(),
                    error = %error,
                    "Rule failed"
                );
                return Some(
                    ValidationError::new(field.name, spec.name, error).with_param(spec.param),
                );
            }
        }

        None
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Validator`]
#[derive(Debug, Clone, Default)]
pub struct ValidatorBuilder {
    validator: Validator,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag key
    pub fn tag_name(mut self, name: impl Into<String>) -> Self {
        self.validator.set_tag_name(name);
        self
    }

    /// Register or override a rule
    pub fn rule<F>(mut self, name: &str, rule: F) -> Self
    where
        F: Fn(&Value<'_>, &str) -> Result<(), FieldError> + Send + Sync + 'static,
    {
        self.validator.set_rule(name, rule);
        self
    }

    /// Remove a rule, built-in or custom
    pub fn without_rule(mut self, name: &str) -> Self {
        self.validator.remove_rule(name);
        self
    }

    /// Add one override message
    pub fn override_message(
        mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.validator
            .set_overrides([ErrorOverride::new(field, rule, message)]);
        self
    }

    /// Add a batch of override messages
    pub fn overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = ErrorOverride>,
    {
        self.validator.set_overrides(overrides);
        self
    }

    pub fn build(self) -> Validator {
        self.validator
    }
}
