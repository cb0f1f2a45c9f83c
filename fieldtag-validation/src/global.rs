//! Process-wide default validator.
//!
//! The free functions here operate on a shared [`Validator`] built lazily
//! from [`ValidatorConfig::from_env`]. Validation takes a snapshot of the
//! current instance and releases the lock before any rule runs, so rules
//! may call back into [`validate`]. Mutations copy the instance when a
//! snapshot is still in use.
//!
//! Configure the default instance once at startup. Mutating it while
//! other threads validate is memory-safe, but which configuration those
//! validations observe is unspecified.

use crate::{
    ErrorOverride, FieldError, Inspect, RuleFn, ValidateError, ValidationErrors, Validator,
    ValidatorConfig, Value,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static DEFAULT_VALIDATOR: Lazy<RwLock<Arc<Validator>>> =
    Lazy::new(|| RwLock::new(Arc::new(Validator::from_config(ValidatorConfig::from_env()))));

fn snapshot() -> Arc<Validator> {
    DEFAULT_VALIDATOR.read().clone()
}

fn update(f: impl FnOnce(&mut Validator)) {
    let mut guard = DEFAULT_VALIDATOR.write();
    f(Arc::make_mut(&mut guard));
}

/// Change the tag key of the default validator. An empty name is ignored.
pub fn set_tag_name(name: impl Into<String>) {
    let name = name.into();
    update(|v| v.set_tag_name(name));
}

/// Register or override a rule on the default validator.
pub fn set_rule<F>(name: &str, rule: F)
where
    F: Fn(&Value<'_>, &str) -> Result<(), FieldError> + Send + Sync + 'static,
{
    update(|v| v.set_rule(name, rule));
}

/// Register, override or (with `None`) remove a rule on the default validator.
pub fn register_rule(name: &str, rule: Option<RuleFn>) {
    update(|v| v.register_rule(name, rule));
}

/// Remove a rule from the default validator.
pub fn remove_rule(name: &str) -> bool {
    let mut removed = false;
    update(|v| removed = v.remove_rule(name));
    removed
}

/// Merge override messages into the default validator.
pub fn set_overrides<I>(overrides: I)
where
    I: IntoIterator<Item = ErrorOverride>,
{
    update(|v| v.set_overrides(overrides));
}

/// Validate a record with the default validator.
pub fn validate<T>(record: &T) -> Result<ValidationErrors, ValidateError>
where
    T: Inspect + ?Sized,
{
    snapshot().validate(record)
}

/// Run a closure against the current default validator.
pub fn with_default<R>(f: impl FnOnce(&Validator) -> R) -> R {
    f(&snapshot())
}

/// Restore the default validator to its initial configuration.
pub fn reset() {
    *DEFAULT_VALIDATOR.write() = Arc::new(Validator::from_config(ValidatorConfig::from_env()));
}
