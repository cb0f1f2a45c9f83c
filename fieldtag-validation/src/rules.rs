// Rule registry

use crate::validators::BUILTIN_RULES;
use crate::{FieldError, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A rule function: inspects a field value against a raw parameter.
pub type RuleFn = Arc<dyn Fn(&Value<'_>, &str) -> Result<(), FieldError> + Send + Sync>;

/// Mapping from rule name to rule function.
///
/// Names are matched exactly. The last registration for a name wins.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleFn>,
}

impl RuleRegistry {
    /// Create a registry seeded with the built-in rules
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (name, rule) in BUILTIN_RULES {
            let rule: RuleFn = Arc::new(rule);
            registry.rules.insert(name.to_string(), rule);
        }
        registry
    }

    /// Create a registry without any rules
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Register, override or remove a rule.
    ///
    /// An empty name is ignored and `None` removes the entry.
    pub fn register(&mut self, name: &str, rule: Option<RuleFn>) {
        if name.is_empty() {
            return;
        }
        match rule {
            Some(rule) => {
                tracing::debug!(rule = %name, "Registering rule");
                self.rules.insert(name.to_string(), rule);
            }
            None => {
                tracing::debug!(rule = %name, "Removing rule");
                self.rules.remove(name);
            }
        }
    }

    /// Register a rule from a closure
    pub fn set<F>(&mut self, name: &str, rule: F)
    where
        F: Fn(&Value<'_>, &str) -> Result<(), FieldError> + Send + Sync + 'static,
    {
        let rule: RuleFn = Arc::new(rule);
        self.register(name, Some(rule));
    }

    /// Remove a rule, returning whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        let existed = self.rules.contains_key(name);
        self.register(name, None);
        existed
    }

    /// Resolve a rule by name
    pub fn get(&self, name: &str) -> Option<&RuleFn> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_builtins() {
        let registry = RuleRegistry::new();
        assert_eq!(registry.len(), 7);
        assert_eq!(
            registry.names(),
            vec!["enum", "len", "max", "min", "nonnil", "nonzero", "regex"]
        );
        assert!(RuleRegistry::empty().is_empty());
    }

    #[test]
    fn test_register_and_override() {
        let mut registry = RuleRegistry::new();
        registry.set("even", |value, _| match value.as_i64() {
            Some(i) if i % 2 == 0 => Ok(()),
            _ => Err(FieldError::custom("not even")),
        });
        let even = registry.get("even").unwrap();
        assert!(even(&Value::Int(2), "").is_ok());
        assert!(even(&Value::Int(3), "").is_err());

        // override a built-in
        registry.set("nonzero", |_, _| Ok(()));
        let nonzero = registry.get("nonzero").unwrap();
        assert!(nonzero(&Value::Str(""), "").is_ok());
    }

    #[test]
    fn test_register_none_removes() {
        let mut registry = RuleRegistry::new();
        registry.register("min", None);
        assert!(!registry.contains("min"));
        assert!(!registry.remove("min"));
        assert!(registry.remove("max"));
    }

    #[test]
    fn test_empty_name_is_ignored() {
        let mut registry = RuleRegistry::empty();
        registry.set("", |_, _| Ok(()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let registry = RuleRegistry::new();
        assert!(registry.get("Min").is_none());
        assert!(registry.get("min").is_some());
    }
}
