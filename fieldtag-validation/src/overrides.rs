// Error message overrides

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Replacement message for one (field, rule) failure.
///
/// The message may contain a single `%v`/`%s` placeholder which receives
/// the rule's raw parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOverride {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl ErrorOverride {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Override templates keyed by field name, then rule name.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<String, HashMap<String, String>>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template for a (field, rule) pair, replacing any earlier one
    pub fn set(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.entries
            .entry(field.into())
            .or_default()
            .insert(rule.into(), message.into());
    }

    /// Merge a batch of overrides; later entries win
    pub fn extend<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = ErrorOverride>,
    {
        for o in overrides {
            tracing::debug!(field = %o.field, rule = %o.rule, "Setting error override");
            self.set(o.field, o.rule, o.message);
        }
    }

    /// Get the template for a (field, rule) pair
    pub fn get(&self, field: &str, rule: &str) -> Option<&str> {
        self.entries
            .get(field)
            .and_then(|rules| rules.get(rule))
            .map(String::as_str)
    }

    /// Number of (field, rule) templates
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Render an override template with the rule's raw parameter.
///
/// Templates without `%` are returned verbatim. Otherwise `%%` becomes `%`,
/// the first `%v` or `%s` becomes the parameter and `%q` the quoted
/// parameter. Any other verb, and verbs after the parameter was used, are
/// left as written.
pub fn render(template: &str, param: &str) -> String {
    if !template.contains('%') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len() + param.len());
    let mut chars = template.chars().peekable();
    let mut consumed = false;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(verb @ ('v' | 's' | 'q')) if !consumed => {
                chars.next();
                consumed = true;
                if verb == 'q' {
                    out.push_str(&format!("{:?}", param));
                } else {
                    out.push_str(param);
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
