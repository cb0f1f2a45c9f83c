// Validator configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Tag key read from fields when none is configured.
pub const DEFAULT_TAG_NAME: &str = "valid";

/// Environment variable overriding the tag key of the default validator.
pub const TAG_NAME_ENV: &str = "FIELDTAG_TAG_NAME";

/// Validator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Tag key whose rules are evaluated
    pub tag_name: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG_NAME.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Create config from environment variables.
    ///
    /// - `FIELDTAG_TAG_NAME` - tag key to read (default `valid`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var(TAG_NAME_ENV) {
            match normalize_tag_name(&raw) {
                Some(name) => config.tag_name = name,
                None => tracing::warn!(var = TAG_NAME_ENV, "Ignoring empty tag name"),
            }
        }

        config
    }

    /// Set the tag key. An empty name keeps the current one.
    pub fn with_tag_name(mut self, name: impl Into<String>) -> Self {
        if let Some(name) = normalize_tag_name(&name.into()) {
            self.tag_name = name;
        }
        self
    }
}

/// Trim a tag key; blank keys yield `None`.
pub(crate) fn normalize_tag_name(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}
