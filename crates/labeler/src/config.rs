//! Repository configuration for the labeler.
//!
//! Repositories opt into custom rules with a YAML file (by default
//! `.github/botamic.yml`):
//!
//! ```yaml
//! labeler:
//!   feat:
//!     pattern: "feat:|feat(.*):"
//!     label: "Type: Feature"
//!   fix:
//!     pattern: "fix:|fix(.*):"
//!     label: "Type: Bugfix"
//! ```
//!
//! The `labeler` mapping replaces the built-in rules entirely; keys keep their
//! declaration order. Other top-level keys are ignored so the same file can
//! configure other tools.
//!
//! ## Fallback policy
//!
//! | Situation | Result |
//! |-----------|--------|
//! | File missing | Defaults |
//! | File present, no `labeler` key | Defaults |
//! | File unreadable or malformed | Defaults, logged at `warn` |
//! | A pattern does not compile | Error; the event is not labeled |

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    ConfigError, ConfigSource, LabelName, RepositoryName, RepositoryOwner, Rule, RuleKey, RuleSet,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Repository path the configuration file is read from.
pub const DEFAULT_CONFIG_PATH: &str = ".github/botamic.yml";

/// Top-level document shape. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    labeler: Option<serde_yaml::Value>,
}

/// One entry of the `labeler` mapping, before its pattern is compiled.
/// Fields other than `pattern` and `label` are ignored.
#[derive(Debug, Deserialize)]
struct RuleEntry {
    pattern: String,
    label: String,
}

impl RuleSet {
    /// Parses a configuration document into a rule set.
    ///
    /// Returns `Ok(None)` when the document is empty or declares no
    /// `labeler` section, meaning the caller should use its defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Malformed`] if the YAML is invalid or the `labeler`
    ///   value is not a mapping of keys to `{pattern, label}` entries.
    /// - [`ConfigError::InvalidPattern`] if any pattern fails to compile.
    pub fn from_yaml(text: &str) -> Result<Option<Self>, ConfigError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let document: ConfigDocument =
            serde_yaml::from_str(text).map_err(|e| ConfigError::malformed(e.to_string()))?;

        let labeler = match document.labeler {
            None | Some(serde_yaml::Value::Null) => return Ok(None),
            Some(serde_yaml::Value::Mapping(mapping)) => mapping,
            Some(_) => return Err(ConfigError::malformed("`labeler` must be a mapping")),
        };

        let mut rules = Vec::with_capacity(labeler.len());
        for (key, value) in labeler {
            let key = match key {
                serde_yaml::Value::String(key) => key,
                other => {
                    return Err(ConfigError::malformed(format!(
                        "rule keys must be strings, found {other:?}"
                    )))
                }
            };
            let entry: RuleEntry = serde_yaml::from_value(value)
                .map_err(|e| ConfigError::malformed(format!("rule '{key}': {e}")))?;

            let label = LabelName::new(entry.label)
                .ok_or_else(|| ConfigError::malformed(format!("rule '{key}' has an empty label")))?;
            let rule_key = RuleKey::new(key)
                .ok_or_else(|| ConfigError::malformed("rule keys must not be empty"))?;

            rules.push(Rule::new(rule_key, &entry.pattern, label)?);
        }

        Ok(Some(Self::new(rules)))
    }
}

/// Resolves the rule set in effect for a repository.
///
/// Reads `path` from `source` and falls back to `defaults` according to the
/// policy table in the module documentation.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPattern`] when the repository's configuration
/// declares a pattern that does not compile. No other condition is an error.
pub async fn load_rule_set(
    source: &dyn ConfigSource,
    owner: &RepositoryOwner,
    repo: &RepositoryName,
    path: &str,
    defaults: &RuleSet,
) -> Result<RuleSet, ConfigError> {
    let text = match source.fetch_config(owner, repo, path).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!(%owner, %repo, path, "No labeler configuration; using defaults");
            return Ok(defaults.clone());
        }
        Err(e) => {
            warn!(%owner, %repo, path, error = %e, "Configuration fetch failed; using defaults");
            return Ok(defaults.clone());
        }
    };

    match RuleSet::from_yaml(&text) {
        Ok(Some(rules)) => {
            debug!(%owner, %repo, rules = rules.len(), "Loaded repository rule set");
            Ok(rules)
        }
        Ok(None) => {
            debug!(%owner, %repo, path, "Configuration has no labeler section; using defaults");
            Ok(defaults.clone())
        }
        Err(e @ ConfigError::Malformed { .. }) => {
            warn!(%owner, %repo, path, error = %e, "Malformed labeler configuration; using defaults");
            Ok(defaults.clone())
        }
        Err(e) => Err(e),
    }
}
