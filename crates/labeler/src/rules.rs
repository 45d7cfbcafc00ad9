//! Title-matching rules.
//!
//! A [`Rule`] pairs a compiled regular expression with the label it applies.
//! A [`RuleSet`] is the ordered collection of rules in effect for one
//! repository. Patterns are compiled once, when the rule is constructed, so an
//! invalid pattern is reported at load time rather than while an event is
//! being handled.
//!
//! Matching is unanchored and case-sensitive: a rule fires when its pattern
//! matches anywhere in the title.

use regex::Regex;

use crate::{ConfigError, LabelName, RuleKey};

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;

/// Built-in rules, in evaluation order: `(key, label)`.
///
/// Each key becomes the conventional-commit prefix pattern `"<key>:|<key>(.*):"`.
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("feat", "Type: Feature"),
    ("fix", "Type: Bugfix"),
    ("polish", "Type: Polish"),
    ("docs", "Type: Documentation"),
    ("style", "Type: Style"),
    ("refactor", "Type: Refactor"),
    ("perf", "Type: Performance"),
    ("test", "Type: Test"),
    ("workflow", "Type: Workflow"),
    ("ci", "Type: Continuous Integration"),
    ("chore", "Type: Chore"),
    ("types", "Type: Types"),
    ("release", "Type: Release"),
];

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A single `{pattern, label}` pair declared under a key.
#[derive(Debug, Clone)]
pub struct Rule {
    key: RuleKey,
    pattern: Regex,
    label: LabelName,
}

impl Rule {
    /// Compiles `pattern` and builds the rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if `pattern` is not a valid
    /// regular expression.
    pub fn new(key: RuleKey, pattern: &str, label: LabelName) -> Result<Self, ConfigError> {
        let compiled = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            key: key.to_string(),
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            key,
            pattern: compiled,
            label,
        })
    }

    /// The configuration key this rule was declared under.
    pub fn key(&self) -> &RuleKey {
        &self.key
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The label applied when the pattern matches.
    pub fn label(&self) -> &LabelName {
        &self.label
    }

    /// Returns `true` if the pattern matches anywhere in `title`.
    pub fn matches(&self, title: &str) -> bool {
        self.pattern.is_match(title)
    }
}

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// The ordered rules in effect for one repository.
///
/// Iteration order is declaration order. It determines the order of matched
/// labels and of removal candidates.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set from already-compiled rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in rule set used when a repository has no configuration.
    pub fn defaults() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .filter_map(|(key, label)| {
                let pattern = format!("{key}:|{key}(.*):");
                Rule::new(RuleKey::new(*key)?, &pattern, LabelName::new(*label)?).ok()
            })
            .collect();
        Self { rules }
    }

    /// Iterates over the rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the set declares no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Lazily yields the label of every rule whose pattern matches `title`.
    ///
    /// Labels are produced in rule order, one per matching rule.
    pub fn classify<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a LabelName> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.matches(title))
            .map(Rule::label)
    }

    /// The distinct labels declared by this set, first occurrence first.
    pub fn labels(&self) -> Vec<&LabelName> {
        let mut seen: Vec<&LabelName> = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            if !seen.contains(&rule.label()) {
                seen.push(rule.label());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
