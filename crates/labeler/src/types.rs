//! Shared value types for the labeling domain.
//!
//! A [`LabelIntent`] is one label mutation the labeler wants the platform to
//! perform. Intents are ephemeral: they exist for the duration of a single
//! event handling and are never persisted. Each executed intent produces an
//! [`IntentOutcome`]; the outcomes of one event are collected in a
//! [`LabelingReport`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{LabelClientError, LabelName, RuleSet, Target};

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// A single label mutation against one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LabelIntent {
    /// Add `label` to `target`.
    Add {
        /// Issue or pull request being labeled.
        target: Target,
        /// Label to add.
        label: LabelName,
    },
    /// Remove `label` from `target`.
    Remove {
        /// Issue or pull request being labeled.
        target: Target,
        /// Label to remove.
        label: LabelName,
    },
}

impl LabelIntent {
    /// The label this intent acts on.
    pub fn label(&self) -> &LabelName {
        match self {
            Self::Add { label, .. } | Self::Remove { label, .. } => label,
        }
    }

    /// The target this intent acts on.
    pub fn target(&self) -> &Target {
        match self {
            Self::Add { target, .. } | Self::Remove { target, .. } => target,
        }
    }

    /// Returns `true` for [`LabelIntent::Add`].
    pub fn is_add(&self) -> bool {
        matches!(self, Self::Add { .. })
    }
}

impl std::fmt::Display for LabelIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add { target, label } => write!(f, "add '{label}' to {target}"),
            Self::Remove { target, label } => write!(f, "remove '{label}' from {target}"),
        }
    }
}

/// Plans the intents that make `chosen` the active label of `target`.
///
/// Produces exactly one [`LabelIntent::Add`] for `chosen`, followed by one
/// [`LabelIntent::Remove`] for every other distinct label in `rules`, in rule
/// order. The plan depends only on its inputs, so planning the same label
/// twice yields the same intents.
pub fn plan_intents(target: &Target, rules: &RuleSet, chosen: &LabelName) -> Vec<LabelIntent> {
    let add = LabelIntent::Add {
        target: target.clone(),
        label: chosen.clone(),
    };
    let removes = rules
        .labels()
        .into_iter()
        .filter(|label| *label != chosen)
        .map(|label| LabelIntent::Remove {
            target: target.clone(),
            label: label.clone(),
        });

    std::iter::once(add).chain(removes).collect()
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// The result of executing one [`LabelIntent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentOutcome {
    /// The intent that was attempted.
    pub intent: LabelIntent,
    /// `Ok` if the platform accepted the mutation.
    pub result: Result<(), LabelClientError>,
}

impl IntentOutcome {
    /// Returns `true` if the platform accepted the mutation.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything the labeler did for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelingReport {
    /// The issue or pull request that was labeled.
    pub target: Target,
    /// Labels whose rules matched the title, in rule order.
    pub matched: Vec<LabelName>,
    /// Outcome of every executed intent, in issue order.
    pub outcomes: Vec<IntentOutcome>,
    /// When handling started.
    pub started_at: Timestamp,
}

impl LabelingReport {
    /// Number of intents the platform accepted.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of intents that failed. Failures never abort sibling intents.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
