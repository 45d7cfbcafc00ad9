//! The title labeler service.
//!
//! [`TitleLabeler`] drives one stateless pass per event:
//! `load rules → classify title → plan intents → execute intents`.
//!
//! Execution is best-effort. The `Add` intent is issued first; the `Remove`
//! intents are independent of each other and are issued concurrently. Every
//! failure is captured in its [`IntentOutcome`] and never prevents sibling
//! intents from being attempted.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{load_rule_set, DEFAULT_CONFIG_PATH};
use crate::{
    plan_intents, ConfigSource, EventTarget, IntentOutcome, LabelClient, LabelIntent, LabelName,
    LabelerError, LabelingReport, RuleSet, Target, Timestamp,
};

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

/// Applies a categorizing label to issues and pull requests based on their title.
pub struct TitleLabeler {
    labels: Arc<dyn LabelClient>,
    config: Arc<dyn ConfigSource>,
    config_path: String,
    defaults: RuleSet,
}

impl TitleLabeler {
    /// Creates a labeler that reads repository configuration from
    /// [`DEFAULT_CONFIG_PATH`] and falls back to [`RuleSet::defaults`].
    pub fn new(labels: Arc<dyn LabelClient>, config: Arc<dyn ConfigSource>) -> Self {
        Self {
            labels,
            config,
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            defaults: RuleSet::defaults(),
        }
    }

    /// Overrides the repository path configuration is read from.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<String>) -> Self {
        self.config_path = path.into();
        self
    }

    /// Overrides the rule set used when a repository has no configuration.
    #[must_use]
    pub fn with_defaults(mut self, defaults: RuleSet) -> Self {
        self.defaults = defaults;
        self
    }

    /// Handles one resolved event: labels the target according to the rules
    /// in effect for its repository.
    ///
    /// Every matching rule fires, in rule order, each with its own removal
    /// pass.
    ///
    /// # Errors
    ///
    /// Returns [`LabelerError::Config`] if the repository declares a pattern
    /// that does not compile. No remote call is made in that case.
    #[instrument(skip_all, fields(subject = %event.target()))]
    pub async fn handle(&self, event: &EventTarget) -> Result<LabelingReport, LabelerError> {
        let started_at = Timestamp::now();
        let target = event.target();

        let rules = load_rule_set(
            self.config.as_ref(),
            &target.owner,
            &target.repo,
            &self.config_path,
            &self.defaults,
        )
        .await
        .inspect_err(|e| error!(error = %e, "Repository rule set is invalid; skipping event"))?;

        let matched: Vec<LabelName> = rules.classify(&target.title).cloned().collect();
        if matched.is_empty() {
            debug!(title = %target.title, "Title matched no rule");
        }

        let mut outcomes = Vec::new();
        for label in &matched {
            outcomes.extend(self.apply_label(target, &rules, label).await);
        }

        let report = LabelingReport {
            target: target.clone(),
            matched,
            outcomes,
            started_at,
        };
        info!(
            matched = report.matched.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            started_at = %report.started_at,
            "Labeling complete"
        );
        Ok(report)
    }

    /// Makes `chosen` the active label of `target`: adds it, then removes
    /// every other label declared by `rules`.
    ///
    /// Always returns one outcome per planned intent, `Add` first.
    pub async fn apply_label(
        &self,
        target: &Target,
        rules: &RuleSet,
        chosen: &LabelName,
    ) -> Vec<IntentOutcome> {
        let mut plan = plan_intents(target, rules, chosen).into_iter();

        let mut outcomes = Vec::with_capacity(plan.len());
        if let Some(add) = plan.next() {
            outcomes.push(self.execute(add).await);
        }
        outcomes.extend(join_all(plan.map(|intent| self.execute(intent))).await);
        outcomes
    }

    async fn execute(&self, intent: LabelIntent) -> IntentOutcome {
        let result = match &intent {
            LabelIntent::Add { target, label } => {
                self.labels
                    .add_label(&target.owner, &target.repo, target.number, label)
                    .await
            }
            LabelIntent::Remove { target, label } => {
                self.labels
                    .remove_label(&target.owner, &target.repo, target.number, label)
                    .await
            }
        };

        match &result {
            Ok(()) => debug!(%intent, "Label intent applied"),
            Err(e) => warn!(%intent, error = %e, "Label intent failed; continuing"),
        }
        IntentOutcome { intent, result }
    }
}
