use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::{ConfigSourceError, IssueNumber, LabelClientError, RepositoryName, RepositoryOwner};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Add(String),
    Remove(String),
}

/// Records every call; fails calls whose label is listed in `failing`.
#[derive(Default)]
struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    failing: Vec<&'static str>,
}

impl RecordingClient {
    fn failing(labels: &[&'static str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: labels.to_vec(),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, call: Call, label: &LabelName) -> Result<(), LabelClientError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(&label.as_str()) {
            Err(LabelClientError::Rejected {
                status: 422,
                message: "Validation Failed".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LabelClient for RecordingClient {
    async fn add_label(
        &self,
        _owner: &RepositoryOwner,
        _repo: &RepositoryName,
        _number: IssueNumber,
        label: &LabelName,
    ) -> Result<(), LabelClientError> {
        self.respond(Call::Add(label.to_string()), label)
    }

    async fn remove_label(
        &self,
        _owner: &RepositoryOwner,
        _repo: &RepositoryName,
        _number: IssueNumber,
        label: &LabelName,
    ) -> Result<(), LabelClientError> {
        self.respond(Call::Remove(label.to_string()), label)
    }
}

struct StaticConfig(Option<&'static str>);

#[async_trait]
impl ConfigSource for StaticConfig {
    async fn fetch_config(
        &self,
        _owner: &RepositoryOwner,
        _repo: &RepositoryName,
        _path: &str,
    ) -> Result<Option<String>, ConfigSourceError> {
        Ok(self.0.map(str::to_string))
    }
}

fn labeler(client: &Arc<RecordingClient>, config: Option<&'static str>) -> TitleLabeler {
    TitleLabeler::new(client.clone(), Arc::new(StaticConfig(config)))
}

fn pull_request(title: &str) -> EventTarget {
    EventTarget::PullRequest(Target {
        owner: RepositoryOwner::new("octo-org").unwrap(),
        repo: RepositoryName::new("octo-repo").unwrap(),
        number: IssueNumber::new(7),
        title: title.to_string(),
    })
}

fn label(name: &str) -> LabelName {
    LabelName::new(name).unwrap()
}

fn adds(calls: &[Call]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::Add(l) => Some(l.as_str()),
            Call::Remove(_) => None,
        })
        .collect()
}

fn removes(calls: &[Call]) -> Vec<&str> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::Remove(l) => Some(l.as_str()),
            Call::Add(_) => None,
        })
        .collect()
}

const OVERLAPPING: &str = r#"
labeler:
  feat:
    pattern: "feat"
    label: "Type: Feature"
  docs:
    pattern: "docs"
    label: "Type: Documentation"
  fix:
    pattern: "fix"
    label: "Type: Bugfix"
"#;

// ---------------------------------------------------------------------------
// handle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_feature_title_adds_feature_and_removes_the_other_twelve() {
    let client = Arc::new(RecordingClient::default());
    let report = labeler(&client, None)
        .handle(&pull_request("feat: add dark mode"))
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls[0], Call::Add("Type: Feature".to_string()));
    assert_eq!(adds(&calls), ["Type: Feature"]);

    let removed = removes(&calls);
    assert_eq!(removed.len(), 12);
    assert!(!removed.contains(&"Type: Feature"));
    assert!(removed.contains(&"Type: Release"));

    assert_eq!(report.matched, [label("Type: Feature")]);
    assert_eq!(report.succeeded(), 13);
    assert_eq!(report.failed(), 0);
}

#[tokio::test]
async fn test_unprefixed_title_makes_no_calls() {
    let client = Arc::new(RecordingClient::default());
    let report = labeler(&client, None)
        .handle(&pull_request("update readme"))
        .await
        .unwrap();

    assert!(client.calls().is_empty());
    assert!(report.matched.is_empty());
    assert!(report.outcomes.is_empty());
}

#[tokio::test]
async fn test_scoped_fix_title_adds_bugfix() {
    let client = Arc::new(RecordingClient::default());
    labeler(&client, None)
        .handle(&pull_request("fix(core): null pointer"))
        .await
        .unwrap();

    assert_eq!(adds(&client.calls()), ["Type: Bugfix"]);
}

#[tokio::test]
async fn test_issue_targets_are_labeled_like_pull_requests() {
    let client = Arc::new(RecordingClient::default());
    let event = EventTarget::Issue(pull_request("docs: typo").target().clone());
    labeler(&client, None).handle(&event).await.unwrap();

    assert_eq!(adds(&client.calls()), ["Type: Documentation"]);
}

#[tokio::test]
async fn test_overlapping_rules_each_fire_with_their_own_removal_pass() {
    let client = Arc::new(RecordingClient::default());
    let report = labeler(&client, Some(OVERLAPPING))
        .handle(&pull_request("feat: docs for the new flag"))
        .await
        .unwrap();

    assert_eq!(
        report.matched,
        [label("Type: Feature"), label("Type: Documentation")]
    );
    assert_eq!(
        client.calls(),
        [
            Call::Add("Type: Feature".to_string()),
            Call::Remove("Type: Documentation".to_string()),
            Call::Remove("Type: Bugfix".to_string()),
            Call::Add("Type: Documentation".to_string()),
            Call::Remove("Type: Feature".to_string()),
            Call::Remove("Type: Bugfix".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_invalid_repository_pattern_aborts_without_calls() {
    let client = Arc::new(RecordingClient::default());
    let result = labeler(
        &client,
        Some("labeler:\n  feat:\n    pattern: \"feat(\"\n    label: F\n"),
    )
    .handle(&pull_request("feat: anything"))
    .await;

    assert!(matches!(
        result,
        Err(LabelerError::Config(crate::ConfigError::InvalidPattern { .. }))
    ));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_custom_defaults_apply_when_repository_has_no_config() {
    let client = Arc::new(RecordingClient::default());
    let defaults = RuleSet::from_yaml(OVERLAPPING).unwrap().unwrap();
    labeler(&client, None)
        .with_defaults(defaults)
        .handle(&pull_request("fix things"))
        .await
        .unwrap();

    assert_eq!(adds(&client.calls()), ["Type: Bugfix"]);
    assert_eq!(removes(&client.calls()).len(), 2);
}

// ---------------------------------------------------------------------------
// apply_label
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_failed_intents_do_not_stop_siblings() {
    let client = Arc::new(RecordingClient::failing(&["Type: Feature", "Type: Bugfix"]));
    let rules = RuleSet::defaults();
    let target = pull_request("feat: x").target().clone();

    let outcomes = labeler(&client, None)
        .apply_label(&target, &rules, &label("Type: Feature"))
        .await;

    assert_eq!(outcomes.len(), 13);
    assert_eq!(client.calls().len(), 13);
    assert!(outcomes[0].intent.is_add());
    assert!(!outcomes[0].is_success());
    assert_eq!(outcomes.iter().filter(|o| !o.is_success()).count(), 2);
}

#[tokio::test]
async fn test_apply_label_twice_issues_the_same_intents() {
    let client = Arc::new(RecordingClient::default());
    let labeler = labeler(&client, None);
    let rules = RuleSet::defaults();
    let target = pull_request("fix: x").target().clone();

    let first = labeler
        .apply_label(&target, &rules, &label("Type: Bugfix"))
        .await;
    let second = labeler
        .apply_label(&target, &rules, &label("Type: Bugfix"))
        .await;

    let first: Vec<&LabelIntent> = first.iter().map(|o| &o.intent).collect();
    let second: Vec<&LabelIntent> = second.iter().map(|o| &o.intent).collect();
    assert_eq!(first, second);
}
