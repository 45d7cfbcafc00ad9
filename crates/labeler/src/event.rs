//! Inbound webhook events and the labeling target they resolve to.
//!
//! The platform delivers issue and pull request events with overlapping but
//! distinct payload shapes. [`WebhookPayload`] models only the fields the
//! labeler reads; [`EventTarget::resolve`] turns it into a tagged
//! [`EventTarget`] exactly once, at the boundary. A payload that cannot be
//! resolved yields a [`TitleResolutionError`], which callers treat as a no-op.

use serde::{Deserialize, Serialize};

use crate::{IssueNumber, RepositoryName, RepositoryOwner, TitleResolutionError};

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

// ---------------------------------------------------------------------------
// Payload model
// ---------------------------------------------------------------------------

/// The subset of a webhook payload the labeler reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    /// Event action (e.g. `"opened"`).
    #[serde(default)]
    pub action: Option<String>,
    /// Present on `pull_request` events.
    #[serde(default)]
    pub pull_request: Option<SubjectPayload>,
    /// Present on `issues` events.
    #[serde(default)]
    pub issue: Option<SubjectPayload>,
    /// The repository the event belongs to.
    #[serde(default)]
    pub repository: Option<RepositoryPayload>,
}

/// An issue or pull request as it appears in a payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectPayload {
    /// Issue or pull request number.
    pub number: u64,
    /// Current title.
    #[serde(default)]
    pub title: Option<String>,
}

/// A repository as it appears in a payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    /// Repository name without owner.
    pub name: String,
    /// Owning account.
    pub owner: OwnerPayload,
}

/// A repository owner as it appears in a payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    /// Account login.
    pub login: String,
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// Webhook event families the labeler subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// `pull_request` events.
    PullRequest,
    /// `issues` events.
    Issues,
}

impl EventKind {
    /// Maps an `X-GitHub-Event` header value to an event kind.
    pub fn from_header(value: &str) -> Option<Self> {
        match value {
            "pull_request" => Some(Self::PullRequest),
            "issues" => Some(Self::Issues),
            _ => None,
        }
    }
}

/// Actions that may change a title and therefore trigger labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerAction {
    /// The subject was created.
    Opened,
    /// The subject's title or body changed.
    Edited,
    /// A closed subject was reopened.
    Reopened,
}

impl TriggerAction {
    fn from_action(value: &str) -> Option<Self> {
        match value {
            "opened" => Some(Self::Opened),
            "edited" => Some(Self::Edited),
            "reopened" => Some(Self::Reopened),
            _ => None,
        }
    }
}

/// A delivery the labeler should act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trigger {
    /// Which kind of subject the delivery is about.
    pub kind: EventKind,
    /// What happened to the subject.
    pub action: TriggerAction,
}

impl Trigger {
    /// Returns the trigger for an event header and payload action, or `None`
    /// if the labeler ignores this delivery.
    pub fn from_delivery(event: &str, action: Option<&str>) -> Option<Self> {
        Some(Self {
            kind: EventKind::from_header(event)?,
            action: TriggerAction::from_action(action?)?,
        })
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            EventKind::PullRequest => "pull_request",
            EventKind::Issues => "issues",
        };
        let action = match self.action {
            TriggerAction::Opened => "opened",
            TriggerAction::Edited => "edited",
            TriggerAction::Reopened => "reopened",
        };
        write!(f, "{kind}.{action}")
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// The issue or pull request whose labels are being managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub owner: RepositoryOwner,
    pub repo: RepositoryName,
    pub number: IssueNumber,
    pub title: String,
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}{}", self.owner, self.repo, self.number)
    }
}

/// A resolved labeling target, tagged by the kind of subject it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum EventTarget {
    PullRequest(Target),
    Issue(Target),
}

impl EventTarget {
    /// Resolves the labeling target from a payload.
    ///
    /// A `pull_request` subject takes precedence over an `issue` subject.
    ///
    /// # Errors
    ///
    /// Returns [`TitleResolutionError`] when the payload has no subject, the
    /// subject has no title, or the repository is not identified.
    pub fn resolve(payload: &WebhookPayload) -> Result<Self, TitleResolutionError> {
        let (subject, is_pull_request) = match (&payload.pull_request, &payload.issue) {
            (Some(pr), _) => (pr, true),
            (None, Some(issue)) => (issue, false),
            (None, None) => return Err(TitleResolutionError::NoSubject),
        };

        let number = IssueNumber::new(subject.number);
        let title = subject
            .title
            .clone()
            .ok_or(TitleResolutionError::MissingTitle { number })?;

        let repository = payload
            .repository
            .as_ref()
            .ok_or(TitleResolutionError::MissingRepository)?;
        let owner = RepositoryOwner::new(repository.owner.login.as_str())
            .ok_or(TitleResolutionError::MissingRepository)?;
        let repo = RepositoryName::new(repository.name.as_str())
            .ok_or(TitleResolutionError::MissingRepository)?;

        let target = Target {
            owner,
            repo,
            number,
            title,
        };
        Ok(if is_pull_request {
            Self::PullRequest(target)
        } else {
            Self::Issue(target)
        })
    }

    /// The resolved target regardless of subject kind.
    pub fn target(&self) -> &Target {
        match self {
            Self::PullRequest(target) | Self::Issue(target) => target,
        }
    }
}
