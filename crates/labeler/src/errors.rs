//! Error types for the Botamic labeling domain.
//!
//! [`LabelerError`] covers the conditions that abort the handling of a single
//! event. Everything else is recovered locally:
//!
//! - [`ConfigError::Malformed`] and [`ConfigSourceError`] fall back to the
//!   default rule set.
//! - [`LabelClientError`] is recorded in the intent outcome and never stops
//!   sibling intents.
//! - [`TitleResolutionError`] turns the event into a no-op.
//!
//! Only [`ConfigError::InvalidPattern`] escalates: a repository that declares
//! a pattern which does not compile gets no label changes at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::IssueNumber;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors produced while turning a configuration document into a rule set.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The document is not valid YAML or does not have the expected shape.
    #[error("Malformed labeler configuration: {message}")]
    Malformed {
        /// Description of the shape problem.
        message: String,
    },

    /// A rule's pattern is not a valid regular expression.
    #[error("Invalid pattern for rule '{key}': {pattern}")]
    InvalidPattern {
        /// The configuration key of the offending rule.
        key: String,
        /// The pattern source as written in the configuration.
        pattern: String,
        /// The regex compiler's diagnostic.
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failure of a single add/remove label call against the platform.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LabelClientError {
    /// The platform answered with a non-success status.
    #[error("Label request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code returned by the platform.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("Label request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
}

/// Failure to retrieve the repository's configuration file.
///
/// A missing file is not an error; sources report it as `Ok(None)`.
#[derive(Debug, Clone, Error)]
#[error("Configuration source unavailable: {message}")]
pub struct ConfigSourceError {
    /// Description of the retrieval failure.
    pub message: String,
}

impl ConfigSourceError {
    /// Creates a [`ConfigSourceError`] from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Event errors
// ---------------------------------------------------------------------------

/// Why an inbound payload could not be turned into a labeling target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleResolutionError {
    /// The payload carries neither a `pull_request` nor an `issue`.
    #[error("Payload has neither a pull request nor an issue")]
    NoSubject,

    /// The subject exists but has no title.
    #[error("Subject {number} has no title")]
    MissingTitle {
        /// Number of the untitled subject.
        number: IssueNumber,
    },

    /// The payload does not identify the owning repository.
    #[error("Payload does not identify a repository")]
    MissingRepository,
}

// ---------------------------------------------------------------------------
// Event-level errors
// ---------------------------------------------------------------------------

/// Errors that abort the handling of one event.
#[derive(Debug, Error)]
pub enum LabelerError {
    /// The repository's rule set could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
