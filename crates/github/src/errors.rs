//! Error type for the GitHub adapter and its mapping onto domain port errors.

use labeler::{ConfigSourceError, LabelClientError};
use thiserror::Error;

/// Failures talking to the GitHub REST API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The configured API base URL cannot be used to build request URLs.
    #[error("Invalid GitHub API URL: {url}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
    },

    /// The token contains characters that are not valid in an HTTP header.
    #[error("GitHub token is not a valid header value")]
    InvalidToken,

    /// The request could not be sent or the response could not be read.
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with an unexpected status.
    #[error("GitHub API error: {status} - {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },
}

impl From<GitHubError> for LabelClientError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::Status { status, body } => Self::Rejected {
                status,
                message: body,
            },
            other => Self::Transport {
                message: other.to_string(),
            },
        }
    }
}

impl From<GitHubError> for ConfigSourceError {
    fn from(err: GitHubError) -> Self {
        Self::new(err.to_string())
    }
}
