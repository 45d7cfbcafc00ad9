//! REST client for the label and contents endpoints.

use std::time::Duration;

use async_trait::async_trait;
use labeler::{
    ConfigSource, ConfigSourceError, IssueNumber, LabelClient, LabelClientError, LabelName,
    RepositoryName, RepositoryOwner,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use crate::GitHubError;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Public GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

/// GitHub REST API client authenticated with a bearer token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: Url,
}

/// Request body for adding labels to an issue.
#[derive(Debug, Serialize)]
struct AddLabelsRequest<'a> {
    labels: [&'a str; 1],
}

impl GitHubClient {
    /// Creates a client for the API at `api_url` (e.g. [`DEFAULT_API_URL`] or a
    /// GitHub Enterprise `https://host/api/v3`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed, the token is not a valid
    /// header value, or the HTTP client cannot be created.
    pub fn new(token: &str, api_url: &str) -> Result<Self, GitHubError> {
        let api_url = Url::parse(api_url).map_err(|_| GitHubError::InvalidUrl {
            url: api_url.to_string(),
        })?;
        if api_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidUrl {
                url: api_url.to_string(),
            });
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| GitHubError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("botamic"));
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, api_url })
    }

    /// Builds `{api_url}/{segments...}`, percent-encoding each segment.
    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, GitHubError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidUrl {
                url: self.api_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn labels_endpoint(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        number: IssueNumber,
    ) -> Result<Url, GitHubError> {
        let number = number.as_u64().to_string();
        self.endpoint([
            "repos",
            owner.as_str(),
            repo.as_str(),
            "issues",
            number.as_str(),
            "labels",
        ])
    }

    /// Adds `label` to the issue or pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or GitHub rejects it.
    pub async fn add_issue_label(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        number: IssueNumber,
        label: &LabelName,
    ) -> Result<(), GitHubError> {
        let url = self.labels_endpoint(owner, repo, number)?;
        debug!(%owner, %repo, %number, %label, "Adding label");

        let response = self
            .client
            .post(url)
            .json(&AddLabelsRequest {
                labels: [label.as_str()],
            })
            .send()
            .await?;

        ensure_success(response).await.map(drop)
    }

    /// Removes `label` from the issue or pull request. A label that is not
    /// present is treated as already removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or GitHub rejects it with any
    /// status other than `404`.
    pub async fn remove_issue_label(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        number: IssueNumber,
        label: &LabelName,
    ) -> Result<(), GitHubError> {
        let mut url = self.labels_endpoint(owner, repo, number)?;
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidUrl {
                url: self.api_url.to_string(),
            })?
            .push(label.as_str());
        debug!(%owner, %repo, %number, %label, "Removing label");

        let response = self.client.delete(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(%owner, %repo, %number, %label, "Label already absent");
            return Ok(());
        }

        ensure_success(response).await.map(drop)
    }

    /// Reads the raw contents of `path` from the repository's default branch.
    ///
    /// Returns `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or GitHub answers with any status
    /// other than success or `404`.
    pub async fn file_contents(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        path: &str,
    ) -> Result<Option<String>, GitHubError> {
        let url = self.endpoint(
            ["repos", owner.as_str(), repo.as_str(), "contents"]
                .into_iter()
                .chain(path.split('/').filter(|s| !s.is_empty())),
        )?;
        debug!(%owner, %repo, path, "Fetching repository file");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        Ok(Some(response.text().await?))
    }
}

/// Passes successful responses through; turns anything else into
/// [`GitHubError::Status`].
async fn ensure_success(response: Response) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GitHubError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl LabelClient for GitHubClient {
    async fn add_label(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        number: IssueNumber,
        label: &LabelName,
    ) -> Result<(), LabelClientError> {
        Ok(self.add_issue_label(owner, repo, number, label).await?)
    }

    async fn remove_label(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        number: IssueNumber,
        label: &LabelName,
    ) -> Result<(), LabelClientError> {
        Ok(self.remove_issue_label(owner, repo, number, label).await?)
    }
}

#[async_trait]
impl ConfigSource for GitHubClient {
    async fn fetch_config(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        path: &str,
    ) -> Result<Option<String>, ConfigSourceError> {
        Ok(self.file_contents(owner, repo, path).await?)
    }
}
