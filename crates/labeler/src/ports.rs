//! Port traits implemented by infrastructure crates.
//!
//! The labeling domain never talks to the platform directly. It depends on
//! two narrow contracts:
//!
//! - [`LabelClient`] — add or remove one label on one issue or pull request.
//! - [`ConfigSource`] — read a repository's configuration file.
//!
//! Both are object-safe so the composition root can inject them behind `Arc<dyn _>`.

use async_trait::async_trait;

use crate::{
    ConfigSourceError, IssueNumber, LabelClientError, LabelName, RepositoryName, RepositoryOwner,
};

/// Mutates the labels of an issue or pull request on the platform.
#[async_trait]
pub trait LabelClient: Send + Sync {
    /// Adds `label` to the target. Adding a label that is already present
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`LabelClientError`] if the platform rejects the request or
    /// cannot be reached.
    async fn add_label(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        number: IssueNumber,
        label: &LabelName,
    ) -> Result<(), LabelClientError>;

    /// Removes `label` from the target. Removing a label that is not present
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`LabelClientError`] if the platform rejects the request or
    /// cannot be reached.
    async fn remove_label(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        number: IssueNumber,
        label: &LabelName,
    ) -> Result<(), LabelClientError>;
}

/// Reads configuration files from a repository's default branch.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Returns the contents of `path`, or `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigSourceError`] if the file exists but could not be read.
    async fn fetch_config(
        &self,
        owner: &RepositoryOwner,
        repo: &RepositoryName,
        path: &str,
    ) -> Result<Option<String>, ConfigSourceError>;
}
