//! Botamic GitHub infrastructure adapter.
//!
//! Implements the port traits defined in the [`labeler`] crate
//! ([`labeler::LabelClient`], [`labeler::ConfigSource`]) on top of the GitHub
//! REST API using `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! URL construction, authentication headers, status-code interpretation and
//! transport errors are handled here; the [`labeler`] crate never sees them.
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | Add label | `POST /repos/{owner}/{repo}/issues/{number}/labels` |
//! | Remove label | `DELETE /repos/{owner}/{repo}/issues/{number}/labels/{name}` |
//! | Read config | `GET /repos/{owner}/{repo}/contents/{path}` (raw media type) |
//!
//! A `404` from the remove and contents endpoints is not an error: the label
//! was already absent, or the repository has no configuration file.

pub mod client;
pub mod errors;

pub use client::{GitHubClient, DEFAULT_API_URL};
pub use errors::GitHubError;
