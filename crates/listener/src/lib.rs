//! Botamic trigger event source infrastructure.
//!
//! Receives GitHub webhook deliveries over HTTP and hands every triggering
//! event to the [`labeler::TitleLabeler`]:
//!
//! 1. Verify `X-Hub-Signature-256` (when a secret is configured).
//! 2. Read `X-GitHub-Event` and parse the JSON payload.
//! 3. Keep only `pull_request` / `issues` deliveries with action `opened`,
//!    `edited` or `reopened`.
//! 4. Resolve the [`labeler::EventTarget`]; unresolvable payloads are
//!    acknowledged and skipped without any API call.
//!
//! ## Responses
//!
//! | Situation | Status | `status` field |
//! |-----------|--------|----------------|
//! | Bad or missing signature | 401 | `error` |
//! | Missing event header, unparsable body | 400 | `error` |
//! | `ping` | 200 | `pong` |
//! | Event not subscribed | 202 | `ignored` |
//! | No labeling target | 202 | `skipped` |
//! | Repository rules invalid | 422 | `error` |
//! | Labeled (including partial intent failures) | 200 | `labeled` |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Transport details, signature checks and payload
//! deserialization live here. The [`labeler`] crate sees only resolved
//! [`labeler::EventTarget`] values.

pub mod errors;
pub mod server;
pub mod signature;

pub use errors::ListenerError;
pub use server::{build_router, serve, WebhookState, WEBHOOK_PATH};
pub use signature::verify_signature;
