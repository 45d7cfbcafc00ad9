//! Core labeling domain for Botamic.
//!
//! Botamic watches issues and pull requests and applies one categorizing
//! label from a configurable set, based on the title. This crate contains
//! every domain concept used for that: identifiers, rules, the repository
//! configuration schema, event targets, label intents, and the
//! [`TitleLabeler`] service. Infrastructure crates implement the port traits
//! defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`LabelName`, `IssueNumber`, etc.) |
//! | [`rules`] | `Rule`, `RuleSet`, the built-in defaults, title classification |
//! | [`config`] | Repository configuration parsing and fallback policy |
//! | [`event`] | Webhook payload model and `EventTarget` resolution |
//! | [`types`] | Label intents, outcomes, and reports |
//! | [`ports`] | `LabelClient` and `ConfigSource` traits |
//! | [`service`] | The `TitleLabeler` orchestration |
//! | [`errors`] | Error types |

pub mod config;
pub mod errors;
pub mod event;
pub mod identifiers;
pub mod ports;
pub mod rules;
pub mod service;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{load_rule_set, DEFAULT_CONFIG_PATH};
pub use errors::{
    ConfigError, ConfigSourceError, LabelClientError, LabelerError, TitleResolutionError,
};
pub use event::{EventKind, EventTarget, Target, Trigger, TriggerAction, WebhookPayload};
pub use identifiers::{
    DeliveryId, IssueNumber, LabelName, RepositoryName, RepositoryOwner, RuleKey,
};
pub use ports::{ConfigSource, LabelClient};
pub use rules::{Rule, RuleSet};
pub use service::TitleLabeler;
pub use types::{plan_intents, IntentOutcome, LabelIntent, LabelingReport, Timestamp};
