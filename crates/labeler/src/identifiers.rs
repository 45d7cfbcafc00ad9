//! Newtype domain identifiers.
//!
//! Every value that names something on the hosting platform is represented as
//! a distinct newtype wrapping a primitive. This prevents accidentally passing
//! a [`RepositoryName`] where a [`LabelName`] is expected even though both are
//! strings under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — platform-integer-backed
// ---------------------------------------------------------------------------

/// The number of an issue or pull request within its repository.
///
/// Issues and pull requests share one number space, so the same label endpoints
/// serve both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a new issue number from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (platform delivery GUIDs)
// ---------------------------------------------------------------------------

/// Identifies a single webhook delivery.
///
/// Taken from the `X-GitHub-Delivery` header and propagated through spans so
/// all activity for one delivery can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Generates a new random delivery identifier (used for offline runs).
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a delivery identifier from its header representation.
    ///
    /// Returns `None` if the value is not a UUID.
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed (platform / configuration names)
// ---------------------------------------------------------------------------

string_id! {
    /// The login of the user or organisation that owns a repository.
    RepositoryOwner
}

string_id! {
    /// The name of a repository, without its owner.
    RepositoryName
}

string_id! {
    /// The name of a label as shown on the platform (e.g. `"Type: Feature"`).
    ///
    /// Label names may contain spaces and punctuation; adapters are responsible
    /// for encoding them in URLs.
    LabelName
}

string_id! {
    /// The key a rule is declared under in the `labeler` configuration map
    /// (e.g. `"feat"`).
    RuleKey
}
