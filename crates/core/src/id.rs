//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings: freshly generated ones are random UUIDs, but
//! any string (e.g. seed ids like `"0"`) is accepted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an invoice (globally unique, immutable once created).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

/// Identifier of a line item (unique within its invoice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of a bill sundry (unique within its invoice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SundryId(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            /// Generate a fresh identifier.
            ///
            /// Uses UUIDv4 (random); collisions are not checked. Prefer passing
            /// IDs explicitly in tests for determinism.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_newtype!(InvoiceId);
impl_string_newtype!(ItemId);
impl_string_newtype!(SundryId);
