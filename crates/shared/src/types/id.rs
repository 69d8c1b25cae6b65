//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `NoteId` where an `OrderId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Parses an optional, possibly blank, identifier coming from an API payload.
            ///
            /// Returns `None` for missing, blank, or malformed values.
            #[must_use]
            pub fn parse_lenient(raw: Option<&str>) -> Option<Self> {
                raw.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .and_then(|s| Uuid::parse_str(s).ok())
                    .map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }
    };
}

typed_id!(OrderId, "Unique identifier for a purchase order or change order.");
typed_id!(NoteId, "Unique identifier for a receipt note or return note.");
typed_id!(CorporationId, "Unique identifier for a corporation (tenant).");
