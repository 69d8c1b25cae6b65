//! Normalized line-item identity.
//!
//! Item identities are echoed back by different API responses with
//! inconsistent casing and stray whitespace, so every lookup goes through
//! `ItemKey`, which trims and lowercases once.

use serde::{Deserialize, Serialize};

/// A trimmed, case-folded item identity. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemKey(String);

impl ItemKey {
    /// Normalizes a raw identity. Returns `None` when nothing is left after trimming.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    /// Resolves the identity of a line: `item_uuid` first, then `base_item_uuid`.
    ///
    /// A blank primary identity falls through to the fallback.
    #[must_use]
    pub fn resolve(item_uuid: Option<&str>, base_item_uuid: Option<&str>) -> Option<Self> {
        item_uuid
            .and_then(Self::new)
            .or_else(|| base_item_uuid.and_then(Self::new))
    }

    /// Returns the normalized identity.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| "item identity must not be blank".to_string())
    }
}

impl From<ItemKey> for String {
    fn from(key: ItemKey) -> Self {
        key.0
    }
}
