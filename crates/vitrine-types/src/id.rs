use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a page element (section, region, media slot, text block).
///
/// Anchors for deep links use the same identifier without the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses a location hash such as `#contact`.
    ///
    /// Returns `None` for an empty hash or a bare `#`.
    pub fn from_hash(hash: &str) -> Option<Self> {
        let trimmed = hash.trim().trim_start_matches('#');
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
