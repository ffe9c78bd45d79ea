//! Content records consumed by item sets.

use serde::{Deserialize, Serialize};

/// Reference to an image, video or texture source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One item of an ordered set (artwork, testimonial, process step).
///
/// The stage only reads `media` (for crossfades) and treats everything else as
/// display data handed through to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub media: MediaRef,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, media: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media: MediaRef::new(media),
            title: title.into(),
            category: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_when_missing() {
        let item: ContentItem =
            serde_json::from_str(r#"{"id":"a1","media":"/img/a1.jpg","title":"Dusk"}"#).unwrap();
        assert_eq!(item.media.as_str(), "/img/a1.jpg");
        assert!(item.category.is_none());
        assert!(item.description.is_none());
    }
}
