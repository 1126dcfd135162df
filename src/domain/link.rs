//! Link value holder
//!
//! A link pairs the name of the link type that owns it with a
//! type-specific payload: a site ID, an element ID, a raw URL string.
//! Link types only ever read a link; the field replaces it on submission.

use serde::{Deserialize, Serialize};

/// A stored link value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Registered name of the link type (e.g. `site`, `url`, `entry`)
    #[serde(rename = "type")]
    pub link_type: String,

    /// Type-specific payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    /// Text that replaces the resolved link text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,

    /// Link target (e.g. `_blank`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Extra query string merged into the resolved URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Fragment that replaces the resolved URL's fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

impl Link {
    /// Creates a link of the given type with a value
    pub fn new(link_type: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            link_type: link_type.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    /// Creates a link with no value
    pub fn empty(link_type: impl Into<String>) -> Self {
        Self {
            link_type: link_type.into(),
            ..Default::default()
        }
    }

    pub fn with_custom_text(mut self, text: impl Into<String>) -> Self {
        self.custom_text = Some(text.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// Returns the value if it is a JSON string
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(|v| v.as_str())
    }

    /// Returns true if the link opens in a new window
    pub fn opens_new_window(&self) -> bool {
        self.target.as_deref() == Some("_blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_type_key() {
        let link = Link::new("site", "2");
        let json = serde_json::to_value(&link).unwrap();

        assert_eq!(json, json!({"type": "site", "value": "2"}));
    }

    #[test]
    fn deserializes_minimal() {
        let link: Link = serde_json::from_value(json!({"type": "url"})).unwrap();

        assert_eq!(link.link_type, "url");
        assert!(link.value.is_none());
    }

    #[test]
    fn value_str_only_for_strings() {
        assert_eq!(Link::new("url", "https://a.b").value_str(), Some("https://a.b"));
        assert_eq!(Link::new("entry", 4).value_str(), None);
        assert_eq!(Link::empty("url").value_str(), None);
    }

    #[test]
    fn target_blank() {
        assert!(Link::new("url", "x").with_target("_blank").opens_new_window());
        assert!(!Link::new("url", "x").opens_new_window());
    }
}
