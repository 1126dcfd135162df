//! The contract every link type implements
//!
//! The field treats all link types uniformly through [`LinkType`]: it asks
//! one to render its input and settings controls, to normalise and validate
//! submitted values, and to resolve a stored [`Link`] to text, a URL or an
//! element.
//!
//! Resolution never fails loudly: an empty or dangling link resolves to
//! `None`, and rendering problems come back as fallback markup.

use serde::{Deserialize, Serialize};

use crate::domain::{Element, Link, LinkField, Settings};

/// A validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Display metadata shared by all link types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTypeMeta {
    /// Untranslated display name
    pub display_name: String,

    /// Untranslated group used to cluster types in the UI
    pub display_group: String,
}

impl LinkTypeMeta {
    pub fn new(display_name: impl Into<String>, display_group: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            display_group: display_group.into(),
        }
    }
}

/// A kind of link target
pub trait LinkType {
    /// Settings used when the field stores none for this type
    fn default_settings(&self) -> Settings;

    /// Translated display name
    fn display_name(&self) -> String;

    /// Translated display group
    fn display_group(&self) -> String;

    /// Resolves the link to an element.
    ///
    /// Unpublished elements are only returned when `ignore_status` is set.
    fn element(&self, link: &Link, ignore_status: bool) -> Option<Element>;

    /// True iff [`LinkType::element`] returns an element for the same arguments
    fn has_element(&self, link: &Link, ignore_status: bool) -> bool {
        self.element(link, ignore_status).is_some()
    }

    /// Renders the input control for this type.
    ///
    /// `value` carries the current selection. `element` is the element that
    /// owns the field, if any, and is never treated as the link target.
    fn input_html(
        &self,
        link_type_name: &str,
        field: &LinkField,
        value: &Link,
        element: Option<&Element>,
    ) -> String;

    /// Renders the settings control for this type
    fn settings_html(&self, link_type_name: &str, field: &LinkField) -> String;

    /// Normalises a submitted value into its stored form
    fn link_value(&self, value: Option<serde_json::Value>) -> Option<serde_json::Value> {
        value
    }

    /// Display text for the link
    fn text(&self, link: &Link) -> Option<String>;

    /// Navigable URL for the link
    fn url(&self, link: &Link) -> Option<String>;

    /// True if the link carries no usable value
    fn is_empty(&self, link: &Link) -> bool;

    /// Returns corrected settings
    fn validate_settings(&self, settings: Settings) -> Settings {
        settings
    }

    /// Returns `None` if the value is acceptable for the field, otherwise a
    /// non-empty list of errors
    fn validate_value(&self, field: &LinkField, link: &Link) -> Option<Vec<ValidationError>>;
}

/// Returns true unless the value is a non-blank string
pub(crate) fn is_blank_string(value: Option<&serde_json::Value>) -> bool {
    match value {
        Some(serde_json::Value::String(s)) => s.trim().is_empty(),
        _ => true,
    }
}

/// Reads a boolean-ish setting (`true`, `1`, `"1"`, `"true"`)
pub(crate) fn setting_flag(settings: &Settings, key: &str) -> bool {
    match settings.get(key) {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(serde_json::Value::String(s)) => matches!(s.trim(), "1" | "true" | "yes" | "on"),
        _ => false,
    }
}
