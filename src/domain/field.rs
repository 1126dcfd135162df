//! Link field definition
//!
//! A field decides which link types an editor may pick and stores settings
//! for each of them, keyed by the link type's registered name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings for one link type on one field
pub type Settings = serde_json::Map<String, serde_json::Value>;

/// A link field as configured by an administrator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkField {
    /// Field handle, used to build input names and ids
    pub handle: String,

    /// Static fields render disabled inputs
    pub is_static: bool,

    /// Whether an empty link fails validation
    pub required: bool,

    /// Link types editors may choose; `None` allows all registered types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_types: Option<Vec<String>>,

    /// Stored settings per link type name
    pub settings: BTreeMap<String, Settings>,
}

impl LinkField {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            ..Default::default()
        }
    }

    /// Restricts the field to the given link types
    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Stores settings for a link type
    pub fn with_settings(mut self, link_type_name: impl Into<String>, settings: Settings) -> Self {
        self.settings.insert(link_type_name.into(), settings);
        self
    }

    /// Returns true if editors may pick the given link type
    pub fn allows(&self, link_type_name: &str) -> bool {
        match &self.allowed_types {
            Some(types) => types.iter().any(|t| t == link_type_name),
            None => true,
        }
    }

    /// Effective settings for a link type: its defaults overlaid with what
    /// the field stores
    pub fn link_type_settings(&self, link_type_name: &str, defaults: Settings) -> Settings {
        let mut settings = defaults;
        if let Some(stored) = self.settings.get(link_type_name) {
            for (key, value) in stored {
                settings.insert(key.clone(), value.clone());
            }
        }
        settings
    }

    /// DOM id of the input for a link type
    pub fn input_id(&self, link_type_name: &str) -> String {
        format!("{}-{}", self.handle, link_type_name)
    }

    /// Form name of the input for a link type
    pub fn input_name(&self, link_type_name: &str) -> String {
        format!("{}[{}]", self.handle, link_type_name)
    }
}
