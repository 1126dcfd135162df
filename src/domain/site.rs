//! Site domain model
//!
//! A site is one localized or regional version of the published content,
//! with its own base URL. Sites without URLs (headless sites) exist but can't
//! be linked to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::SiteId;

fn default_true() -> bool {
    true
}

/// A site record as provided by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,

    /// Machine-friendly handle (e.g. `default`, `norwegian`)
    pub handle: String,

    /// Human-readable name
    pub name: String,

    /// Base URL, possibly starting with an `@alias` token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Whether the site serves public URLs
    #[serde(default = "default_true")]
    pub has_urls: bool,
}

impl Site {
    pub fn new(id: u32, handle: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: SiteId(id),
            handle: handle.into(),
            name: name.into(),
            base_url: None,
            has_urls: true,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn without_urls(mut self) -> Self {
        self.has_urls = false;
        self
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
