//! Element domain model
//!
//! Elements are host-managed content items (entries, assets, categories,
//! users) that element links point at.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::ElementId;

/// Kind of element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Entry,
    Asset,
    Category,
    User,
}

impl ElementKind {
    /// Returns all element kinds
    pub fn all() -> &'static [ElementKind] {
        &[
            ElementKind::Entry,
            ElementKind::Asset,
            ElementKind::Category,
            ElementKind::User,
        ]
    }

    /// Stable name used to register the matching link type
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Entry => "entry",
            ElementKind::Asset => "asset",
            ElementKind::Category => "category",
            ElementKind::User => "user",
        }
    }

    /// Default display name of the link type for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Entry => "Entry",
            ElementKind::Asset => "Asset",
            ElementKind::Category => "Category",
            ElementKind::User => "User",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "entry" | "entries" => Ok(ElementKind::Entry),
            "asset" | "assets" => Ok(ElementKind::Asset),
            "category" | "categories" => Ok(ElementKind::Category),
            "user" | "users" => Ok(ElementKind::User),
            _ => Err(format!("Unknown element kind: {}", s)),
        }
    }
}

/// Publication status of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElementStatus {
    /// Published and visible
    #[default]
    Live,

    /// Scheduled for a future date
    Pending,

    /// Past its expiry date
    Expired,

    /// Switched off by an editor
    Disabled,

    /// Unsaved draft
    Draft,
}

impl ElementStatus {
    /// Returns true if the element is publicly visible
    pub fn is_published(&self) -> bool {
        matches!(self, ElementStatus::Live)
    }
}

impl fmt::Display for ElementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementStatus::Live => write!(f, "live"),
            ElementStatus::Pending => write!(f, "pending"),
            ElementStatus::Expired => write!(f, "expired"),
            ElementStatus::Disabled => write!(f, "disabled"),
            ElementStatus::Draft => write!(f, "draft"),
        }
    }
}

/// A content element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub title: String,

    /// Public URL, if the element has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub status: ElementStatus,

    /// Source the element belongs to (e.g. `section:news`, `volume:images`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Element {
    pub fn new(id: u32, kind: ElementKind, title: impl Into<String>) -> Self {
        Self {
            id: ElementId(id),
            kind,
            title: title.into(),
            url: None,
            status: ElementStatus::Live,
            source: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_status(mut self, status: ElementStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
