//! Numeric identifiers for sites and elements
//!
//! Link values arrive as loosely typed JSON (a number, a numeric string, or
//! whatever a form submitted), so both ID types can be extracted leniently
//! from a [`serde_json::Value`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid site ID: expected a positive integer, got '{0}'")]
    InvalidSiteId(String),

    #[error("Invalid element ID: expected a positive integer, got '{0}'")]
    InvalidElementId(String),
}

/// Parses a trimmed, strictly positive integer
fn parse_positive(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|id| *id > 0)
}

fn positive_from_value(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .filter(|id| *id > 0),
        serde_json::Value::String(s) => parse_positive(s),
        _ => None,
    }
}

/// Site identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(pub u32);

impl SiteId {
    /// Extracts a site ID from a number or numeric string
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        positive_from_value(value).map(SiteId)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SiteId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive(s)
            .map(SiteId)
            .ok_or_else(|| IdError::InvalidSiteId(s.to_string()))
    }
}

/// Element identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Extracts an element ID from a number or numeric string
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        positive_from_value(value).map(ElementId)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ElementId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive(s)
            .map(ElementId)
            .ok_or_else(|| IdError::InvalidElementId(s.to_string()))
    }
}
