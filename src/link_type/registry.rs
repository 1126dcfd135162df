//! Link type registry
//!
//! Maps stable type names (`site`, `url`, `entry`, ...) to link type
//! implementations and resolves whole links through them. Registration
//! order is kept; it drives the order of type pickers and listings.

use serde_json::Value;
use thiserror::Error;

use super::element::ElementLinkType;
use super::input::{InputKind, InputLinkType};
use super::protocol::{LinkType, ValidationError};
use super::site::SiteLinkType;
use crate::domain::{Element, ElementKind, Link, LinkField, QueryParams, Url};
use crate::host::HostServices;

/// Registry lookup errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown link type: {0}")]
    UnknownType(String),

    #[error("Link type `{link_type}` is not allowed in field `{field}`")]
    NotAllowed { field: String, link_type: String },
}

/// A registered link type
struct Registered {
    name: String,
    link_type: Box<dyn LinkType>,
}

/// Link types grouped for display
pub struct LinkTypeGroup<'a> {
    /// Translated group name
    pub name: String,

    /// `(type name, link type)` pairs in registration order
    pub types: Vec<(&'a str, &'a dyn LinkType)>,
}

/// Dispatch table of link types
#[derive(Default)]
pub struct LinkTypeRegistry {
    types: Vec<Registered>,
}

impl LinkTypeRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Creates a registry with every bundled link type
    pub fn with_defaults(services: &HostServices) -> Self {
        let mut registry = Self::new();

        registry.register("site", SiteLinkType::new("Site", services.clone()));
        for kind in InputKind::all() {
            registry.register(
                kind.as_str(),
                InputLinkType::new(*kind, kind.display_name(), services.clone()),
            );
        }
        for kind in ElementKind::all() {
            registry.register(
                kind.as_str(),
                ElementLinkType::new(*kind, kind.display_name(), services.clone()),
            );
        }

        registry
    }

    /// Registers a link type. Re-registering a name replaces the previous
    /// type in place.
    pub fn register(&mut self, name: impl Into<String>, link_type: impl LinkType + 'static) {
        let name = name.into();
        let link_type: Box<dyn LinkType> = Box::new(link_type);

        match self.types.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                tracing::debug!(name = %name, "Replacing link type");
                entry.link_type = link_type;
            }
            None => self.types.push(Registered { name, link_type }),
        }
    }

    /// Gets a link type by name
    pub fn get(&self, name: &str) -> Option<&dyn LinkType> {
        self.types
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.link_type.as_ref())
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn LinkType)> {
        self.types
            .iter()
            .map(|entry| (entry.name.as_str(), entry.link_type.as_ref()))
    }

    /// Groups link types by display group. Groups appear in the order their
    /// first member was registered.
    pub fn grouped(&self) -> Vec<LinkTypeGroup<'_>> {
        let mut groups: Vec<LinkTypeGroup<'_>> = Vec::new();

        for (name, link_type) in self.iter() {
            let group_name = link_type.display_group();
            match groups.iter_mut().find(|group| group.name == group_name) {
                Some(group) => group.types.push((name, link_type)),
                None => groups.push(LinkTypeGroup {
                    name: group_name,
                    types: vec![(name, link_type)],
                }),
            }
        }

        groups
    }

    /// Gets the link type for a link, if registered
    fn for_link(&self, link: &Link) -> Option<&dyn LinkType> {
        let link_type = self.get(&link.link_type);
        if link_type.is_none() {
            tracing::debug!(link_type = %link.link_type, "Link has an unregistered type");
        }
        link_type
    }

    /// True if the link carries no usable value. Links of unknown types are
    /// empty.
    pub fn is_empty(&self, link: &Link) -> bool {
        self.for_link(link)
            .map_or(true, |link_type| link_type.is_empty(link))
    }

    /// Display text: the link's custom text if set, else the type's text
    pub fn text(&self, link: &Link) -> Option<String> {
        if self.is_empty(link) {
            return None;
        }

        let custom = link
            .custom_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        match custom {
            Some(text) => Some(text.to_string()),
            None => self.for_link(link)?.text(link),
        }
    }

    /// The type's URL with the link's extra query merged in and its fragment
    /// applied
    pub fn url(&self, link: &Link) -> Option<String> {
        if self.is_empty(link) {
            return None;
        }

        let url = self.for_link(link)?.url(link)?;

        let query = link
            .query
            .as_deref()
            .map(|q| QueryParams::parse(q.trim().trim_start_matches('?')))
            .unwrap_or_default();
        let fragment = link
            .fragment
            .as_deref()
            .map(|f| f.trim().trim_start_matches('#'))
            .filter(|f| !f.is_empty());

        if query.is_empty() && fragment.is_none() {
            return Some(url);
        }

        let mut url = Url::parse(&url);
        url.merge_query(&query);
        if fragment.is_some() {
            url.set_fragment(fragment);
        }
        Some(url.to_string())
    }

    pub fn element(&self, link: &Link, ignore_status: bool) -> Option<Element> {
        self.for_link(link)?.element(link, ignore_status)
    }

    pub fn has_element(&self, link: &Link, ignore_status: bool) -> bool {
        self.for_link(link)
            .is_some_and(|link_type| link_type.has_element(link, ignore_status))
    }

    /// Validates a link against a field. An empty result means valid.
    pub fn validate(&self, field: &LinkField, link: &Link) -> Vec<ValidationError> {
        let Some(link_type) = self.get(&link.link_type) else {
            return vec![ValidationError::new(
                "type",
                format!("Unknown link type `{}`.", link.link_type),
            )];
        };

        if !field.allows(&link.link_type) {
            return vec![ValidationError::new(
                "type",
                format!("The link type `{}` is not allowed here.", link.link_type),
            )];
        }

        if link_type.is_empty(link) {
            if field.required {
                return vec![ValidationError::new("value", "Cannot be blank.")];
            }
            return Vec::new();
        }

        link_type.validate_value(field, link).unwrap_or_default()
    }

    /// Runs each stored settings block through its type's
    /// `validate_settings`. Settings for unknown types are left alone.
    pub fn normalize_settings(&self, field: &mut LinkField) {
        for (name, settings) in field.settings.iter_mut() {
            if let Some(link_type) = self.get(name) {
                *settings = link_type.validate_settings(std::mem::take(settings));
            }
        }
    }

    /// Builds a link from a submitted value
    pub fn link_from_input(
        &self,
        field: &LinkField,
        link_type_name: &str,
        raw: Option<Value>,
    ) -> Result<Link, RegistryError> {
        let link_type = self
            .get(link_type_name)
            .ok_or_else(|| RegistryError::UnknownType(link_type_name.to_string()))?;

        if !field.allows(link_type_name) {
            return Err(RegistryError::NotAllowed {
                field: field.handle.clone(),
                link_type: link_type_name.to_string(),
            });
        }

        Ok(Link {
            value: link_type.link_value(raw),
            ..Link::empty(link_type_name)
        })
    }
}
