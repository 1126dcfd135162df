//! Element link types
//!
//! Links to entries, assets, categories and users held by the host. The
//! stored value is the element ID, either bare or as the first item of the
//! list an element picker submits.

use serde_json::{json, Value};

use super::protocol::{LinkType, LinkTypeMeta, ValidationError};
use super::render::render_or_fallback;
use crate::domain::{Element, ElementId, ElementKind, Link, LinkField, Settings};
use crate::host::templates::{INPUT_ELEMENT, SETTINGS_ELEMENT};
use crate::host::HostServices;

/// Extracts the element ID from a stored or submitted value
fn element_id(value: Option<&Value>) -> Option<ElementId> {
    match value? {
        Value::Array(items) => items.first().and_then(ElementId::from_value),
        other => ElementId::from_value(other),
    }
}

/// Whether a `sources` setting admits the given source
fn source_allowed(setting: Option<&Value>, source: Option<&str>) -> bool {
    match setting {
        Some(Value::String(s)) if s.is_empty() => false,
        Some(Value::Array(items)) => {
            source.is_some_and(|source| items.iter().any(|item| item.as_str() == Some(source)))
        }
        _ => true,
    }
}

/// Links to one kind of host element
pub struct ElementLinkType {
    kind: ElementKind,
    meta: LinkTypeMeta,
    services: HostServices,
}

impl ElementLinkType {
    pub fn new(kind: ElementKind, display_name: impl Into<String>, services: HostServices) -> Self {
        Self {
            kind,
            meta: LinkTypeMeta::new(display_name, "Common"),
            services,
        }
    }

    pub fn with_display_group(mut self, display_group: impl Into<String>) -> Self {
        self.meta.display_group = display_group.into();
        self
    }
}

impl LinkType for ElementLinkType {
    fn default_settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.insert("sources".to_string(), json!("*"));
        settings
    }

    fn display_name(&self) -> String {
        self.services.t(&self.meta.display_name)
    }

    fn display_group(&self) -> String {
        self.services.t(&self.meta.display_group)
    }

    fn element(&self, link: &Link, ignore_status: bool) -> Option<Element> {
        let id = element_id(link.value.as_ref())?;
        self.services.elements.find(self.kind, id, ignore_status)
    }

    fn input_html(
        &self,
        link_type_name: &str,
        field: &LinkField,
        value: &Link,
        _element: Option<&Element>,
    ) -> String {
        let settings = field.link_type_settings(link_type_name, self.default_settings());
        let is_selected = value.link_type == link_type_name;
        let selected = if is_selected { self.element(value, true) } else { None };

        let vars = json!({
            "isSelected": is_selected,
            "linkTypeName": link_type_name,
            "elementFieldOptions": {
                "disabled": field.is_static,
                "id": field.input_id(link_type_name),
                "name": field.input_name(link_type_name),
                "kind": self.kind.as_str(),
                "sources": settings.get("sources").cloned().unwrap_or(Value::Null),
                "element": selected.map(|element| json!({
                    "id": element.id,
                    "title": element.title,
                })),
            },
        });

        render_or_fallback(&self.services, &self.display_name(), INPUT_ELEMENT, &vars)
    }

    fn settings_html(&self, link_type_name: &str, field: &LinkField) -> String {
        let vars = json!({
            "settings": field.link_type_settings(link_type_name, self.default_settings()),
            "elementName": self.display_name(),
            "linkTypeName": link_type_name,
            "sourceOptions": self.services.elements.sources(self.kind),
        });

        render_or_fallback(&self.services, &self.display_name(), SETTINGS_ELEMENT, &vars)
    }

    fn link_value(&self, value: Option<Value>) -> Option<Value> {
        match value {
            Some(Value::Array(_)) => element_id(value.as_ref()).map(|id| json!(id)),
            other => other,
        }
    }

    fn text(&self, link: &Link) -> Option<String> {
        self.element(link, false).map(|element| element.title)
    }

    fn url(&self, link: &Link) -> Option<String> {
        self.element(link, false)?.url
    }

    fn is_empty(&self, link: &Link) -> bool {
        element_id(link.value.as_ref()).is_none()
    }

    fn validate_settings(&self, mut settings: Settings) -> Settings {
        if let Some(Value::Array(items)) = settings.get("sources") {
            let mut sources: Vec<Value> = Vec::new();
            for item in items.iter().filter(|item| item.is_string()) {
                if !sources.contains(item) {
                    sources.push(item.clone());
                }
            }

            let sources = if sources.is_empty() {
                json!("")
            } else {
                Value::Array(sources)
            };
            settings.insert("sources".to_string(), sources);
        }
        settings
    }

    fn validate_value(&self, field: &LinkField, link: &Link) -> Option<Vec<ValidationError>> {
        if self.is_empty(link) {
            return None;
        }

        let Some(element) = self.element(link, true) else {
            return Some(vec![ValidationError::new(
                "value",
                self.services.t("The linked element does not exist."),
            )]);
        };

        let settings = field.link_type_settings(&link.link_type, self.default_settings());
        if !source_allowed(settings.get("sources"), element.source.as_deref()) {
            return Some(vec![ValidationError::new(
                "value",
                self.services.t("The linked element is not allowed here."),
            )]);
        }

        None
    }
}
