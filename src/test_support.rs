//! Shared fixtures for unit tests

use std::rc::Rc;

use crate::domain::{Element, ElementKind, ElementStatus, Site};
use crate::host::{Aliases, BuiltinTemplates, HostServices, RenderError, TemplateRenderer, Translations};
use crate::storage::Catalog;

/// Renderer that fails every template
pub(crate) struct FailingTemplates;

impl TemplateRenderer for FailingTemplates {
    fn render(&self, template: &str, _vars: &serde_json::Value) -> Result<String, RenderError> {
        Err(RenderError::Failed {
            template: template.to_string(),
            message: "boom".to_string(),
        })
    }
}

pub(crate) fn catalog() -> Catalog {
    Catalog::new()
        .with_site(Site::new(1, "default", "Main").with_base_url("@web/"))
        .with_site(Site::new(2, "nb", "Norsk").with_base_url("@web/nb/"))
        .with_site(Site::new(3, "sv", "Svenska").with_base_url("https://example.se/"))
        .with_site(Site::new(4, "api", "Headless").without_urls())
        .with_site(Site::new(5, "broken", "Broken").with_base_url("@missing/"))
        .with_element(
            Element::new(10, ElementKind::Entry, "About")
                .with_url("https://example.com/about")
                .with_source("section:pages"),
        )
        .with_element(
            Element::new(11, ElementKind::Entry, "Upcoming")
                .with_url("https://example.com/upcoming")
                .with_status(ElementStatus::Draft)
                .with_source("section:news"),
        )
        .with_element(
            Element::new(12, ElementKind::Entry, "News")
                .with_url("https://example.com/news?page=1#top")
                .with_source("section:news"),
        )
        .with_element(
            Element::new(20, ElementKind::Asset, "Logo")
                .with_url("https://cdn.example.com/logo.png")
                .with_source("volume:images"),
        )
        .with_element(Element::new(30, ElementKind::Category, "Rust").with_source("group:topics"))
        .with_element(
            Element::new(40, ElementKind::User, "Kari")
                .with_status(ElementStatus::Disabled),
        )
}

pub(crate) fn aliases() -> Aliases {
    Aliases::from_iter([("@web", "https://example.com")])
}

pub(crate) fn services_with(translations: Translations) -> HostServices {
    let catalog = Rc::new(catalog());
    HostServices::new(
        catalog.clone(),
        catalog,
        Rc::new(BuiltinTemplates),
        Rc::new(translations),
        Rc::new(aliases()),
    )
}

pub(crate) fn services() -> HostServices {
    services_with(Translations::new())
}

pub(crate) fn failing_services() -> HostServices {
    services().with_templates(Rc::new(FailingTemplates))
}
