//! # Host Services
//!
//! The collaborators link types need from the surrounding application,
//! expressed as traits and injected through [`HostServices`].
//!
//! | Trait | Purpose | Bundled implementation |
//! |-------|---------|------------------------|
//! | [`SiteRepository`] | Look up and enumerate sites | [`Catalog`](crate::storage::Catalog) |
//! | [`ElementRepository`] | Look up elements with a status filter | [`Catalog`](crate::storage::Catalog) |
//! | [`TemplateRenderer`] | Render a named template with variables | [`BuiltinTemplates`] |
//! | [`Translator`] | Localize display strings | [`Translations`] |
//! | [`AliasResolver`] | Expand `@alias` tokens in URLs | [`Aliases`] |
//!
//! All calls are synchronous; services are shared between link types with
//! `Rc` because resolution runs on a single thread.

mod alias;
pub mod templates;
mod translate;

use std::rc::Rc;

use thiserror::Error;

use crate::domain::{Element, ElementId, ElementKind, Site, SiteId};

pub use alias::Aliases;
pub use templates::BuiltinTemplates;
pub use translate::Translations;

/// Failure reported by a [`TemplateRenderer`]
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template '{template}' is missing variable '{name}'")]
    MissingVariable { template: String, name: String },

    #[error("Template '{template}' failed: {message}")]
    Failed { template: String, message: String },
}

/// Site lookup
pub trait SiteRepository {
    /// Returns the site with the given ID
    fn site_by_id(&self, id: SiteId) -> Option<Site>;

    /// Returns every site, in display order
    fn all_sites(&self) -> Vec<Site>;
}

/// Element lookup
pub trait ElementRepository {
    /// Finds an element of the given kind.
    ///
    /// Unless `include_disabled` is set, only published elements are returned.
    fn find(&self, kind: ElementKind, id: ElementId, include_disabled: bool) -> Option<Element>;

    /// Lists the sources elements of the given kind can come from
    fn sources(&self, kind: ElementKind) -> Vec<String>;
}

/// Template rendering
pub trait TemplateRenderer {
    fn render(&self, template: &str, vars: &serde_json::Value) -> Result<String, RenderError>;
}

/// Display string localization
pub trait Translator {
    /// Translates `message`, substituting `{name}` placeholders from `params`
    fn translate(&self, message: &str, params: &[(&str, &str)]) -> String;
}

/// Environment alias expansion
pub trait AliasResolver {
    /// Expands a leading `@alias` token. Values without one are returned as-is;
    /// `None` means the alias is unknown.
    fn resolve(&self, value: &str) -> Option<String>;
}

/// Services injected into every link type
#[derive(Clone)]
pub struct HostServices {
    pub sites: Rc<dyn SiteRepository>,
    pub elements: Rc<dyn ElementRepository>,
    pub templates: Rc<dyn TemplateRenderer>,
    pub translator: Rc<dyn Translator>,
    pub aliases: Rc<dyn AliasResolver>,
}

impl HostServices {
    pub fn new(
        sites: Rc<dyn SiteRepository>,
        elements: Rc<dyn ElementRepository>,
        templates: Rc<dyn TemplateRenderer>,
        translator: Rc<dyn Translator>,
        aliases: Rc<dyn AliasResolver>,
    ) -> Self {
        Self {
            sites,
            elements,
            templates,
            translator,
            aliases,
        }
    }

    /// Translates a message without parameters
    pub fn t(&self, message: &str) -> String {
        self.translator.translate(message, &[])
    }

    /// Replaces the template renderer
    pub fn with_templates(mut self, templates: Rc<dyn TemplateRenderer>) -> Self {
        self.templates = templates;
        self
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices").finish_non_exhaustive()
    }
}
