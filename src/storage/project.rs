//! Project management
//!
//! Handles project initialization and wires the project's configuration and
//! catalog into host services and a link type registry.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::PROJECT_DIR;
use super::{Catalog, Config};
use crate::domain::{Element, ElementKind, ElementStatus, LinkField, Site};
use crate::host::{BuiltinTemplates, HostServices};
use crate::link_type::LinkTypeRegistry;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a linkfield project. Run 'linkfield init' first.")]
    NotInProject,
}

const DEFAULT_CONFIG: &str = r#"# linkfield configuration

# Environment aliases usable in site base URLs and url links
[aliases]
"@web" = "https://example.com"

# Message translations ("source" = "translated")
[translations]

[[fields]]
handle = "cta"
required = true
allowed_types = ["site", "url", "email", "entry"]

[fields.settings.site]
sites = "*"

[fields.settings.url]
allowAliases = true

[fields.settings.entry]
sources = ["section:pages"]

[[fields]]
handle = "footer"
"#;

/// A linkfield project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let root = Config::find_project_root_from(&cwd).ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Opens the project containing `path`, or the current one when no path
    /// is given
    pub fn open_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let root = Config::find_project_root_from(path).ok_or(ProjectError::NotInProject)?;
                Self::open(root)
            }
            None => Self::open_current(),
        }
    }

    /// Initializes a new project at the given path. Existing files are kept.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let project_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&project_dir).with_context(|| {
            format!(
                "Failed to create {} directory: {}",
                PROJECT_DIR,
                project_dir.display()
            )
        })?;

        let config_path = project_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let catalog_path = Catalog::path_for_project(&root);
        if !catalog_path.exists() {
            sample_catalog().save(&catalog_path)?;
        }

        tracing::debug!(root = %root.display(), "Initialized project");
        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .linkfield directory path
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Looks up a configured link field
    pub fn field(&self, handle: &str) -> Result<&LinkField> {
        Ok(self.config.project.field(handle)?)
    }

    /// Loads the site and element catalog
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::for_project(&self.root)
    }

    /// Builds host services backed by the project catalog and configuration
    pub fn services(&self) -> Result<HostServices> {
        let catalog = Rc::new(self.catalog()?);

        Ok(HostServices::new(
            catalog.clone(),
            catalog,
            Rc::new(BuiltinTemplates),
            Rc::new(self.config.project.translations()),
            Rc::new(self.config.project.aliases()),
        ))
    }

    /// Builds a registry of the bundled link types for this project
    pub fn registry(&self) -> Result<LinkTypeRegistry> {
        Ok(LinkTypeRegistry::with_defaults(&self.services()?))
    }
}

/// Catalog written by `init`
fn sample_catalog() -> Catalog {
    Catalog::new()
        .with_site(Site::new(1, "default", "Main site").with_base_url("@web/"))
        .with_site(Site::new(2, "nb", "Norsk").with_base_url("@web/nb/"))
        .with_site(Site::new(3, "api", "Headless").without_urls())
        .with_element(
            Element::new(10, ElementKind::Entry, "About us")
                .with_url("https://example.com/about")
                .with_source("section:pages"),
        )
        .with_element(
            Element::new(11, ElementKind::Entry, "Coming soon")
                .with_url("https://example.com/news/coming-soon")
                .with_status(ElementStatus::Draft)
                .with_source("section:news"),
        )
        .with_element(
            Element::new(20, ElementKind::Asset, "Brochure")
                .with_url("https://example.com/files/brochure.pdf")
                .with_source("volume:documents"),
        )
}
