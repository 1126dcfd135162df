//! Site and element catalog
//!
//! The catalog stands in for the host's content store. It is read from
//! `.linkfield/catalog.toml`:
//!
//! ```toml
//! [[sites]]
//! id = 1
//! handle = "default"
//! name = "Main site"
//! base_url = "@web/"
//!
//! [[elements]]
//! id = 10
//! kind = "entry"
//! title = "About us"
//! url = "https://example.com/about"
//! source = "section:pages"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Element, ElementId, ElementKind, Site, SiteId};
use crate::host::{ElementRepository, SiteRepository};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Duplicate site ID {0} in catalog")]
    DuplicateSite(SiteId),

    #[error("Duplicate {kind} ID {id} in catalog")]
    DuplicateElement { kind: ElementKind, id: ElementId },
}

/// In-memory sites and elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub sites: Vec<Site>,
    pub elements: Vec<Element>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_site(mut self, site: Site) -> Self {
        self.sites.push(site);
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Path of the catalog file for a project
    pub fn path_for_project(project_root: &Path) -> PathBuf {
        project_root.join(super::config::PROJECT_DIR).join("catalog.toml")
    }

    /// Loads the project catalog, or an empty one if the file doesn't exist
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let path = Self::path_for_project(project_root);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Loads and checks a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        let catalog: Catalog = toml::from_str(&content)
            .map_err(|e| CatalogError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        catalog.check()?;
        Ok(catalog)
    }

    /// Writes the catalog as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize catalog")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write catalog: {}", path.display()))
    }

    /// Rejects duplicate IDs
    pub fn check(&self) -> Result<(), CatalogError> {
        let mut site_ids = HashSet::new();
        for site in &self.sites {
            if !site_ids.insert(site.id) {
                return Err(CatalogError::DuplicateSite(site.id));
            }
        }

        let mut element_ids = HashSet::new();
        for element in &self.elements {
            if !element_ids.insert((element.kind, element.id)) {
                return Err(CatalogError::DuplicateElement {
                    kind: element.kind,
                    id: element.id,
                });
            }
        }

        Ok(())
    }
}

impl SiteRepository for Catalog {
    fn site_by_id(&self, id: SiteId) -> Option<Site> {
        self.sites.iter().find(|site| site.id == id).cloned()
    }

    fn all_sites(&self) -> Vec<Site> {
        self.sites.clone()
    }
}

impl ElementRepository for Catalog {
    fn find(&self, kind: ElementKind, id: ElementId, include_disabled: bool) -> Option<Element> {
        self.elements
            .iter()
            .find(|e| e.kind == kind && e.id == id)
            .filter(|e| include_disabled || e.status.is_published())
            .cloned()
    }

    fn sources(&self, kind: ElementKind) -> Vec<String> {
        let mut seen = HashSet::new();
        self.elements
            .iter()
            .filter(|e| e.kind == kind)
            .filter_map(|e| e.source.clone())
            .filter(|source| seen.insert(source.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementStatus;
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        Catalog::new()
            .with_site(Site::new(1, "default", "Main"))
            .with_site(Site::new(2, "nb", "Norsk"))
            .with_element(
                Element::new(10, ElementKind::Entry, "About").with_source("section:pages"),
            )
            .with_element(
                Element::new(11, ElementKind::Entry, "Draft post")
                    .with_status(ElementStatus::Draft)
                    .with_source("section:news"),
            )
            .with_element(
                Element::new(12, ElementKind::Entry, "News").with_source("section:news"),
            )
            .with_element(Element::new(10, ElementKind::Asset, "Logo"))
    }

    #[test]
    fn site_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.site_by_id(SiteId(2)).unwrap().name, "Norsk");
        assert!(catalog.site_by_id(SiteId(9)).is_none());
        assert_eq!(catalog.all_sites().len(), 2);
    }

    #[test]
    fn element_lookup_respects_kind() {
        let catalog = catalog();
        let asset = catalog.find(ElementKind::Asset, ElementId(10), false).unwrap();
        assert_eq!(asset.title, "Logo");
    }

    #[test]
    fn drafts_need_include_disabled() {
        let catalog = catalog();
        assert!(catalog.find(ElementKind::Entry, ElementId(11), false).is_none());
        assert!(catalog.find(ElementKind::Entry, ElementId(11), true).is_some());
    }

    #[test]
    fn sources_are_distinct_in_order() {
        let catalog = catalog();
        assert_eq!(
            catalog.sources(ElementKind::Entry),
            vec!["section:pages".to_string(), "section:news".to_string()]
        );
        assert!(catalog.sources(ElementKind::User).is_empty());
    }

    #[test]
    fn duplicate_sites_rejected() {
        let catalog = Catalog::new()
            .with_site(Site::new(1, "a", "A"))
            .with_site(Site::new(1, "b", "B"));

        assert!(matches!(catalog.check(), Err(CatalogError::DuplicateSite(SiteId(1)))));
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.toml");

        let original = catalog();
        original.save(&path).unwrap();
        let loaded = Catalog::load(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn missing_project_catalog_is_empty() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::for_project(dir.path()).unwrap();
        assert!(catalog.sites.is_empty());
    }
}
