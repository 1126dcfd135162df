//! Configuration handling
//!
//! Configuration is stored in `.linkfield/config.toml` (project) and
//! `~/.config/linkfield/config.toml` (global).
//!
//! ```toml
//! [aliases]
//! "@web" = "https://example.com"
//!
//! [translations]
//! "Site" = "Nettsted"
//!
//! [[fields]]
//! handle = "cta"
//! required = true
//! allowed_types = ["site", "url", "entry"]
//!
//! [fields.settings.site]
//! sites = [1, 2]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::LinkField;
use crate::host::{Aliases, Translations};

/// Name of the project directory
pub const PROJECT_DIR: &str = ".linkfield";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Duplicate field: {0}")]
    DuplicateField(String),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Environment aliases (`@web` -> base URL)
    pub aliases: BTreeMap<String, String>,

    /// Message translations
    pub translations: BTreeMap<String, String>,

    /// Link field definitions
    pub fields: Vec<LinkField>,
}

impl ProjectConfig {
    /// Looks up a field by handle
    pub fn field(&self, handle: &str) -> Result<&LinkField, ConfigError> {
        self.fields
            .iter()
            .find(|field| field.handle == handle)
            .ok_or_else(|| ConfigError::UnknownField(handle.to_string()))
    }

    pub fn aliases(&self) -> Aliases {
        self.aliases
            .iter()
            .map(|(alias, value)| (alias.as_str(), value.as_str()))
            .collect()
    }

    pub fn translations(&self) -> Translations {
        self.translations
            .iter()
            .map(|(message, translated)| (message.as_str(), translated.as_str()))
            .collect()
    }

    /// Rejects field handles that appear more than once
    pub fn check(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.handle.as_str()) {
                return Err(ConfigError::DuplicateField(field.handle.clone()));
            }
        }
        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project_root = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_project_root_from(&dir));

        let project = match &project_root {
            Some(root) => Self::load_project_config(root)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "linkfield", "linkfield")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config.check().context("Invalid project config")?;
        tracing::debug!(
            path = %config_path.display(),
            fields = config.fields.len(),
            aliases = config.aliases.len(),
            "Loaded project config"
        );

        Ok(config)
    }

    /// Finds the project root by looking for a `.linkfield/` directory in
    /// `start` and its parents
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the project root, or an error if not in a project
    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a linkfield project. Run 'linkfield init' first."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROJECT_TOML: &str = r#"
[aliases]
"@web" = "https://example.com"

[translations]
"Site" = "Nettsted"

[[fields]]
handle = "cta"
required = true
allowed_types = ["site", "url"]

[fields.settings.site]
sites = [1, 2]

[[fields]]
handle = "footer"
"#;

    #[test]
    fn default_config() {
        let config = Config {
            project: ProjectConfig::default(),
            global: GlobalConfig::default(),
            project_root: None,
        };

        assert!(config.project.fields.is_empty());
        assert_eq!(config.global.default_format, OutputFormat::Text);
        assert!(config.require_project_root().is_err());
    }

    #[test]
    fn parse_project_config() {
        let config: ProjectConfig = toml::from_str(PROJECT_TOML).unwrap();

        let cta = config.field("cta").unwrap();
        assert!(cta.required);
        assert!(cta.allows("url"));
        assert!(!cta.allows("email"));
        assert_eq!(
            cta.settings["site"].get("sites"),
            Some(&serde_json::json!([1, 2]))
        );

        let footer = config.field("footer").unwrap();
        assert!(!footer.required);
        assert!(footer.allows("email"));

        assert!(matches!(
            config.field("nope"),
            Err(ConfigError::UnknownField(_))
        ));
    }

    #[test]
    fn aliases_and_translations() {
        use crate::host::{AliasResolver, Translator};

        let config: ProjectConfig = toml::from_str(PROJECT_TOML).unwrap();

        assert_eq!(
            config.aliases().resolve("@web/a"),
            Some("https://example.com/a".to_string())
        );
        assert_eq!(config.translations().translate("Site", &[]), "Nettsted");
    }

    #[test]
    fn duplicate_fields_rejected() {
        let config: ProjectConfig = toml::from_str(
            r#"
[[fields]]
handle = "cta"

[[fields]]
handle = "cta"
"#,
        )
        .unwrap();

        assert!(matches!(config.check(), Err(ConfigError::DuplicateField(h)) if h == "cta"));
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str(r#"default_format = "json""#).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn load_project_from_disk() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(PROJECT_DIR)).unwrap();
        fs::write(dir.path().join(PROJECT_DIR).join("config.toml"), PROJECT_TOML).unwrap();

        let config = Config::load_project_config(dir.path()).unwrap();
        assert_eq!(config.fields.len(), 2);
    }

    #[test]
    fn invalid_project_config() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(PROJECT_DIR)).unwrap();
        fs::write(dir.path().join(PROJECT_DIR).join("config.toml"), "fields = 3").unwrap();

        let err = Config::load_project_config(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse project config"));
    }

    #[test]
    fn find_project_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(PROJECT_DIR)).unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = Config::find_project_root_from(&sub_dir);
        assert_eq!(root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn no_project_root() {
        let dir = TempDir::new().unwrap();
        assert!(Config::find_project_root_from(dir.path()).is_none());
    }
}
