//! # Storage Layer
//!
//! Project files for linkfield, all plain TOML so they diff well.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Aliases, translations, fields | TOML | `.linkfield/config.toml` |
//! | Sites and elements | TOML | `.linkfield/catalog.toml` |
//! | User defaults | TOML | `~/.config/linkfield/config.toml` |
//!
//! ## Project Structure
//!
//! ```text
//! .linkfield/
//! ├── config.toml           # Project configuration
//! └── catalog.toml          # Sites and elements links can target
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for a linkfield project
//! - [`Catalog`] - Sites and elements, serving as the host repositories
//! - [`Config`] - Project and global configuration

mod catalog;
mod config;
mod project;

pub use catalog::{Catalog, CatalogError};
pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, PROJECT_DIR};
pub use project::{Project, ProjectError};
