//! # Link Types
//!
//! Polymorphic link targets for a link field.
//!
//! ## Overview
//!
//! A link field stores a [`Link`](crate::domain::Link): a type name plus a
//! raw value. The type name selects a [`LinkType`] from the
//! [`LinkTypeRegistry`], which knows how to render the type's controls,
//! normalise and validate its values, and resolve a link to text, a URL or
//! an element.
//!
//! ## Bundled Types
//!
//! | Name | Type | Value |
//! |------|------|-------|
//! | `site` | [`SiteLinkType`] | site ID |
//! | `url`, `email`, `tel`, `custom` | [`InputLinkType`] | typed-in text |
//! | `entry`, `asset`, `category`, `user` | [`ElementLinkType`] | element ID |
//!
//! ## Host Services
//!
//! Link types never reach for global state. Sites, elements, templates,
//! translations and aliases come from the
//! [`HostServices`](crate::host::HostServices) passed at construction.
//!
//! ## Key Types
//!
//! - [`LinkType`] - The contract every link type implements
//! - [`LinkTypeRegistry`] - Name to type dispatch and link-level resolution
//! - [`ValidationError`] - A problem with a submitted value

mod element;
mod input;
mod protocol;
mod registry;
mod render;
mod site;

pub use element::ElementLinkType;
pub use input::{InputKind, InputLinkType};
pub use protocol::{LinkType, LinkTypeMeta, ValidationError};
pub use registry::{LinkTypeGroup, LinkTypeRegistry, RegistryError};
pub use site::{SiteFilter, SiteLinkType, SiteOption};
