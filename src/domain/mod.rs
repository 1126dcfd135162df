//! Domain models for linkfield
//!
//! Contains the link value, the records links resolve to, the field
//! definition and the URL value object, without any I/O concerns.

mod element;
mod field;
mod id;
mod link;
mod site;
mod url;

pub use element::{Element, ElementKind, ElementStatus};
pub use field::{LinkField, Settings};
pub use id::{ElementId, IdError, SiteId};
pub use link::Link;
pub use site::Site;
pub use url::{QueryParams, Url};
