//! linkfield - typed link fields
//!
//! A link field stores a link of one of several types (a site, a typed-in
//! URL, an entry, ...). Each type knows how to render its controls, validate
//! values and resolve a stored link to text, a URL or an element. The crate
//! also carries the small URL value object used to post-process resolved
//! URLs.

pub mod cli;
pub mod domain;
pub mod host;
pub mod link_type;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use domain::{Link, LinkField, QueryParams, Site, Url};
pub use host::HostServices;
pub use link_type::{LinkType, LinkTypeRegistry, ValidationError};
