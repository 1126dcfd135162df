//! Static alias table
//!
//! Base URLs may start with an alias such as `@web`, resolved per
//! environment. `@web/nb` becomes `https://example.com/nb` when `@web` is
//! `https://example.com`.

use std::collections::BTreeMap;

use super::AliasResolver;

/// Alias table loaded from configuration
#[derive(Debug, Clone, Default)]
pub struct Aliases {
    aliases: BTreeMap<String, String>,
}

impl Aliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines an alias. The leading `@` is optional; a trailing `/` on the
    /// value is dropped.
    pub fn insert(&mut self, alias: &str, value: &str) {
        let alias = format!("@{}", alias.trim_start_matches('@'));
        self.aliases.insert(alias, value.trim_end_matches('/').to_string());
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Aliases {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut aliases = Aliases::new();
        for (alias, value) in iter {
            aliases.insert(alias.as_ref(), value.as_ref());
        }
        aliases
    }
}

impl AliasResolver for Aliases {
    fn resolve(&self, value: &str) -> Option<String> {
        if !value.starts_with('@') {
            return Some(value.to_string());
        }

        let (alias, rest) = value.split_at(value.find('/').unwrap_or(value.len()));
        let base = self.get(alias);
        if base.is_none() {
            tracing::debug!(alias, "unknown alias");
        }

        base.map(|base| format!("{}{}", base, rest))
    }
}
