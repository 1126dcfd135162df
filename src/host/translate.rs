//! Table-driven translator
//!
//! Messages missing from the table are used verbatim, so an empty table is
//! the identity translation.

use std::collections::BTreeMap;

use super::Translator;

#[derive(Debug, Clone, Default)]
pub struct Translations {
    messages: BTreeMap<String, String>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, message: impl Into<String>, translation: impl Into<String>) {
        self.messages.insert(message.into(), translation.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut translations = Translations::new();
        for (message, translation) in iter {
            translations.insert(message, translation);
        }
        translations
    }
}

impl Translator for Translations {
    fn translate(&self, message: &str, params: &[(&str, &str)]) -> String {
        let mut text = self
            .messages
            .get(message)
            .cloned()
            .unwrap_or_else(|| message.to_string());

        for (name, value) in params {
            text = text.replace(&format!("{{{}}}", name), value);
        }

        text
    }
}
