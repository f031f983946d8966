//! Translation seam.
//!
//! The real i18n pipeline lives outside this workspace. Everything here talks
//! to it through [`Translator`]; [`MapTranslator`] is the table-backed
//! implementation used by the demo and by tests.

use std::collections::HashMap;

/// Key of the section header shown above a provider's actions.
///
/// Takes an `actionProviderName` substitution.
pub const DEFAULT_ACTION_SEARCH_SECTION_HEADER_PREFIX: &str = "quicksearch.actions.section_header";

/// One set of `{name}` -> value replacements.
pub type Substitution = HashMap<String, String>;

/// Resolves a key into a localized string.
#[cfg_attr(test, mockall::automock)]
pub trait Translator: Send + Sync {
    /// Translate `key`, applying every substitution map in order.
    fn translate(&self, key: &str, substitutions: &[Substitution]) -> String;
}

/// Translator backed by an in-memory table.
///
/// Unknown keys resolve to the key itself so untranslated labels still render.
#[derive(Debug, Clone, Default)]
pub struct MapTranslator {
    entries: HashMap<String, String>,
}

impl MapTranslator {
    /// Create an empty translator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a translator preloaded with the built-in strings.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_entry(
                DEFAULT_ACTION_SEARCH_SECTION_HEADER_PREFIX,
                "Actions for {actionProviderName}",
            )
            .with_entry("power.actions", "Power Actions")
    }

    /// Add or replace a single entry.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Merge a table of entries, overriding existing keys.
    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Number of known keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for MapTranslator {
    fn translate(&self, key: &str, substitutions: &[Substitution]) -> String {
        let mut text = match self.entries.get(key) {
            Some(template) => template.clone(),
            None => {
                tracing::debug!("No translation for '{}'", key);
                key.to_string()
            }
        };

        for substitution in substitutions {
            for (name, value) in substitution {
                text = text.replace(&format!("{{{}}}", name), value);
            }
        }

        text
    }
}
