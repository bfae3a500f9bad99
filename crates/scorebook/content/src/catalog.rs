//! Named match formats.

use std::collections::BTreeMap;

use scorebook_core::FormatConfig;

/// Match formats keyed by a short case-insensitive name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatCatalog {
    formats: BTreeMap<String, FormatConfig>,
}

impl FormatCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three standard presets under `t20`, `odi` and `first_class`.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert("t20", FormatConfig::t20());
        catalog.insert("odi", FormatConfig::one_day());
        catalog.insert("first_class", FormatConfig::first_class());
        catalog
    }

    /// Adds or replaces a format. Returns the previous entry under `key`.
    pub fn insert(&mut self, key: &str, format: FormatConfig) -> Option<FormatConfig> {
        self.formats.insert(normalize(key), format)
    }

    pub fn get(&self, key: &str) -> Option<&FormatConfig> {
        self.formats.get(&normalize(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.formats.contains_key(&normalize(key))
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Merges `other` into `self`; entries in `other` win.
    pub fn extend(&mut self, other: FormatCatalog) {
        self.formats.extend(other.formats);
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}
