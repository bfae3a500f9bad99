//! Match format loader.

use std::collections::BTreeMap;
use std::path::Path;

use scorebook_core::FormatConfig;
use tracing::debug;

use crate::catalog::FormatCatalog;
use crate::loaders::{LoadResult, read_file};

/// On-disk layout: one `[formats.<key>]` table per format.
#[derive(Debug, serde::Deserialize)]
struct FormatsFile {
    #[serde(default)]
    formats: BTreeMap<String, FormatConfig>,
}

/// Loader for match formats from TOML files.
pub struct FormatLoader;

impl FormatLoader {
    /// Load formats from a TOML file on top of the builtin presets.
    ///
    /// Entries in the file replace presets with the same key.
    ///
    /// ```toml
    /// [formats.t10]
    /// name = "T10"
    /// max_overs = 10
    /// max_bowler_overs = 2
    ///
    /// [formats.t10.phases]
    /// powerplay_overs = 2
    /// final_overs = 2
    /// ```
    pub fn load(path: &Path) -> LoadResult<FormatCatalog> {
        let content = read_file(path)?;
        let mut catalog = FormatCatalog::builtin();
        catalog.extend(Self::parse(&content)?);
        Ok(catalog)
    }

    /// Parse and validate formats from TOML text, without the presets.
    pub fn parse(content: &str) -> LoadResult<FormatCatalog> {
        let file: FormatsFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse formats TOML: {}", e))?;

        let mut catalog = FormatCatalog::new();
        for (key, format) in file.formats {
            format
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid format '{}': {}", key, e))?;
            debug!(%key, name = %format.name, "loaded format");
            catalog.insert(&key, format);
        }
        Ok(catalog)
    }
}
