//! Content factory for loading match content from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use scorebook_core::{FormatConfig, Team};

use crate::catalog::FormatCatalog;
use crate::loaders::{FormatLoader, LoadResult, RosterLoader, ScriptLoader};
use crate::script::MatchScript;

/// Content factory that loads all match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── formats.toml
/// ├── teams/
/// │   ├── india.ron
/// │   └── australia.ron
/// └── scripts/
///     └── demo.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Everything needed to replay a script.
#[derive(Clone, Debug)]
pub struct LoadedMatch {
    pub script: MatchScript,
    pub format: FormatConfig,
    /// Side batting first.
    pub home: Team,
    /// Side fielding first.
    pub away: Team,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Builtin presets, extended by `formats.toml` when present.
    pub fn load_formats(&self) -> LoadResult<FormatCatalog> {
        let path = self.data_dir.join("formats.toml");
        if path.exists() {
            FormatLoader::load(&path)
        } else {
            Ok(FormatCatalog::builtin())
        }
    }

    /// Load a roster from `teams/{key}.ron`.
    pub fn load_team(&self, key: &str) -> LoadResult<Team> {
        let path = self.data_dir.join("teams").join(format!("{}.ron", key));
        RosterLoader::load(&path)
    }

    /// Load a match script from `scripts/{name}.ron`.
    pub fn load_script(&self, name: &str) -> LoadResult<MatchScript> {
        let path = self.data_dir.join("scripts").join(format!("{}.ron", name));
        ScriptLoader::load(&path)
    }

    /// Load a script together with its format and both rosters, and check
    /// the script against the format.
    pub fn load_match(&self, name: &str) -> LoadResult<LoadedMatch> {
        let script = self.load_script(name)?;
        let formats = self.load_formats()?;
        let format = formats
            .get(&script.format)
            .cloned()
            .with_context(|| format!("Unknown format '{}' in script '{}'", script.format, name))?;
        script
            .validate(&format)
            .with_context(|| format!("Script '{}' does not fit format '{}'", name, format.name))?;

        let (home_key, away_key) = script
            .sides()
            .with_context(|| format!("Script '{}' has no innings", name))?;
        let home = self.load_team(home_key)?;
        let away = self.load_team(away_key)?;

        Ok(LoadedMatch {
            script,
            format,
            home,
            away,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
