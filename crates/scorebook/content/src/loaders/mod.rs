//! Content loaders for reading match data from files.
//!
//! Formats come from TOML, rosters and match scripts from RON. Every loader
//! validates what it reads against the core's own rules before handing it
//! out, so a loaded value is ready to drive a session.

pub mod factory;
pub mod format;
pub mod roster;
pub mod script;

pub use factory::{ContentFactory, LoadedMatch};
pub use format::FormatLoader;
pub use roster::{RosterLoader, RosterSpec};
pub use script::ScriptLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
