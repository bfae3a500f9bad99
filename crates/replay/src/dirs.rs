//! Content directory resolution.

use std::path::PathBuf;

use anyhow::Result;

/// Environment variable naming the content directory.
pub const DATA_DIR_ENV: &str = "SCOREBOOK_DATA_DIR";

/// Get the content directory for scripts, rosters and formats
///
/// Resolution order:
/// - `$SCOREBOOK_DATA_DIR`
/// - Platform data directory (`~/.local/share/scorebook` on Linux,
///   `~/Library/Application Support/scorebook` on macOS, `%APPDATA%\scorebook`
///   on Windows) when it exists
/// - The content bundled with the workspace
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let platform = directories::ProjectDirs::from("", "", "scorebook")
        .map(|dirs| dirs.data_dir().to_path_buf());
    if let Some(dir) = platform
        && dir.is_dir()
    {
        return Ok(dir);
    }

    Ok(bundled_data_dir())
}

/// Sample content shipped with the content crate.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("scorebook")
        .join("content")
        .join("data")
}
