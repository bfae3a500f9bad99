//! Match script loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::script::MatchScript;

/// Loader for recorded matches from RON files.
///
/// Deliveries use the outcome variants directly:
///
/// ```ron
/// (
///     title: "Group A",
///     format: "t20",
///     innings: [(
///         batting: "india",
///         bowling: "australia",
///         openers: (1, 2),
///         overs: [(
///             bowler: 21,
///             deliveries: [
///                 Normal(runs: 4),
///                 Wide(runs: 1),
///                 Wicket(detail: Caught(fielder: "Steve Smith")),
///             ],
///         )],
///         replacements: [3],
///     )],
/// )
/// ```
///
/// Structure is checked here; the shape against a format is checked with
/// [`MatchScript::validate`] once the format is known.
pub struct ScriptLoader;

impl ScriptLoader {
    pub fn load(path: &Path) -> LoadResult<MatchScript> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load script {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<MatchScript> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse script RON: {}", e))
    }
}
