//! Team roster loader.

use std::path::Path;

use scorebook_core::{PlayerNumber, RosterError, Team};

use crate::loaders::{LoadResult, read_file};

/// Roster as written in a RON file.
///
/// ```ron
/// (
///     name: "England",
///     players: [(1, "Zak Crawley"), (2, "Ben Duckett"), (3, "Joe Root")],
///     captain: Some(3),
///     keeper: None,
///     bowlers: [3, 1],
/// )
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RosterSpec {
    pub name: String,
    /// `(shirt number, name)` in batting order.
    pub players: Vec<(u32, String)>,
    #[serde(default)]
    pub captain: Option<u32>,
    #[serde(default)]
    pub keeper: Option<u32>,
    /// Preferred bowling order. Empty means roster order.
    #[serde(default)]
    pub bowlers: Vec<u32>,
}

impl RosterSpec {
    /// Builds a validated [`Team`].
    pub fn into_team(self) -> Result<Team, RosterError> {
        let mut team = Team::from_roster(self.name, self.players)?;
        team.set_captain(self.captain.map(PlayerNumber))?;
        team.set_keeper(self.keeper.map(PlayerNumber))?;
        if !self.bowlers.is_empty() {
            team.set_bowler_order(self.bowlers.into_iter().map(PlayerNumber).collect())?;
        }
        Ok(team)
    }
}

/// Loader for team rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file and build its team.
    pub fn load(path: &Path) -> LoadResult<Team> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load roster {}: {}", path.display(), e))
    }

    /// Parse a roster from RON text.
    pub fn parse(content: &str) -> LoadResult<Team> {
        let spec: RosterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        let name = spec.name.clone();
        spec.into_team()
            .map_err(|e| anyhow::anyhow!("Invalid roster '{}': {}", name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_and_bowling_order() {
        let team = RosterLoader::parse(
            r#"(
                name: "England",
                players: [(1, "Zak Crawley"), (2, "Ben Duckett"), (3, "Joe Root"), (4, "Mark Wood")],
                captain: Some(3),
                keeper: Some(2),
                bowlers: [4, 3],
            )"#,
        )
        .unwrap();

        assert_eq!(team.name, "England");
        assert_eq!(team.len(), 4);
        assert_eq!(team.batting_order()[0], PlayerNumber(1));
        assert_eq!(team.bowler_order(), vec![PlayerNumber(4), PlayerNumber(3)]);
        assert_eq!(
            team.display_name(PlayerNumber(3)).as_deref(),
            Some("Joe Root (c)")
        );
        assert_eq!(
            team.display_name(PlayerNumber(2)).as_deref(),
            Some("Ben Duckett †")
        );
    }

    #[test]
    fn optional_fields_default() {
        let team =
            RosterLoader::parse(r#"(name: "Club", players: [(7, "Sam Curran")])"#).unwrap();
        assert_eq!(team.captain(), None);
        assert_eq!(team.bowler_order(), vec![PlayerNumber(7)]);
    }

    #[test]
    fn rejects_unknown_captain() {
        let err = RosterLoader::parse(
            r#"(name: "Club", players: [(7, "Sam Curran")], captain: Some(9))"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid roster 'Club'"));
    }
}
