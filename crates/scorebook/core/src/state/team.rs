use std::collections::{BTreeMap, BTreeSet};

use super::{Player, PlayerNumber};
use crate::error::{ErrorSeverity, ScoringError};

/// Ordered roster of players with batting/bowling order and role designations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub name: String,
    players: BTreeMap<PlayerNumber, Player>,
    /// Batting order; a permutation of the roster's numbers.
    order: Vec<PlayerNumber>,
    /// Preferred bowling order; a subset of the roster.
    bowler_order: Vec<PlayerNumber>,
    captain: Option<PlayerNumber>,
    keeper: Option<PlayerNumber>,
}

impl Team {
    /// Creates an empty team.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: BTreeMap::new(),
            order: Vec::new(),
            bowler_order: Vec::new(),
            captain: None,
            keeper: None,
        }
    }

    /// Builds a team from an ordered `(shirt number, name)` roster.
    ///
    /// Roster order becomes both the batting and the bowling order.
    pub fn from_roster<I, S>(name: impl Into<String>, roster: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut team = Self::new(name);
        for (number, player_name) in roster {
            team.add_player(Player::new(number, player_name))?;
        }
        if team.players.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        team.bowler_order = team.order.clone();
        Ok(team)
    }

    /// Adds a player and appends them to the batting order.
    pub fn add_player(&mut self, player: Player) -> Result<(), RosterError> {
        let number = player.number;
        if self.players.contains_key(&number) {
            return Err(RosterError::DuplicatePlayer { number });
        }
        self.players.insert(number, player);
        self.order.push(number);
        Ok(())
    }

    /// Replaces the batting order; must be a permutation of the roster.
    pub fn set_batting_order(&mut self, order: Vec<PlayerNumber>) -> Result<(), RosterError> {
        let unique: BTreeSet<_> = order.iter().copied().collect();
        if unique.len() != order.len() {
            let duplicate = first_duplicate(&order).unwrap_or(order[0]);
            return Err(RosterError::DuplicateInOrder { number: duplicate });
        }
        for number in &order {
            self.require(*number)?;
        }
        if order.len() != self.players.len() {
            return Err(RosterError::OrderNotPermutation {
                expected: self.players.len(),
                actual: order.len(),
            });
        }
        self.order = order;
        Ok(())
    }

    /// Replaces the preferred bowling order; every entry must be on the roster.
    pub fn set_bowler_order(&mut self, order: Vec<PlayerNumber>) -> Result<(), RosterError> {
        if let Some(duplicate) = first_duplicate(&order) {
            return Err(RosterError::DuplicateInOrder { number: duplicate });
        }
        for number in &order {
            self.require(*number)?;
        }
        self.bowler_order = order;
        Ok(())
    }

    pub fn set_captain(&mut self, number: Option<PlayerNumber>) -> Result<(), RosterError> {
        if let Some(number) = number {
            self.require(number)?;
        }
        self.captain = number;
        Ok(())
    }

    pub fn set_keeper(&mut self, number: Option<PlayerNumber>) -> Result<(), RosterError> {
        if let Some(number) = number {
            self.require(number)?;
        }
        self.keeper = number;
        Ok(())
    }

    pub fn captain(&self) -> Option<PlayerNumber> {
        self.captain
    }

    pub fn keeper(&self) -> Option<PlayerNumber> {
        self.keeper
    }

    pub fn contains(&self, number: PlayerNumber) -> bool {
        self.players.contains_key(&number)
    }

    pub fn player(&self, number: PlayerNumber) -> Option<&Player> {
        self.players.get(&number)
    }

    pub fn player_mut(&mut self, number: PlayerNumber) -> Option<&mut Player> {
        self.players.get_mut(&number)
    }

    /// All players sorted by shirt number.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn batting_order(&self) -> &[PlayerNumber] {
        &self.order
    }

    /// Preferred bowling order, falling back to shirt-number order.
    pub fn bowler_order(&self) -> Vec<PlayerNumber> {
        if self.bowler_order.is_empty() {
            self.players.keys().copied().collect()
        } else {
            self.bowler_order.clone()
        }
    }

    /// Players in batting order.
    pub fn batters(&self) -> impl Iterator<Item = &Player> {
        self.order.iter().filter_map(|number| self.players.get(number))
    }

    /// Batting-order members who have not walked out yet, excluding `survivor`.
    pub fn yet_to_bat(&self, survivor: Option<PlayerNumber>) -> Vec<PlayerNumber> {
        self.order
            .iter()
            .copied()
            .filter(|number| Some(*number) != survivor)
            .filter(|number| self.players.get(number).is_some_and(|p| !p.batted))
            .collect()
    }

    /// Sum of every player's batting runs.
    pub fn batting_runs(&self) -> u32 {
        self.players.values().map(|p| p.batting.runs).sum()
    }

    /// Display name with `(c)` / `†` role markers.
    pub fn display_name(&self, number: PlayerNumber) -> Option<String> {
        let player = self.players.get(&number)?;
        let mut name = player.name.clone();
        if self.captain == Some(number) {
            name.push_str(" (c)");
        }
        if self.keeper == Some(number) {
            name.push_str(" †");
        }
        Some(name)
    }

    fn require(&self, number: PlayerNumber) -> Result<(), RosterError> {
        if self.players.contains_key(&number) {
            Ok(())
        } else {
            Err(RosterError::UnknownPlayer { number })
        }
    }
}

fn first_duplicate(order: &[PlayerNumber]) -> Option<PlayerNumber> {
    let mut seen = BTreeSet::new();
    order.iter().copied().find(|number| !seen.insert(*number))
}

/// Errors raised while assembling a team.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("roster is empty")]
    EmptyRoster,

    #[error("player {number} appears twice in the roster")]
    DuplicatePlayer { number: PlayerNumber },

    #[error("player {number} appears twice in the order")]
    DuplicateInOrder { number: PlayerNumber },

    #[error("player {number} is not on the roster")]
    UnknownPlayer { number: PlayerNumber },

    #[error("batting order lists {actual} players but the roster has {expected}")]
    OrderNotPermutation { expected: usize, actual: usize },
}

impl ScoringError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use RosterError::*;
        match self {
            EmptyRoster => "ROSTER_EMPTY",
            DuplicatePlayer { .. } => "ROSTER_DUPLICATE_PLAYER",
            DuplicateInOrder { .. } => "ROSTER_DUPLICATE_IN_ORDER",
            UnknownPlayer { .. } => "ROSTER_UNKNOWN_PLAYER",
            OrderNotPermutation { .. } => "ROSTER_ORDER_NOT_PERMUTATION",
        }
    }
}
