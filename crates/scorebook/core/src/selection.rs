//! Selection contract between the core and whoever picks players.
//!
//! The core never decides who bowls or who walks in next. It builds a request
//! describing the legal choices, hands it to a [`SelectionPolicy`], and checks
//! the answer. An invalid answer comes back as a [`SelectionError`] without
//! touching the innings; asking again is the caller's business.

use std::collections::BTreeMap;

use crate::config::FormatConfig;
use crate::error::{ErrorSeverity, ScoringError};
use crate::state::{Innings, PlayerNumber, Team};

/// Supplies player choices to the engine and the session.
///
/// Returning `None` declines the choice, which surfaces as
/// [`SelectionError::Declined`].
pub trait SelectionPolicy {
    fn choose_openers(
        &mut self,
        request: &OpenersRequest<'_>,
    ) -> Option<(PlayerNumber, PlayerNumber)>;

    fn choose_bowler(&mut self, request: &BowlerRequest<'_>) -> Option<PlayerNumber>;

    fn choose_batter(&mut self, request: &BatterRequest<'_>) -> Option<PlayerNumber>;
}

/// Who may open the batting.
#[derive(Clone, Debug)]
pub struct OpenersRequest<'a> {
    pub team: &'a str,
    pub order: &'a [PlayerNumber],
    /// Batting-order members who have not batted yet.
    pub eligible: Vec<PlayerNumber>,
}

impl<'a> OpenersRequest<'a> {
    pub fn new(batting: &'a Team) -> Self {
        Self {
            team: &batting.name,
            order: batting.batting_order(),
            eligible: batting.yet_to_bat(None),
        }
    }

    pub fn validate(
        &self,
        striker: PlayerNumber,
        non_striker: PlayerNumber,
    ) -> Result<(), SelectionError> {
        if striker == non_striker {
            return Err(SelectionError::SameOpener { batter: striker });
        }
        for batter in [striker, non_striker] {
            if !self.order.contains(&batter) {
                return Err(SelectionError::UnknownPlayer { number: batter });
            }
            if !self.eligible.contains(&batter) {
                return Err(SelectionError::BatterUnavailable { batter });
            }
        }
        Ok(())
    }
}

/// Who may bowl the next over.
#[derive(Clone, Debug)]
pub struct BowlerRequest<'a> {
    /// 0-indexed over about to start.
    pub over: u32,
    pub previous_bowler: Option<PlayerNumber>,
    /// Overs a bowler may bowl; `None` is unlimited.
    pub cap: Option<u32>,
    /// Over indices each bowler has started this innings.
    pub ledger: &'a BTreeMap<PlayerNumber, Vec<u32>>,
    /// Bowlers in preferred order who satisfy the cap and rotation rules.
    pub eligible: Vec<PlayerNumber>,
    roster: Vec<PlayerNumber>,
}

impl<'a> BowlerRequest<'a> {
    pub fn new(innings: &'a Innings, bowling: &Team, format: &FormatConfig) -> Self {
        let mut request = Self {
            over: innings.next_over_index(),
            previous_bowler: innings.previous_bowler(),
            cap: format.max_bowler_overs,
            ledger: innings.bowler_overs(),
            eligible: Vec::new(),
            roster: bowling.players().map(|p| p.number).collect(),
        };
        request.eligible = bowling
            .bowler_order()
            .into_iter()
            .filter(|bowler| request.validate(*bowler).is_ok())
            .collect();
        request
    }

    pub fn overs_bowled(&self, bowler: PlayerNumber) -> u32 {
        self.ledger.get(&bowler).map_or(0, |overs| overs.len() as u32)
    }

    pub fn last_over(&self, bowler: PlayerNumber) -> Option<u32> {
        self.ledger.get(&bowler).and_then(|overs| overs.last().copied())
    }

    /// Checks the cap and that `bowler` did not bowl the previous over.
    pub fn validate(&self, bowler: PlayerNumber) -> Result<(), SelectionError> {
        if !self.roster.contains(&bowler) {
            return Err(SelectionError::UnknownPlayer { number: bowler });
        }
        let bowled = self.overs_bowled(bowler);
        if let Some(cap) = self.cap
            && bowled >= cap
        {
            return Err(SelectionError::BowlerOverLimit {
                bowler,
                bowled,
                cap,
            });
        }
        if self.previous_bowler == Some(bowler) {
            return Err(SelectionError::ConsecutiveOvers {
                bowler,
                over: self.over,
            });
        }
        Ok(())
    }
}

/// Who may replace a dismissed batter.
#[derive(Clone, Debug)]
pub struct BatterRequest<'a> {
    /// Wickets down including the one just fallen.
    pub wickets: u32,
    pub dismissed: PlayerNumber,
    /// Batter who stays in.
    pub survivor: Option<PlayerNumber>,
    pub order: &'a [PlayerNumber],
    /// Batting-order members not yet batted, survivor excluded.
    pub eligible: Vec<PlayerNumber>,
}

impl<'a> BatterRequest<'a> {
    pub fn new(
        batting: &'a Team,
        wickets: u32,
        dismissed: PlayerNumber,
        survivor: Option<PlayerNumber>,
    ) -> Self {
        Self {
            wickets,
            dismissed,
            survivor,
            order: batting.batting_order(),
            eligible: batting.yet_to_bat(survivor),
        }
    }

    pub fn validate(&self, batter: PlayerNumber) -> Result<(), SelectionError> {
        if !self.order.contains(&batter) {
            return Err(SelectionError::UnknownPlayer { number: batter });
        }
        if !self.eligible.contains(&batter) {
            return Err(SelectionError::BatterUnavailable { batter });
        }
        Ok(())
    }
}

/// Picks the first eligible player every time.
///
/// Openers come from the top of the batting order, bowlers follow the
/// team's bowling order subject to the cap and rotation rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderedSelection;

impl SelectionPolicy for OrderedSelection {
    fn choose_openers(
        &mut self,
        request: &OpenersRequest<'_>,
    ) -> Option<(PlayerNumber, PlayerNumber)> {
        match request.eligible.as_slice() {
            [striker, non_striker, ..] => Some((*striker, *non_striker)),
            _ => None,
        }
    }

    fn choose_bowler(&mut self, request: &BowlerRequest<'_>) -> Option<PlayerNumber> {
        request.eligible.first().copied()
    }

    fn choose_batter(&mut self, request: &BatterRequest<'_>) -> Option<PlayerNumber> {
        request.eligible.first().copied()
    }
}

/// Selection role, used in [`SelectionError::Declined`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SelectionRole {
    Openers,
    Bowler,
    Batter,
}

/// A player choice that breaks an availability or rotation rule.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("player {number} is not available to this team")]
    UnknownPlayer { number: PlayerNumber },

    #[error("bowler {bowler} has bowled {bowled} of {cap} allowed overs")]
    BowlerOverLimit {
        bowler: PlayerNumber,
        bowled: u32,
        cap: u32,
    },

    #[error("bowler {bowler} bowled the over before over {over}")]
    ConsecutiveOvers { bowler: PlayerNumber, over: u32 },

    #[error("batter {batter} has already batted or is at the crease")]
    BatterUnavailable { batter: PlayerNumber },

    #[error("both openers are {batter}")]
    SameOpener { batter: PlayerNumber },

    #[error("no bowler is eligible for over {over}")]
    NoEligibleBowler { over: u32 },

    #[error("need two batters to open, {available} available")]
    NotEnoughBatters { available: usize },

    #[error("selection policy declined to choose {role}")]
    Declined { role: SelectionRole },
}

impl ScoringError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEligibleBowler { .. } | Self::NotEnoughBatters { .. } => {
                ErrorSeverity::Validation
            }
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPlayer { .. } => "SELECTION_UNKNOWN_PLAYER",
            Self::BowlerOverLimit { .. } => "SELECTION_BOWLER_OVER_LIMIT",
            Self::ConsecutiveOvers { .. } => "SELECTION_CONSECUTIVE_OVERS",
            Self::BatterUnavailable { .. } => "SELECTION_BATTER_UNAVAILABLE",
            Self::SameOpener { .. } => "SELECTION_SAME_OPENER",
            Self::NoEligibleBowler { .. } => "SELECTION_NO_ELIGIBLE_BOWLER",
            Self::NotEnoughBatters { .. } => "SELECTION_NOT_ENOUGH_BATTERS",
            Self::Declined { .. } => "SELECTION_DECLINED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowling() -> Team {
        Team::from_roster("Away", [(1, "Pat Cummins"), (2, "Josh Hazlewood"), (3, "Nathan Lyon")])
            .unwrap()
    }

    #[test]
    fn bowler_request_applies_cap_and_rotation() {
        let format = FormatConfig::custom("Short", Some(10), Some(1)).unwrap();
        let batting = Team::from_roster("Home", [(9, "A"), (8, "B")]).unwrap();
        let bowling = bowling();
        let mut innings = Innings::new(&batting, &bowling, 6);
        innings.bowler_overs.insert(PlayerNumber(1), vec![0]);
        innings.previous_bowler = Some(PlayerNumber(2));

        let request = BowlerRequest::new(&innings, &bowling, &format);
        assert_eq!(request.eligible, vec![PlayerNumber(3)]);
        assert_eq!(request.overs_bowled(PlayerNumber(1)), 1);
        assert_eq!(request.last_over(PlayerNumber(1)), Some(0));
        assert_eq!(
            request.validate(PlayerNumber(1)),
            Err(SelectionError::BowlerOverLimit {
                bowler: PlayerNumber(1),
                bowled: 1,
                cap: 1
            })
        );
        assert!(matches!(
            request.validate(PlayerNumber(2)),
            Err(SelectionError::ConsecutiveOvers { .. })
        ));
        assert_eq!(
            request.validate(PlayerNumber(42)),
            Err(SelectionError::UnknownPlayer {
                number: PlayerNumber(42)
            })
        );
    }

    #[test]
    fn openers_must_differ_and_be_in_the_order() {
        let team = bowling();
        let request = OpenersRequest::new(&team);
        assert_eq!(
            request.validate(PlayerNumber(1), PlayerNumber(1)),
            Err(SelectionError::SameOpener {
                batter: PlayerNumber(1)
            })
        );
        assert!(request.validate(PlayerNumber(1), PlayerNumber(7)).is_err());
        assert!(request.validate(PlayerNumber(3), PlayerNumber(1)).is_ok());
        assert_eq!(
            OrderedSelection.choose_openers(&request),
            Some((PlayerNumber(1), PlayerNumber(2)))
        );
    }

    #[test]
    fn replacement_must_not_have_batted() {
        let mut team = bowling();
        team.player_mut(PlayerNumber(1)).unwrap().batted = true;
        team.player_mut(PlayerNumber(2)).unwrap().batted = true;
        let request = BatterRequest::new(&team, 1, PlayerNumber(1), Some(PlayerNumber(2)));
        assert_eq!(request.eligible, vec![PlayerNumber(3)]);
        assert_eq!(
            request.validate(PlayerNumber(2)),
            Err(SelectionError::BatterUnavailable {
                batter: PlayerNumber(2)
            })
        );
        assert!(SelectionError::BatterUnavailable {
            batter: PlayerNumber(2)
        }
        .severity()
        .is_recoverable());
    }
}
