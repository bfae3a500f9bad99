use std::collections::BTreeMap;
use std::fmt;

use super::OversBowled;

/// Shirt number identifying a player within one team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PlayerNumber(pub u32);

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for PlayerNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Batting ledger for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattingFigures {
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    /// Dismissal label (`"c Smith b Starc"`); `None` while not out.
    pub dismissal: Option<String>,
    /// Deliveries keyed by the runs the batter scored off them.
    pub scoring_distribution: BTreeMap<u32, u32>,
}

impl BattingFigures {
    pub const NOT_OUT: &'static str = "not out";

    pub fn is_out(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Dismissal label, or `"not out"`.
    pub fn dismissal_text(&self) -> &str {
        self.dismissal.as_deref().unwrap_or(Self::NOT_OUT)
    }

    /// Runs per hundred balls; 0 before the first ball.
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        f64::from(self.runs) * 100.0 / f64::from(self.balls)
    }

    /// How many deliveries yielded exactly `runs` off the bat.
    pub fn deliveries_scoring(&self, runs: u32) -> u32 {
        self.scoring_distribution.get(&runs).copied().unwrap_or(0)
    }
}

/// Bowling ledger for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BowlingFigures {
    /// Legal deliveries bowled.
    pub balls: u32,
    pub runs: u32,
    pub wickets: u32,
    pub maidens: u32,
    pub dots: u32,
    pub fours: u32,
    pub sixes: u32,
    pub wides: u32,
    pub noballs: u32,
}

impl BowlingFigures {
    pub fn overs(&self, balls_per_over: u32) -> OversBowled {
        OversBowled::from_legal_balls(self.balls, balls_per_over)
    }

    /// Runs conceded per over; 0 before the first legal ball.
    pub fn economy(&self, balls_per_over: u32) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        f64::from(self.runs) * f64::from(balls_per_over) / f64::from(self.balls)
    }
}

/// One competitor's batting and bowling figures for a match.
///
/// The same player value is used in both innings of a match: batting figures
/// accrue while their team bats, bowling figures while it fields.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub number: PlayerNumber,
    pub name: String,
    pub batting: BattingFigures,
    pub bowling: BowlingFigures,
    /// Walked out to the crease at least once.
    pub batted: bool,
    /// Bowled at least one over.
    pub bowled: bool,
}

impl Player {
    pub fn new(number: impl Into<PlayerNumber>, name: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            batting: BattingFigures::default(),
            bowling: BowlingFigures::default(),
            batted: false,
            bowled: false,
        }
    }

    /// Last whitespace-separated token of the name.
    pub fn surname(&self) -> &str {
        surname(&self.name)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number.0, self.name)
    }
}

/// Last whitespace-separated token of `name`, or `name` itself when blank.
pub(crate) fn surname(name: &str) -> &str {
    name.split_whitespace().last().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surname_is_last_token() {
        assert_eq!(Player::new(1, "Mitchell Starc").surname(), "Starc");
        assert_eq!(Player::new(2, "Rashid").surname(), "Rashid");
        assert_eq!(surname("  Jos   Buttler "), "Buttler");
    }

    #[test]
    fn rates_are_zero_before_first_ball() {
        let player = Player::new(7, "Ben Stokes");
        assert_eq!(player.batting.strike_rate(), 0.0);
        assert_eq!(player.bowling.economy(6), 0.0);
        assert_eq!(player.batting.dismissal_text(), "not out");
    }

    #[test]
    fn economy_uses_legal_balls() {
        let bowling = BowlingFigures {
            balls: 9,
            runs: 12,
            ..Default::default()
        };
        assert_eq!(bowling.economy(6), 8.0);
        assert_eq!(bowling.overs(6).to_string(), "1.3");
    }
}
