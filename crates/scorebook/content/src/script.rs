//! Recorded matches that can be replayed through an innings session.
//!
//! A [`MatchScript`] names the format and the two sides, and lists every
//! delivery over by over together with the players picked along the way.
//! [`ScriptedSelection`] answers the session's selection requests from the
//! script so a replay is fully deterministic.

use std::collections::VecDeque;

use scorebook_core::{
    BallOutcome, BatterRequest, BowlerRequest, ErrorSeverity, FormatConfig, OpenersRequest,
    OrderedSelection, OutcomeError, PlayerNumber, ScoringError, SelectionPolicy,
};
use tracing::debug;

/// A whole match: one or two innings in a named format.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchScript {
    pub title: String,
    /// Key into the format catalog.
    pub format: String,
    pub innings: Vec<InningsScript>,
}

/// One side's turn at bat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InningsScript {
    /// Roster key of the batting side.
    pub batting: String,
    /// Roster key of the fielding side.
    pub bowling: String,
    /// Striker first.
    pub openers: (PlayerNumber, PlayerNumber),
    pub overs: Vec<OverScript>,
    /// Incoming batters in the order they walked in. Once exhausted the
    /// batting order is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub replacements: Vec<PlayerNumber>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverScript {
    pub bowler: PlayerNumber,
    pub deliveries: Vec<BallOutcome>,
}

impl OverScript {
    pub fn legal_balls(&self) -> u32 {
        self.deliveries.iter().filter(|d| d.is_legal()).count() as u32
    }
}

impl InningsScript {
    /// Every delivery of the innings in bowling order.
    pub fn feed(&self) -> impl Iterator<Item = BallOutcome> + '_ {
        self.overs
            .iter()
            .flat_map(|over| over.deliveries.iter().cloned())
    }

    pub fn delivery_count(&self) -> usize {
        self.overs.iter().map(|over| over.deliveries.len()).sum()
    }

    pub fn selection(&self) -> ScriptedSelection {
        ScriptedSelection::new(self)
    }

    fn validate(&self, index: usize, format: &FormatConfig) -> Result<(), ScriptError> {
        if self.batting.eq_ignore_ascii_case(&self.bowling) {
            return Err(ScriptError::SameSide {
                innings: index,
                side: self.batting.clone(),
            });
        }
        if let Some(max) = format.max_overs
            && self.overs.len() as u32 > max
        {
            return Err(ScriptError::TooManyOvers {
                innings: index,
                overs: self.overs.len() as u32,
                max,
            });
        }

        let last = self.overs.len().saturating_sub(1);
        for (over_index, over) in self.overs.iter().enumerate() {
            for delivery in &over.deliveries {
                delivery
                    .validate()
                    .map_err(|source| ScriptError::Malformed {
                        innings: index,
                        over: over_index,
                        source,
                    })?;
            }
            let legal = over.legal_balls();
            let expected = format.balls_per_over;
            // Only the final over of an innings may stop short.
            if legal > expected || (over_index < last && legal != expected) {
                return Err(ScriptError::OverLength {
                    innings: index,
                    over: over_index,
                    legal,
                    expected,
                });
            }
        }
        Ok(())
    }
}

impl MatchScript {
    /// Checks the script's shape against `format` before anything is replayed.
    pub fn validate(&self, format: &FormatConfig) -> Result<(), ScriptError> {
        let count = self.innings.len();
        if !(1..=2).contains(&count) {
            return Err(ScriptError::InningsCount { count });
        }
        for (index, innings) in self.innings.iter().enumerate() {
            innings.validate(index, format)?;
        }
        if let [first, second] = self.innings.as_slice()
            && !(first.batting.eq_ignore_ascii_case(&second.bowling)
                && first.bowling.eq_ignore_ascii_case(&second.batting))
        {
            return Err(ScriptError::SidesNotSwapped);
        }
        Ok(())
    }

    /// Roster keys of the side batting first and the side fielding first.
    pub fn sides(&self) -> Option<(&str, &str)> {
        self.innings
            .first()
            .map(|first| (first.batting.as_str(), first.bowling.as_str()))
    }
}

/// A script that cannot be replayed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("a match has one or two innings, script has {count}")]
    InningsCount { count: usize },

    #[error("innings {innings}: {side} cannot bat and bowl")]
    SameSide { innings: usize, side: String },

    #[error("the second innings must swap the sides of the first")]
    SidesNotSwapped,

    #[error("innings {innings}: {overs} overs exceed the format limit of {max}")]
    TooManyOvers { innings: usize, overs: u32, max: u32 },

    #[error("innings {innings}, over {over}: {legal} legal deliveries, expected {expected}")]
    OverLength {
        innings: usize,
        over: usize,
        legal: u32,
        expected: u32,
    },

    #[error("innings {innings}, over {over}: {source}")]
    Malformed {
        innings: usize,
        over: usize,
        source: OutcomeError,
    },
}

impl ScoringError for ScriptError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InningsCount { .. } => "SCRIPT_INNINGS_COUNT",
            Self::SameSide { .. } => "SCRIPT_SAME_SIDE",
            Self::SidesNotSwapped => "SCRIPT_SIDES_NOT_SWAPPED",
            Self::TooManyOvers { .. } => "SCRIPT_TOO_MANY_OVERS",
            Self::OverLength { .. } => "SCRIPT_OVER_LENGTH",
            Self::Malformed { .. } => "SCRIPT_MALFORMED_DELIVERY",
        }
    }
}

/// Selection policy that replays the choices recorded in an [`InningsScript`].
///
/// Bowlers come strictly from the script; running out of them declines the
/// request. Openers and incoming batters fall back to the batting order.
#[derive(Clone, Debug)]
pub struct ScriptedSelection {
    openers: Option<(PlayerNumber, PlayerNumber)>,
    bowlers: VecDeque<PlayerNumber>,
    batters: VecDeque<PlayerNumber>,
}

impl ScriptedSelection {
    pub fn new(script: &InningsScript) -> Self {
        Self {
            openers: Some(script.openers),
            bowlers: script.overs.iter().map(|over| over.bowler).collect(),
            batters: script.replacements.iter().copied().collect(),
        }
    }

    /// Scripted bowlers not yet handed out.
    pub fn bowlers_left(&self) -> usize {
        self.bowlers.len()
    }
}

impl SelectionPolicy for ScriptedSelection {
    fn choose_openers(
        &mut self,
        request: &OpenersRequest<'_>,
    ) -> Option<(PlayerNumber, PlayerNumber)> {
        self.openers
            .take()
            .or_else(|| OrderedSelection.choose_openers(request))
    }

    fn choose_bowler(&mut self, request: &BowlerRequest<'_>) -> Option<PlayerNumber> {
        let bowler = self.bowlers.pop_front();
        if bowler.is_none() {
            debug!(over = request.over, "script has no bowler left");
        }
        bowler
    }

    fn choose_batter(&mut self, request: &BatterRequest<'_>) -> Option<PlayerNumber> {
        self.batters.pop_front().or_else(|| {
            debug!(wickets = request.wickets, "script exhausted, using batting order");
            OrderedSelection.choose_batter(request)
        })
    }
}

#[cfg(test)]
mod tests {
    use scorebook_core::{CreaseEnd, DismissalDetail};

    use super::*;

    fn over(bowler: u32, deliveries: Vec<BallOutcome>) -> OverScript {
        OverScript {
            bowler: PlayerNumber(bowler),
            deliveries,
        }
    }

    fn innings(batting: &str, bowling: &str, overs: Vec<OverScript>) -> InningsScript {
        InningsScript {
            batting: batting.to_string(),
            bowling: bowling.to_string(),
            openers: (PlayerNumber(1), PlayerNumber(2)),
            overs,
            replacements: vec![PlayerNumber(5)],
        }
    }

    fn full_over(bowler: u32) -> OverScript {
        over(bowler, vec![BallOutcome::dot(); 6])
    }

    #[test]
    fn valid_script_passes() {
        let short = over(
            12,
            vec![
                BallOutcome::Wide {
                    runs: 1,
                    swapped: false,
                },
                BallOutcome::run_out("Buttler", CreaseEnd::Striker, 1),
            ],
        );
        let script = MatchScript {
            title: "Friendly".to_string(),
            format: "t20".to_string(),
            innings: vec![
                innings("home", "away", vec![full_over(11), short]),
                innings("away", "home", vec![full_over(1)]),
            ],
        };
        assert_eq!(script.validate(&FormatConfig::t20()), Ok(()));
        assert_eq!(script.sides(), Some(("home", "away")));
        assert_eq!(script.innings[0].delivery_count(), 8);
        assert_eq!(script.innings[0].feed().filter(BallOutcome::is_legal).count(), 7);
    }

    #[test]
    fn short_over_before_the_last_is_rejected() {
        let script = MatchScript {
            title: "Friendly".to_string(),
            format: "t20".to_string(),
            innings: vec![innings(
                "home",
                "away",
                vec![over(11, vec![BallOutcome::dot(); 5]), full_over(12)],
            )],
        };
        assert_eq!(
            script.validate(&FormatConfig::t20()),
            Err(ScriptError::OverLength {
                innings: 0,
                over: 0,
                legal: 5,
                expected: 6,
            })
        );
    }

    #[test]
    fn malformed_delivery_and_side_errors() {
        let bad = MatchScript {
            title: "Friendly".to_string(),
            format: "t20".to_string(),
            innings: vec![innings(
                "home",
                "away",
                vec![over(11, vec![BallOutcome::wicket(DismissalDetail::caught(""))])],
            )],
        };
        assert!(matches!(
            bad.validate(&FormatConfig::t20()),
            Err(ScriptError::Malformed {
                source: OutcomeError::MissingFielder,
                ..
            })
        ));

        let unswapped = MatchScript {
            innings: vec![
                innings("home", "away", vec![full_over(11)]),
                innings("home", "away", vec![full_over(11)]),
            ],
            ..bad.clone()
        };
        assert_eq!(
            unswapped.validate(&FormatConfig::t20()),
            Err(ScriptError::SidesNotSwapped)
        );

        let none = MatchScript {
            innings: Vec::new(),
            ..bad
        };
        assert_eq!(
            none.validate(&FormatConfig::t20()),
            Err(ScriptError::InningsCount { count: 0 })
        );
    }

    #[test]
    fn too_many_overs_for_the_format() {
        let format = FormatConfig::custom("Two", Some(2), None).unwrap();
        let script = MatchScript {
            title: "Friendly".to_string(),
            format: "two".to_string(),
            innings: vec![innings(
                "home",
                "away",
                vec![full_over(11), full_over(12), full_over(11)],
            )],
        };
        assert_eq!(
            script.validate(&format),
            Err(ScriptError::TooManyOvers {
                innings: 0,
                overs: 3,
                max: 2,
            })
        );
    }
}
