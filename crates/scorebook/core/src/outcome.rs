//! Ball outcome taxonomy.
//!
//! [`BallOutcome`] is the closed set of delivery classifications the engine
//! understands. Each variant carries exactly the payload needed to replay the
//! delivery, and the per-kind arithmetic (legality, run splits, extras, strike
//! rotation) lives here so the engine only has to route the numbers.

use crate::error::{ErrorSeverity, ScoringError};
use crate::state::{CreaseEnd, Extras, surname};

/// Upper sanity bound for runs on a single delivery.
pub const MAX_RUNS_PER_DELIVERY: u32 = 10;

/// How a batter was dismissed by a wicket credited to the bowler.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DismissalDetail {
    Bowled,
    Caught {
        /// Ignored when `caught_and_bowled` is set.
        #[cfg_attr(feature = "serde", serde(default))]
        fielder: String,
        #[cfg_attr(feature = "serde", serde(default))]
        caught_and_bowled: bool,
    },
    Lbw,
    Stumped {
        keeper: String,
    },
}

impl DismissalDetail {
    pub fn bowled() -> Self {
        Self::Bowled
    }

    pub fn caught(fielder: impl Into<String>) -> Self {
        Self::Caught {
            fielder: fielder.into(),
            caught_and_bowled: false,
        }
    }

    pub fn caught_and_bowled() -> Self {
        Self::Caught {
            fielder: String::new(),
            caught_and_bowled: true,
        }
    }

    pub fn lbw() -> Self {
        Self::Lbw
    }

    pub fn stumped(keeper: impl Into<String>) -> Self {
        Self::Stumped {
            keeper: keeper.into(),
        }
    }

    /// Scorecard label, e.g. `"c Smith b Starc"`.
    pub fn label(&self, bowler: &str) -> String {
        let bowler = surname(bowler);
        match self {
            Self::Bowled => format!("b {bowler}"),
            Self::Caught {
                caught_and_bowled: true,
                ..
            } => format!("c & b {bowler}"),
            Self::Caught { fielder, .. } => format!("c {} b {bowler}", surname(fielder)),
            Self::Lbw => format!("lbw b {bowler}"),
            Self::Stumped { keeper } => format!("st {} b {bowler}", surname(keeper)),
        }
    }

    fn validate(&self) -> Result<(), OutcomeError> {
        match self {
            Self::Caught {
                fielder,
                caught_and_bowled: false,
            } if fielder.trim().is_empty() => Err(OutcomeError::MissingFielder),
            Self::Stumped { keeper } if keeper.trim().is_empty() => {
                Err(OutcomeError::MissingKeeper)
            }
            _ => Ok(()),
        }
    }
}

/// Classified outcome of one delivery.
///
/// `runs` is always the delivery's total, so `NoBallRuns { runs: 5 }` is the
/// one-run penalty plus four off the bat. `swapped` records whether the
/// batters crossed on deliveries whose runs are not off the bat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BallOutcome {
    Normal {
        runs: u32,
    },
    Wide {
        runs: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        swapped: bool,
    },
    WideBye {
        runs: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        swapped: bool,
    },
    WideLegBye {
        runs: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        swapped: bool,
    },
    NoBall,
    NoBallRuns {
        runs: u32,
    },
    NoBallBye {
        runs: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        swapped: bool,
    },
    NoBallLegBye {
        runs: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        swapped: bool,
    },
    Bye {
        runs: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        swapped: bool,
    },
    LegBye {
        runs: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        swapped: bool,
    },
    Wicket {
        detail: DismissalDetail,
    },
    RunOut {
        fielder: String,
        /// End of the dismissed batter after any crossing.
        dismissed: CreaseEnd,
        completed_runs: u32,
    },
}

impl BallOutcome {
    pub const NO_BALL_PENALTY: u32 = 1;
    pub const WIDE_PENALTY: u32 = 1;

    pub fn normal(runs: u32) -> Self {
        Self::Normal { runs }
    }

    pub fn dot() -> Self {
        Self::Normal { runs: 0 }
    }

    pub fn wicket(detail: DismissalDetail) -> Self {
        Self::Wicket { detail }
    }

    pub fn run_out(fielder: impl Into<String>, dismissed: CreaseEnd, completed_runs: u32) -> Self {
        Self::RunOut {
            fielder: fielder.into(),
            dismissed,
            completed_runs,
        }
    }

    /// Counts toward completing the over.
    pub fn is_legal(&self) -> bool {
        matches!(
            self,
            Self::Normal { .. }
                | Self::Bye { .. }
                | Self::LegBye { .. }
                | Self::Wicket { .. }
                | Self::RunOut { .. }
        )
    }

    pub fn is_wide(&self) -> bool {
        matches!(
            self,
            Self::Wide { .. } | Self::WideBye { .. } | Self::WideLegBye { .. }
        )
    }

    pub fn is_no_ball(&self) -> bool {
        matches!(
            self,
            Self::NoBall
                | Self::NoBallRuns { .. }
                | Self::NoBallBye { .. }
                | Self::NoBallLegBye { .. }
        )
    }

    pub fn is_wicket(&self) -> bool {
        matches!(self, Self::Wicket { .. } | Self::RunOut { .. })
    }

    /// Scorecard label for the dismissal this delivery causes, if any.
    pub fn dismissal_label(&self, bowler: &str) -> Option<String> {
        match self {
            Self::Wicket { detail } => Some(detail.label(bowler)),
            Self::RunOut { fielder, .. } => Some(format!("run out ({})", surname(fielder))),
            _ => None,
        }
    }

    /// Runs the delivery adds to the team score.
    pub fn total_runs(&self) -> u32 {
        match self {
            Self::NoBall => Self::NO_BALL_PENALTY,
            Self::Wicket { .. } => 0,
            Self::RunOut { completed_runs, .. } => *completed_runs,
            Self::Normal { runs }
            | Self::NoBallRuns { runs }
            | Self::Wide { runs, .. }
            | Self::WideBye { runs, .. }
            | Self::WideLegBye { runs, .. }
            | Self::NoBallBye { runs, .. }
            | Self::NoBallLegBye { runs, .. }
            | Self::Bye { runs, .. }
            | Self::LegBye { runs, .. } => *runs,
        }
    }

    /// Runs credited to a batter: the striker, or the dismissed batter on a
    /// run out.
    pub fn bat_runs(&self) -> u32 {
        match self {
            Self::Normal { runs } => *runs,
            Self::NoBallRuns { runs } => runs.saturating_sub(Self::NO_BALL_PENALTY),
            Self::RunOut { completed_runs, .. } => *completed_runs,
            _ => 0,
        }
    }

    /// Runs charged against the bowler's figures.
    pub fn bowler_runs(&self) -> u32 {
        match self {
            Self::Normal { runs } | Self::Wide { runs, .. } | Self::NoBallRuns { runs } => *runs,
            Self::WideBye { .. } | Self::WideLegBye { .. } => Self::WIDE_PENALTY,
            Self::NoBall | Self::NoBallBye { .. } | Self::NoBallLegBye { .. } => {
                Self::NO_BALL_PENALTY
            }
            Self::Bye { .. } | Self::LegBye { .. } | Self::Wicket { .. } | Self::RunOut { .. } => 0,
        }
    }

    /// Extras the delivery adds to the innings.
    pub fn extras(&self) -> Extras {
        let mut extras = Extras::default();
        match self {
            Self::Wide { runs, .. } => extras.wides = *runs,
            Self::WideBye { runs, .. } => {
                extras.wides = Self::WIDE_PENALTY;
                extras.byes = runs.saturating_sub(Self::WIDE_PENALTY);
            }
            Self::WideLegBye { runs, .. } => {
                extras.wides = Self::WIDE_PENALTY;
                extras.leg_byes = runs.saturating_sub(Self::WIDE_PENALTY);
            }
            Self::NoBall | Self::NoBallRuns { .. } => extras.no_balls = Self::NO_BALL_PENALTY,
            Self::NoBallBye { runs, .. } => {
                extras.no_balls = Self::NO_BALL_PENALTY;
                extras.byes = runs.saturating_sub(Self::NO_BALL_PENALTY);
            }
            Self::NoBallLegBye { runs, .. } => {
                extras.no_balls = Self::NO_BALL_PENALTY;
                extras.leg_byes = runs.saturating_sub(Self::NO_BALL_PENALTY);
            }
            Self::Bye { runs, .. } => extras.byes = *runs,
            Self::LegBye { runs, .. } => extras.leg_byes = *runs,
            Self::Normal { .. } | Self::Wicket { .. } | Self::RunOut { .. } => {}
        }
        extras
    }

    /// The batter on strike is charged a ball faced.
    ///
    /// Wides are not faced; every other delivery is, including no-balls.
    /// On a run out the ball goes to the dismissed batter instead.
    pub fn is_faced(&self) -> bool {
        !self.is_wide()
    }

    /// Bowler dot: a legal delivery without a scoring stroke.
    pub fn is_dot(&self) -> bool {
        match self {
            Self::Normal { runs } => *runs == 0,
            Self::Bye { .. } | Self::LegBye { .. } | Self::Wicket { .. } => true,
            Self::RunOut { completed_runs, .. } => *completed_runs == 0,
            _ => false,
        }
    }

    /// Whether the batters change ends because of this delivery.
    ///
    /// Wickets never rotate; run outs rotate on an odd number of completed
    /// runs before the dismissed end is resolved.
    pub fn rotates_strike(&self) -> bool {
        match self {
            Self::Normal { runs } => runs % 2 == 1,
            Self::NoBallRuns { .. } => self.bat_runs() % 2 == 1,
            Self::RunOut { completed_runs, .. } => completed_runs % 2 == 1,
            Self::Wide { swapped, .. }
            | Self::WideBye { swapped, .. }
            | Self::WideLegBye { swapped, .. }
            | Self::NoBallBye { swapped, .. }
            | Self::NoBallLegBye { swapped, .. }
            | Self::Bye { swapped, .. }
            | Self::LegBye { swapped, .. } => *swapped,
            Self::NoBall | Self::Wicket { .. } => false,
        }
    }

    /// Whether the delivery involves the batters and so counts toward the
    /// open partnership.
    pub fn counts_for_partnership(&self) -> bool {
        !(self.is_wide() || matches!(self, Self::NoBall))
    }

    /// Entry for the batter's scoring histogram, if this delivery makes one.
    pub fn distribution_runs(&self) -> Option<u32> {
        match self {
            Self::Normal { .. } | Self::NoBallRuns { .. } | Self::RunOut { .. } => {
                Some(self.bat_runs())
            }
            Self::Bye { .. } | Self::LegBye { .. } | Self::Wicket { .. } => Some(0),
            _ => None,
        }
    }

    /// Four or six struck off the bat.
    pub fn boundary(&self) -> Option<u32> {
        match self {
            Self::Normal { .. } | Self::NoBallRuns { .. } => {
                let runs = self.bat_runs();
                matches!(runs, 4 | 6).then_some(runs)
            }
            _ => None,
        }
    }

    /// Checks the payload before the engine touches any state.
    pub fn validate(&self) -> Result<(), OutcomeError> {
        let total = self.total_runs();
        if total > MAX_RUNS_PER_DELIVERY {
            return Err(OutcomeError::TooManyRuns {
                runs: total,
                max: MAX_RUNS_PER_DELIVERY,
            });
        }

        match self {
            Self::Normal { runs } if *runs > 6 => Err(OutcomeError::RunsOutOfRange {
                kind: self.kind(),
                runs: *runs,
                min: 0,
                max: 6,
            }),
            Self::NoBallRuns { runs } if !(2..=7).contains(runs) => {
                Err(OutcomeError::RunsOutOfRange {
                    kind: self.kind(),
                    runs: *runs,
                    min: 2,
                    max: 7,
                })
            }
            Self::NoBallBye { runs, .. } | Self::NoBallLegBye { runs, .. } if *runs < 2 => {
                Err(OutcomeError::RunsOutOfRange {
                    kind: self.kind(),
                    runs: *runs,
                    min: 2,
                    max: MAX_RUNS_PER_DELIVERY,
                })
            }
            Self::Wide { runs, .. }
            | Self::WideBye { runs, .. }
            | Self::WideLegBye { runs, .. }
            | Self::Bye { runs, .. }
            | Self::LegBye { runs, .. }
                if *runs == 0 =>
            {
                Err(OutcomeError::RunsOutOfRange {
                    kind: self.kind(),
                    runs: 0,
                    min: 1,
                    max: MAX_RUNS_PER_DELIVERY,
                })
            }
            Self::RunOut {
                fielder,
                completed_runs,
                ..
            } => {
                if fielder.trim().is_empty() {
                    Err(OutcomeError::MissingFielder)
                } else if *completed_runs > 6 {
                    Err(OutcomeError::RunsOutOfRange {
                        kind: self.kind(),
                        runs: *completed_runs,
                        min: 0,
                        max: 6,
                    })
                } else {
                    Ok(())
                }
            }
            Self::Wicket { detail } => detail.validate(),
            _ => Ok(()),
        }
    }

    /// Stable snake_case name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "normal",
            Self::Wide { .. } => "wide",
            Self::WideBye { .. } => "wide_bye",
            Self::WideLegBye { .. } => "wide_leg_bye",
            Self::NoBall => "no_ball",
            Self::NoBallRuns { .. } => "no_ball_runs",
            Self::NoBallBye { .. } => "no_ball_bye",
            Self::NoBallLegBye { .. } => "no_ball_leg_bye",
            Self::Bye { .. } => "bye",
            Self::LegBye { .. } => "leg_bye",
            Self::Wicket { .. } => "wicket",
            Self::RunOut { .. } => "run_out",
        }
    }
}

/// Payload problems that make an outcome impossible to apply.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OutcomeError {
    #[error("{kind} with {runs} runs is outside {min}..={max}")]
    RunsOutOfRange {
        kind: &'static str,
        runs: u32,
        min: u32,
        max: u32,
    },

    #[error("{runs} runs exceeds the per-delivery limit of {max}")]
    TooManyRuns { runs: u32, max: u32 },

    #[error("dismissal requires a fielder")]
    MissingFielder,

    #[error("stumping requires a wicket-keeper")]
    MissingKeeper,
}

impl ScoringError for OutcomeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RunsOutOfRange { .. } => "OUTCOME_RUNS_OUT_OF_RANGE",
            Self::TooManyRuns { .. } => "OUTCOME_TOO_MANY_RUNS",
            Self::MissingFielder => "OUTCOME_MISSING_FIELDER",
            Self::MissingKeeper => "OUTCOME_MISSING_KEEPER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissal_labels_use_surnames() {
        let starc = "Mitchell Starc";
        assert_eq!(DismissalDetail::bowled().label(starc), "b Starc");
        assert_eq!(
            DismissalDetail::caught("Steve Smith").label(starc),
            "c Smith b Starc"
        );
        assert_eq!(
            DismissalDetail::caught_and_bowled().label(starc),
            "c & b Starc"
        );
        assert_eq!(DismissalDetail::lbw().label(starc), "lbw b Starc");
        assert_eq!(
            DismissalDetail::stumped("Alex Carey").label(starc),
            "st Carey b Starc"
        );
        assert_eq!(
            BallOutcome::run_out("Ravindra Jadeja", CreaseEnd::Striker, 1)
                .dismissal_label(starc)
                .as_deref(),
            Some("run out (Jadeja)")
        );
        assert_eq!(BallOutcome::dot().dismissal_label(starc), None);
    }

    #[test]
    fn run_splits_follow_the_delivery_kind() {
        let no_ball_four = BallOutcome::NoBallRuns { runs: 5 };
        assert_eq!(no_ball_four.total_runs(), 5);
        assert_eq!(no_ball_four.bat_runs(), 4);
        assert_eq!(no_ball_four.bowler_runs(), 5);
        assert_eq!(no_ball_four.boundary(), Some(4));
        assert_eq!(no_ball_four.extras().no_balls, 1);
        assert!(!no_ball_four.is_legal());
        assert!(no_ball_four.is_faced());

        let wide_byes = BallOutcome::WideBye {
            runs: 3,
            swapped: false,
        };
        assert_eq!(wide_byes.bowler_runs(), 1);
        assert_eq!(
            wide_byes.extras(),
            Extras {
                wides: 1,
                byes: 2,
                ..Extras::default()
            }
        );
        assert!(!wide_byes.is_faced());
        assert!(!wide_byes.counts_for_partnership());
    }

    #[test]
    fn dots_include_byes_and_wickets() {
        assert!(BallOutcome::dot().is_dot());
        assert!(
            BallOutcome::LegBye {
                runs: 1,
                swapped: true
            }
            .is_dot()
        );
        assert!(BallOutcome::wicket(DismissalDetail::lbw()).is_dot());
        assert!(BallOutcome::run_out("Jadeja", CreaseEnd::Striker, 0).is_dot());
        assert!(!BallOutcome::run_out("Jadeja", CreaseEnd::Striker, 1).is_dot());
        assert!(!BallOutcome::NoBall.is_dot());
    }

    #[test]
    fn strike_rotation_rules() {
        assert!(BallOutcome::normal(3).rotates_strike());
        assert!(!BallOutcome::normal(4).rotates_strike());
        assert!(BallOutcome::NoBallRuns { runs: 2 }.rotates_strike());
        assert!(!BallOutcome::NoBall.rotates_strike());
        assert!(
            BallOutcome::Bye {
                runs: 2,
                swapped: true
            }
            .rotates_strike()
        );
        assert!(!BallOutcome::wicket(DismissalDetail::bowled()).rotates_strike());
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        assert!(matches!(
            BallOutcome::normal(7).validate(),
            Err(OutcomeError::RunsOutOfRange { runs: 7, .. })
        ));
        assert!(BallOutcome::NoBallRuns { runs: 1 }.validate().is_err());
        assert!(
            BallOutcome::Wide {
                runs: 0,
                swapped: false
            }
            .validate()
            .is_err()
        );
        assert_eq!(
            BallOutcome::Wide {
                runs: 11,
                swapped: false
            }
            .validate(),
            Err(OutcomeError::TooManyRuns { runs: 11, max: 10 })
        );
        assert_eq!(
            BallOutcome::run_out(" ", CreaseEnd::NonStriker, 1).validate(),
            Err(OutcomeError::MissingFielder)
        );
        assert_eq!(
            BallOutcome::wicket(DismissalDetail::caught("")).validate(),
            Err(OutcomeError::MissingFielder)
        );
        assert_eq!(
            BallOutcome::wicket(DismissalDetail::stumped("")).validate(),
            Err(OutcomeError::MissingKeeper)
        );
        assert!(
            BallOutcome::wicket(DismissalDetail::caught_and_bowled())
                .validate()
                .is_ok()
        );
        assert!(BallOutcome::NoBall.validate().is_ok());
    }
}
