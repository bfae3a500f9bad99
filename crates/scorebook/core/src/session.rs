//! Over-by-over driver for one innings.
//!
//! [`InningsSession`] owns the [`Innings`] and borrows the format. It opens
//! the crease, starts and ends overs, forwards deliveries to the
//! [`DeliveryEngine`] and decides when the innings is over. Termination is
//! checked between deliveries only.

use tracing::{debug, info, warn};

use crate::config::{FormatConfig, FormatError};
use crate::engine::{DeliveryEngine, DeliveryResult, ExecuteError};
use crate::error::{ErrorSeverity, ScoringError};
use crate::outcome::BallOutcome;
use crate::selection::{
    BowlerRequest, OpenersRequest, SelectionError, SelectionPolicy, SelectionRole,
};
use crate::state::{Crease, Innings, OverState, Partnership, PlayerNumber, Score, Team};

/// Where an innings stands.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InningsStatus {
    InProgress,
    AllOut,
    OversExhausted,
    TargetReached,
    Declared,
}

impl InningsStatus {
    pub fn is_complete(self) -> bool {
        self != Self::InProgress
    }
}

/// Drives one innings delivery by delivery.
#[derive(Clone, Debug)]
pub struct InningsSession<'f> {
    format: &'f FormatConfig,
    innings: Innings,
    /// Runs needed to win when chasing.
    target: Option<u32>,
    status: InningsStatus,
    opened: bool,
}

impl<'f> InningsSession<'f> {
    pub fn new(
        format: &'f FormatConfig,
        batting: &Team,
        bowling: &Team,
        target: Option<u32>,
    ) -> Result<Self, SessionError> {
        format.validate()?;
        if batting.name == bowling.name {
            return Err(SessionError::SameSide {
                team: batting.name.clone(),
            });
        }
        Ok(Self {
            format,
            innings: Innings::new(batting, bowling, format.balls_per_over),
            target,
            status: InningsStatus::InProgress,
            opened: false,
        })
    }

    pub fn format(&self) -> &FormatConfig {
        self.format
    }

    pub fn innings(&self) -> &Innings {
        &self.innings
    }

    pub fn into_innings(self) -> Innings {
        self.innings
    }

    pub fn status(&self) -> InningsStatus {
        self.status
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn score(&self, batting: &Team) -> Score {
        self.innings.score(batting)
    }

    /// Puts the openers in and starts the first partnership.
    pub fn open(
        &mut self,
        striker: PlayerNumber,
        non_striker: PlayerNumber,
        batting: &mut Team,
    ) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if self.opened {
            return Err(SessionError::AlreadyOpened);
        }

        let request = OpenersRequest::new(batting);
        if request.eligible.len() < 2 {
            return Err(SelectionError::NotEnoughBatters {
                available: request.eligible.len(),
            }
            .into());
        }
        request
            .validate(striker, non_striker)
            .inspect_err(|error| warn!(%striker, %non_striker, %error, "rejected openers"))?;

        for batter in [striker, non_striker] {
            if let Some(player) = batting.player_mut(batter) {
                player.batted = true;
            }
        }
        *self.innings.crease_mut() = Crease::new(striker, non_striker);
        let score = self.innings.runs();
        self.innings
            .open_partnership(Partnership::open(striker, non_striker, 1, score));
        self.opened = true;

        info!(team = %self.innings.batting_team(), %striker, %non_striker, "innings opened");
        Ok(())
    }

    /// Asks `policy` for the openers and opens with them.
    pub fn open_with<P>(
        &mut self,
        policy: &mut P,
        batting: &mut Team,
    ) -> Result<(PlayerNumber, PlayerNumber), SessionError>
    where
        P: SelectionPolicy + ?Sized,
    {
        let request = OpenersRequest::new(batting);
        let (striker, non_striker) =
            policy
                .choose_openers(&request)
                .ok_or(SelectionError::Declined {
                    role: SelectionRole::Openers,
                })?;
        self.open(striker, non_striker, batting)?;
        Ok((striker, non_striker))
    }

    /// Starts the next over with `bowler`.
    pub fn begin_over(
        &mut self,
        bowler: PlayerNumber,
        bowling: &mut Team,
    ) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if !self.opened {
            return Err(SessionError::NotOpened);
        }
        if let Some(over) = self.innings.current_over() {
            return Err(SessionError::OverInProgress { over: over.index });
        }

        let request = BowlerRequest::new(&self.innings, bowling, self.format);
        let index = request.over;
        request
            .validate(bowler)
            .inspect_err(|error| warn!(%bowler, over = index, %error, "rejected bowler"))?;

        let team = bowling.name.clone();
        let Some(player) = bowling.player_mut(bowler) else {
            return Err(SessionError::PlayerNotFound {
                team,
                number: bowler,
            });
        };
        player.bowled = true;
        let phase = self.format.phase_for_over(index);
        self.innings.start_over(OverState {
            index,
            bowler,
            runs: 0,
            legal_balls: 0,
            bowler_runs_at_start: player.bowling.runs,
            phase,
        });

        debug!(over = index, %bowler, ?phase, "over started");
        Ok(())
    }

    /// Asks `policy` for the next bowler and starts the over.
    pub fn next_over<P>(
        &mut self,
        policy: &mut P,
        bowling: &mut Team,
    ) -> Result<PlayerNumber, SessionError>
    where
        P: SelectionPolicy + ?Sized,
    {
        self.ensure_in_progress()?;
        let request = BowlerRequest::new(&self.innings, bowling, self.format);
        if request.eligible.is_empty() {
            return Err(SelectionError::NoEligibleBowler { over: request.over }.into());
        }
        let bowler = policy
            .choose_bowler(&request)
            .ok_or(SelectionError::Declined {
                role: SelectionRole::Bowler,
            })?;
        self.begin_over(bowler, bowling)?;
        Ok(bowler)
    }

    /// Applies one delivery, then runs end-of-over bookkeeping and the
    /// termination checks.
    pub fn deliver<P>(
        &mut self,
        outcome: &BallOutcome,
        batting: &mut Team,
        bowling: &mut Team,
        policy: &mut P,
    ) -> Result<DeliveryResult, SessionError>
    where
        P: SelectionPolicy + ?Sized,
    {
        self.ensure_in_progress()?;
        if !self.opened {
            return Err(SessionError::NotOpened);
        }

        let mut result = DeliveryEngine::new(&mut self.innings, self.format)
            .apply(outcome, batting, bowling, policy)?;

        let over_complete = self
            .innings
            .current_over()
            .is_some_and(|over| over.legal_balls >= self.format.balls_per_over);
        if over_complete {
            self.end_over(bowling);
        }

        if result.over_ended_early {
            self.finish(InningsStatus::AllOut);
        } else if self
            .target
            .is_some_and(|target| self.innings.score(batting).runs >= target)
        {
            result.over_ended_early = true;
            self.finish(InningsStatus::TargetReached);
        } else if over_complete && self.overs_exhausted() {
            self.finish(InningsStatus::OversExhausted);
        }

        Ok(result)
    }

    /// Ends the innings at the batting side's request.
    pub fn declare(&mut self) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        self.finish(InningsStatus::Declared);
        Ok(())
    }

    /// Plays deliveries from `feed` until it runs dry or the innings ends.
    ///
    /// Opens the innings and starts overs through `policy` as needed.
    pub fn play<P, I>(
        &mut self,
        batting: &mut Team,
        bowling: &mut Team,
        policy: &mut P,
        feed: I,
    ) -> Result<InningsStatus, SessionError>
    where
        P: SelectionPolicy + ?Sized,
        I: IntoIterator<Item = BallOutcome>,
    {
        if !self.opened {
            self.open_with(policy, batting)?;
        }
        for outcome in feed {
            if self.status.is_complete() {
                break;
            }
            if self.innings.current_over().is_none() {
                self.next_over(policy, bowling)?;
            }
            self.deliver(&outcome, batting, bowling, policy)?;
        }
        Ok(self.status)
    }

    fn end_over(&mut self, bowling: &mut Team) {
        let Some(over) = self.innings.close_over() else {
            return;
        };
        if let Some(bowler) = bowling.player_mut(over.bowler)
            && bowler.bowling.runs == over.bowler_runs_at_start
        {
            bowler.bowling.maidens += 1;
        }
        let crease = self.innings.crease_mut();
        if crease.is_full() {
            crease.swap();
        }
        info!(
            over = over.index + 1,
            runs = over.runs,
            bowler = %over.bowler,
            total = self.innings.runs(),
            wickets = self.innings.wickets(),
            "over complete"
        );
    }

    fn finish(&mut self, status: InningsStatus) {
        self.innings.close_over();
        let score = self.innings.runs();
        self.innings.close_partnership(score);
        self.status = status;
        info!(
            team = %self.innings.batting_team(),
            %status,
            runs = score,
            wickets = self.innings.wickets(),
            overs = %self.innings.overs(),
            "innings complete"
        );
    }

    fn overs_exhausted(&self) -> bool {
        self.format
            .max_overs
            .is_some_and(|max| self.innings.over_totals().len() as u32 >= max)
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        if self.status.is_complete() {
            return Err(SessionError::InningsComplete {
                status: self.status,
            });
        }
        Ok(())
    }
}

/// Misuse of the session API or a failure forwarded from the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Delivery(#[from] ExecuteError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("innings is already complete ({status})")]
    InningsComplete { status: InningsStatus },

    #[error("{team} cannot bat and bowl in the same innings")]
    SameSide { team: String },

    #[error("innings has not been opened")]
    NotOpened,

    #[error("innings has already been opened")]
    AlreadyOpened,

    #[error("over {over} is still in progress")]
    OverInProgress { over: u32 },

    #[error("player {number} not found in {team}")]
    PlayerNotFound { team: String, number: PlayerNumber },
}

impl ScoringError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Delivery(error) => error.severity(),
            Self::Selection(error) => error.severity(),
            Self::Format(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&crate::error::ErrorContext> {
        match self {
            Self::Delivery(error) => error.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Delivery(error) => error.error_code(),
            Self::Selection(error) => error.error_code(),
            Self::Format(error) => error.error_code(),
            Self::InningsComplete { .. } => "SESSION_INNINGS_COMPLETE",
            Self::SameSide { .. } => "SESSION_SAME_SIDE",
            Self::NotOpened => "SESSION_NOT_OPENED",
            Self::AlreadyOpened => "SESSION_ALREADY_OPENED",
            Self::OverInProgress { .. } => "SESSION_OVER_IN_PROGRESS",
            Self::PlayerNotFound { .. } => "SESSION_PLAYER_NOT_FOUND",
        }
    }
}
