//! Shared error classification.
//!
//! Each concern keeps its own error enum next to the code that raises it
//! (`OutcomeError` in [`crate::outcome`], `SelectionError` in
//! [`crate::selection`], and so on). They all implement [`ScoringError`] so a
//! caller can decide whether to re-ask, reject or abort without matching on
//! every variant.

use crate::state::{OverBall, PlayerNumber};

/// How a caller should react to an error.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorSeverity {
    /// Ask the selection policy again; nothing was mutated.
    ///
    /// Examples: bowler bowled the previous over, batter already batted
    Recoverable,

    /// Reject the input as given.
    ///
    /// Examples: `Normal` with 7 runs, delivery with no over in progress
    Validation,

    /// Innings bookkeeping no longer adds up; stop scoring.
    ///
    /// Examples: more than ten wickets, partnership count out of step
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Where in the innings an error happened and who was involved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ErrorContext {
    pub batter: Option<PlayerNumber>,
    pub bowler: Option<PlayerNumber>,
    /// Delivery position, e.g. `4.3`.
    pub at: Option<OverBall>,
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            batter: None,
            bowler: None,
            at: None,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_batter(mut self, batter: PlayerNumber) -> Self {
        self.batter = Some(batter);
        self
    }

    #[must_use]
    pub const fn with_bowler(mut self, bowler: PlayerNumber) -> Self {
        self.bowler = Some(bowler);
        self
    }

    #[must_use]
    pub const fn at(mut self, at: OverBall) -> Self {
        self.at = Some(at);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Implemented by every error enum in the crate.
///
/// Severity follows what the caller can do about the error, not how much
/// state it touched. Error codes are stable upper-snake identifiers such as
/// `OUTCOME_RUNS_OUT_OF_RANGE`.
pub trait ScoringError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
