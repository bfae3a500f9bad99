//! Error types for the delivery pipeline.

use crate::error::{ErrorContext, ErrorSeverity, ScoringError};
use crate::outcome::OutcomeError;
use crate::selection::SelectionError;
use crate::state::PlayerNumber;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }

    /// True when nothing was mutated before the failure.
    pub fn is_pre_validate(&self) -> bool {
        self.phase == TransitionPhase::PreValidate
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

impl<E: ScoringError> ScoringError for TransitionPhaseError<E> {
    fn severity(&self) -> ErrorSeverity {
        self.error.severity()
    }

    fn context(&self) -> Option<&ErrorContext> {
        self.error.context()
    }

    fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

/// Errors surfaced while applying a delivery through the engine.
pub type ExecuteError = TransitionPhaseError<DeliveryError>;

/// Why a delivery could not be applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("malformed outcome: {0}")]
    Malformed(#[from] OutcomeError),

    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),

    #[error("no over is in progress")]
    OverNotInProgress,

    #[error("over already has {legal_balls} legal balls")]
    OverComplete { legal_balls: u32 },

    #[error("both crease slots must be occupied")]
    CreaseIncomplete,

    #[error("player {number} not found in {team}")]
    PlayerNotFound { team: String, number: PlayerNumber },

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl ScoringError for DeliveryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Malformed(error) => error.severity(),
            Self::InvalidSelection(error) => error.severity(),
            Self::Invariant(error) => error.severity(),
            Self::OverNotInProgress
            | Self::OverComplete { .. }
            | Self::CreaseIncomplete
            | Self::PlayerNotFound { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Invariant(error) => error.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(error) => error.error_code(),
            Self::InvalidSelection(error) => error.error_code(),
            Self::Invariant(error) => error.error_code(),
            Self::OverNotInProgress => "DELIVERY_OVER_NOT_IN_PROGRESS",
            Self::OverComplete { .. } => "DELIVERY_OVER_COMPLETE",
            Self::CreaseIncomplete => "DELIVERY_CREASE_INCOMPLETE",
            Self::PlayerNotFound { .. } => "DELIVERY_PLAYER_NOT_FOUND",
        }
    }
}

/// Innings bookkeeping that no longer adds up after a delivery.
///
/// These indicate a defect in the engine, never bad input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("{wickets} wickets recorded")]
    TooManyWickets {
        wickets: u32,
        context: ErrorContext,
    },

    #[error("{closed} closed partnerships for {wickets} wickets")]
    PartnershipCount {
        closed: u32,
        wickets: u32,
        context: ErrorContext,
    },

    #[error("running score {running} disagrees with derived score {derived}")]
    ScoreMismatch {
        running: u32,
        derived: u32,
        context: ErrorContext,
    },

    #[error("over has {legal_balls} legal balls, limit is {balls_per_over}")]
    OverOverflow {
        legal_balls: u32,
        balls_per_over: u32,
        context: ErrorContext,
    },
}

impl ScoringError for InvariantError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::TooManyWickets { context, .. }
            | Self::PartnershipCount { context, .. }
            | Self::ScoreMismatch { context, .. }
            | Self::OverOverflow { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManyWickets { .. } => "INVARIANT_TOO_MANY_WICKETS",
            Self::PartnershipCount { .. } => "INVARIANT_PARTNERSHIP_COUNT",
            Self::ScoreMismatch { .. } => "INVARIANT_SCORE_MISMATCH",
            Self::OverOverflow { .. } => "INVARIANT_OVER_OVERFLOW",
        }
    }
}
