//! Deterministic delivery-by-delivery cricket scoring.
//!
//! `scorebook-core` defines the canonical scoring rules (ball outcomes, the
//! delivery engine, innings state) and exposes pure APIs that are reused by
//! the content loaders and the replay tool. Every innings mutation flows
//! through [`engine::DeliveryEngine`]; [`session::InningsSession`] drives the
//! engine over by over and owns the termination checks.
pub mod config;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod selection;
pub mod session;
pub mod state;
pub mod stats;

pub use config::{FormatConfig, FormatError, Phase, PhaseBoundaries};
pub use engine::{
    DeliveryEngine, DeliveryError, DeliveryResult, ExecuteError, InvariantError, TransitionPhase,
    TransitionPhaseError,
};
pub use error::{ErrorContext, ErrorSeverity, ScoringError};
pub use outcome::{BallOutcome, DismissalDetail, MAX_RUNS_PER_DELIVERY, OutcomeError};
pub use selection::{
    BatterRequest, BowlerRequest, OpenersRequest, OrderedSelection, SelectionError,
    SelectionPolicy, SelectionRole,
};
pub use session::{InningsSession, InningsStatus, SessionError};
pub use stats::MatchResult;
pub use state::{
    BallEvent, BattingFigures, BowlingFigures, Crease, CreaseEnd, Extras, FallOfWicket, Innings,
    OverBall, OverState, OversBowled, Partnership, PhaseTally, Player, PlayerNumber, RosterError,
    Score, Team,
};
