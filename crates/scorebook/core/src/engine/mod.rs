//! Delivery processing pipeline.
//!
//! The [`DeliveryEngine`] is the authoritative reducer for an [`Innings`].
//! Every delivery flows through the same three phases,
//! pre_validate → apply → post_validate, and all fallible work (payload
//! checks, crease and over checks, replacement selection) happens before the
//! first mutation. A failed delivery leaves the innings and both teams
//! untouched unless the failure is an invariant violation found afterwards.

mod errors;
mod reducer;
mod transition;

pub use errors::{
    DeliveryError, ExecuteError, InvariantError, TransitionPhase, TransitionPhaseError,
};

use crate::config::FormatConfig;
use crate::outcome::BallOutcome;
use crate::selection::SelectionPolicy;
use crate::state::{Crease, Innings, PlayerNumber, Team};

/// Control signals and counters after one delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryResult {
    /// Wickets down in the innings.
    pub wickets: u32,
    /// Runs scored so far in the current over.
    pub over_runs: u32,
    /// Legal balls bowled so far in the current over.
    pub legal_balls: u32,
    /// Batters in after the delivery; empty slots after a terminal wicket.
    pub crease: Crease,
    /// Batting-order members who have not batted yet.
    pub batters_yet: Vec<PlayerNumber>,
    /// The innings ended on this delivery before its over did. The engine
    /// raises it when a wicket leaves nobody to come in; the session also
    /// raises it when the delivery reaches the target.
    pub over_ended_early: bool,
    pub dismissed: Option<PlayerNumber>,
    /// Total runs of this delivery.
    pub runs: u32,
}

/// Applies deliveries to one innings.
///
/// The striker, non-striker and bowler are read from the innings' crease and
/// over in progress; the caller supplies the two teams whose player figures
/// change and the policy that picks replacement batters.
pub struct DeliveryEngine<'a> {
    innings: &'a mut Innings,
    format: &'a FormatConfig,
}

impl<'a> DeliveryEngine<'a> {
    pub fn new(innings: &'a mut Innings, format: &'a FormatConfig) -> Self {
        Self { innings, format }
    }

    /// Applies exactly one delivery.
    pub fn apply<P>(
        &mut self,
        outcome: &BallOutcome,
        batting: &mut Team,
        bowling: &mut Team,
        policy: &mut P,
    ) -> Result<DeliveryResult, ExecuteError>
    where
        P: SelectionPolicy + ?Sized,
    {
        transition::execute_delivery(outcome, self.innings, self.format, batting, bowling, policy)
    }

    pub fn innings(&self) -> &Innings {
        self.innings
    }
}
