use super::{OverBall, PlayerNumber};
use crate::outcome::BallOutcome;

/// Immutable record of one delivery, appended to the innings ball log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallEvent {
    /// 0-indexed over.
    pub over: u32,
    /// 1-indexed count of legal deliveries including this one; illegal
    /// deliveries share the number of the next legal ball.
    pub ball: u32,
    pub bowler: PlayerNumber,
    /// Batter on strike when the ball was bowled.
    pub striker: PlayerNumber,
    /// Total runs the delivery added to the score.
    pub runs: u32,
    pub outcome: BallOutcome,
}

impl BallEvent {
    pub fn is_legal(&self) -> bool {
        self.outcome.is_legal()
    }

    pub fn at(&self) -> OverBall {
        OverBall::new(self.over, self.ball)
    }

    /// Legal delivery from which the batter scored nothing off the bat.
    pub fn is_dot(&self) -> bool {
        self.outcome.is_dot()
    }
}
