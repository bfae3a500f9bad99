//! Authoritative innings state representation.
//!
//! This module owns the data structures that describe players, teams, the
//! ball log and the innings aggregates. Reporting layers read this state but
//! mutate it exclusively through the engine and the session.
mod ball;
mod crease;
mod innings;
mod overs;
mod partnership;
mod player;
mod team;

pub use ball::BallEvent;
pub use crease::{Crease, CreaseEnd};
pub use innings::{Extras, FallOfWicket, Innings, OverState, PhaseTally, Score};
pub use overs::{OverBall, OversBowled};
pub use partnership::Partnership;
pub use player::{BattingFigures, BowlingFigures, Player, PlayerNumber};
pub(crate) use player::surname;
pub use team::{RosterError, Team};
