use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use super::{BallEvent, Crease, OverBall, OversBowled, Partnership, PlayerNumber, Team};
use crate::config::Phase;

/// Runs not credited to any batter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extras {
    pub byes: u32,
    pub leg_byes: u32,
    pub wides: u32,
    pub no_balls: u32,
}

impl Extras {
    pub fn total(&self) -> u32 {
        self.byes + self.leg_byes + self.wides + self.no_balls
    }
}

/// Historical record of one wicket; names are copied at the time it fell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallOfWicket {
    /// Team score including the runs of the dismissal delivery.
    pub score: u32,
    /// 1-indexed wicket number.
    pub wicket: u32,
    pub batter: String,
    pub bowler: String,
    pub at: OverBall,
}

/// Runs, wickets and legal balls accrued within one phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTally {
    pub runs: u32,
    pub wickets: u32,
    pub balls: u32,
}

/// Bookkeeping for the over currently being bowled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverState {
    /// 0-indexed over number.
    pub index: u32,
    pub bowler: PlayerNumber,
    /// Total runs scored off the over, extras included.
    pub runs: u32,
    pub legal_balls: u32,
    /// Bowler's conceded runs when the over began; used for maidens.
    pub bowler_runs_at_start: u32,
    /// `None` for formats without phases.
    pub phase: Option<Phase>,
}

/// Scoreboard snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    pub runs: u32,
    pub wickets: u32,
    pub overs: OversBowled,
    pub run_rate: f64,
}

/// Aggregate state of one team's turn at bat.
///
/// Teams are not owned: the innings records their names and reads player
/// figures through the `&Team` handed to [`Innings::score`]. All mutation
/// happens through the delivery engine and the innings session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Innings {
    pub(crate) batting_team: String,
    pub(crate) bowling_team: String,
    pub(crate) balls_per_over: u32,
    pub(crate) balls: Vec<BallEvent>,
    pub(crate) extras: Extras,
    pub(crate) fall_of_wickets: Vec<FallOfWicket>,
    pub(crate) phase_stats: BTreeMap<Phase, PhaseTally>,
    pub(crate) partnerships: Vec<Partnership>,
    pub(crate) current_partnership: Option<Partnership>,
    pub(crate) over_totals: Vec<u32>,
    pub(crate) cumulative_runs: Vec<u32>,
    pub(crate) bowler_overs: BTreeMap<PlayerNumber, Vec<u32>>,
    pub(crate) crease: Crease,
    pub(crate) over: Option<OverState>,
    pub(crate) previous_bowler: Option<PlayerNumber>,
    /// Running total, kept in step with extras plus batting runs.
    pub(crate) runs: u32,
    /// Batting runs the team already had when the innings opened.
    pub(crate) batting_baseline: u32,
}

impl Innings {
    pub fn new(batting: &Team, bowling: &Team, balls_per_over: u32) -> Self {
        Self {
            batting_team: batting.name.clone(),
            bowling_team: bowling.name.clone(),
            balls_per_over: balls_per_over.max(1),
            balls: Vec::new(),
            extras: Extras::default(),
            fall_of_wickets: Vec::new(),
            phase_stats: Phase::iter().map(|p| (p, PhaseTally::default())).collect(),
            partnerships: Vec::new(),
            current_partnership: None,
            over_totals: Vec::new(),
            cumulative_runs: Vec::new(),
            bowler_overs: BTreeMap::new(),
            crease: Crease::default(),
            over: None,
            previous_bowler: None,
            runs: 0,
            batting_baseline: batting.batting_runs(),
        }
    }

    pub fn batting_team(&self) -> &str {
        &self.batting_team
    }

    pub fn bowling_team(&self) -> &str {
        &self.bowling_team
    }

    pub fn balls_per_over(&self) -> u32 {
        self.balls_per_over
    }

    /// Append-only ball log.
    pub fn balls(&self) -> &[BallEvent] {
        &self.balls
    }

    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    pub fn fall_of_wickets(&self) -> &[FallOfWicket] {
        &self.fall_of_wickets
    }

    pub fn wickets(&self) -> u32 {
        self.fall_of_wickets.len() as u32
    }

    pub fn phase_stats(&self) -> &BTreeMap<Phase, PhaseTally> {
        &self.phase_stats
    }

    pub fn phase_tally(&self, phase: Phase) -> PhaseTally {
        self.phase_stats.get(&phase).copied().unwrap_or_default()
    }

    /// Closed partnerships, in the order they ended.
    pub fn partnerships(&self) -> &[Partnership] {
        &self.partnerships
    }

    pub fn current_partnership(&self) -> Option<&Partnership> {
        self.current_partnership.as_ref()
    }

    /// Closed partnerships followed by the open one, if any.
    pub fn all_partnerships(&self) -> impl Iterator<Item = &Partnership> {
        self.partnerships
            .iter()
            .chain(self.current_partnership.as_ref())
    }

    /// Runs per completed over (and the final partial over once finished).
    pub fn over_totals(&self) -> &[u32] {
        &self.over_totals
    }

    pub fn cumulative_runs(&self) -> &[u32] {
        &self.cumulative_runs
    }

    /// Over indices each bowler has started.
    pub fn bowler_overs(&self) -> &BTreeMap<PlayerNumber, Vec<u32>> {
        &self.bowler_overs
    }

    pub fn overs_bowled_by(&self, bowler: PlayerNumber) -> u32 {
        self.bowler_overs.get(&bowler).map_or(0, |overs| overs.len() as u32)
    }

    pub fn last_over_of(&self, bowler: PlayerNumber) -> Option<u32> {
        self.bowler_overs
            .get(&bowler)
            .and_then(|overs| overs.last().copied())
    }

    pub fn crease(&self) -> &Crease {
        &self.crease
    }

    pub fn current_over(&self) -> Option<&OverState> {
        self.over.as_ref()
    }

    pub fn previous_bowler(&self) -> Option<PlayerNumber> {
        self.previous_bowler
    }

    /// Index the next over will take.
    pub fn next_over_index(&self) -> u32 {
        self.over
            .map_or(self.over_totals.len() as u32, |over| over.index + 1)
    }

    /// Running total; equals extras plus the batting side's runs this innings.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Every legal delivery in the ball log.
    pub fn legal_balls(&self) -> u32 {
        self.balls.iter().filter(|ball| ball.is_legal()).count() as u32
    }

    /// Overs bowled, reconstructed from the per-bowler over log.
    ///
    /// The highest recorded over index counts as that many completed overs;
    /// legal balls logged in that exact over are added on top. Without any
    /// bowler data every legal ball is counted from zero.
    pub fn overs(&self) -> OversBowled {
        let per_over = self.balls_per_over;
        match self.bowler_overs.values().flatten().max() {
            Some(&last) => {
                let in_last = self
                    .balls
                    .iter()
                    .filter(|ball| ball.over == last && ball.is_legal())
                    .count() as u32;
                OversBowled::new(last + in_last / per_over, in_last % per_over)
            }
            None => OversBowled::from_legal_balls(self.legal_balls(), per_over),
        }
    }

    /// Score, wickets, overs and run rate.
    ///
    /// Runs are re-derived from `batting`'s player figures plus extras.
    pub fn score(&self, batting: &Team) -> Score {
        let runs = self.extras.total()
            + batting
                .batting_runs()
                .saturating_sub(self.batting_baseline);
        let overs = self.overs();
        let legal_equivalent = overs.legal_ball_equivalent(self.balls_per_over);
        let run_rate = if legal_equivalent == 0 {
            0.0
        } else {
            f64::from(runs) * f64::from(self.balls_per_over) / f64::from(legal_equivalent)
        };

        Score {
            runs,
            wickets: self.wickets(),
            overs,
            run_rate,
        }
    }

    /// Batting runs scored by `batting` during this innings.
    pub(crate) fn batting_runs_since_open(&self, batting: &Team) -> u32 {
        batting
            .batting_runs()
            .saturating_sub(self.batting_baseline)
    }

    // ===== mutators used by the engine and the session =====

    pub(crate) fn crease_mut(&mut self) -> &mut Crease {
        &mut self.crease
    }

    pub(crate) fn start_over(&mut self, over: OverState) {
        self.bowler_overs
            .entry(over.bowler)
            .or_default()
            .push(over.index);
        self.over = Some(over);
    }

    /// Closes the over in progress, recording its total.
    pub(crate) fn close_over(&mut self) -> Option<OverState> {
        let over = self.over.take()?;
        let previous = self.cumulative_runs.last().copied().unwrap_or(0);
        self.over_totals.push(over.runs);
        self.cumulative_runs.push(previous + over.runs);
        self.previous_bowler = Some(over.bowler);
        Some(over)
    }

    pub(crate) fn open_partnership(&mut self, partnership: Partnership) {
        debug_assert!(self.current_partnership.is_none());
        self.current_partnership = Some(partnership);
    }

    /// Closes the open partnership at `end_score`.
    pub(crate) fn close_partnership(&mut self, end_score: u32) {
        if let Some(mut partnership) = self.current_partnership.take() {
            partnership.close(end_score);
            self.partnerships.push(partnership);
        }
    }

    #[cfg(test)]
    pub(crate) fn push_ball(&mut self, ball: BallEvent) {
        self.balls.push(ball);
    }
}
