use crate::outcome::BallOutcome;
use crate::state::{
    BallEvent, BattingFigures, BowlingFigures, Crease, Extras, FallOfWicket, Innings, OverState,
    Partnership, PlayerNumber,
};

/// Wraps mutable access to [`Innings`] with structured sub-reducers.
pub struct InningsReducer<'a> {
    innings: &'a mut Innings,
}

impl<'a> InningsReducer<'a> {
    pub fn new(innings: &'a mut Innings) -> Self {
        Self { innings }
    }

    pub fn innings(&self) -> &Innings {
        self.innings
    }

    pub fn log_ball(&mut self, event: BallEvent) {
        self.innings.balls.push(event);
    }

    pub fn add_extras(&mut self, extras: Extras) {
        let totals = &mut self.innings.extras;
        totals.byes += extras.byes;
        totals.leg_byes += extras.leg_byes;
        totals.wides += extras.wides;
        totals.no_balls += extras.no_balls;
    }

    /// Adds the delivery total to the innings and to the over in progress.
    pub fn add_runs(&mut self, runs: u32) {
        self.innings.runs += runs;
        if let Some(over) = self.innings.over.as_mut() {
            over.runs += runs;
        }
    }

    pub fn over(&mut self) -> OverReducer<'_> {
        OverReducer {
            over: self.innings.over.as_mut(),
        }
    }

    /// Accrues into the phase of the over in progress; no-op without phases.
    pub fn accrue_phase(&mut self, runs: u32, legal: bool, wicket: bool) {
        let Some(phase) = self.innings.over.and_then(|over| over.phase) else {
            return;
        };
        let tally = self.innings.phase_stats.entry(phase).or_default();
        tally.runs += runs;
        tally.balls += u32::from(legal);
        tally.wickets += u32::from(wicket);
    }

    pub fn credit_partnership(&mut self, batter: PlayerNumber, total: u32, bat_runs: u32) {
        if let Some(partnership) = self.innings.current_partnership.as_mut() {
            partnership.credit(batter, total, bat_runs);
        }
    }

    pub fn crease(&mut self) -> &mut Crease {
        self.innings.crease_mut()
    }

    pub fn record_wicket(&mut self, fall: FallOfWicket) {
        self.innings.close_partnership(fall.score);
        self.innings.fall_of_wickets.push(fall);
    }

    pub fn open_partnership(&mut self, partnership: Partnership) {
        self.innings.open_partnership(partnership);
    }
}

pub struct OverReducer<'a> {
    over: Option<&'a mut OverState>,
}

impl OverReducer<'_> {
    pub fn count_legal_ball(&mut self) {
        if let Some(over) = self.over.as_mut() {
            over.legal_balls += 1;
        }
    }
}

pub struct BattingReducer<'a> {
    figures: &'a mut BattingFigures,
}

impl<'a> BattingReducer<'a> {
    pub fn new(figures: &'a mut BattingFigures) -> Self {
        Self { figures }
    }

    /// Credits the delivery to the batter it belongs to.
    pub fn receive(&mut self, outcome: &BallOutcome) {
        if outcome.is_faced() {
            self.figures.balls += 1;
        }
        self.figures.runs += outcome.bat_runs();
        match outcome.boundary() {
            Some(4) => self.figures.fours += 1,
            Some(6) => self.figures.sixes += 1,
            _ => {}
        }
        if let Some(runs) = outcome.distribution_runs() {
            *self.figures.scoring_distribution.entry(runs).or_default() += 1;
        }
    }

    pub fn dismiss(&mut self, label: String) {
        self.figures.dismissal = Some(label);
    }
}

pub struct BowlingReducer<'a> {
    figures: &'a mut BowlingFigures,
}

impl<'a> BowlingReducer<'a> {
    pub fn new(figures: &'a mut BowlingFigures) -> Self {
        Self { figures }
    }

    pub fn deliver(&mut self, outcome: &BallOutcome) {
        let figures = &mut *self.figures;
        figures.balls += u32::from(outcome.is_legal());
        figures.runs += outcome.bowler_runs();
        figures.dots += u32::from(outcome.is_dot());
        figures.wides += u32::from(outcome.is_wide());
        figures.noballs += u32::from(outcome.is_no_ball());
        figures.wickets += u32::from(matches!(outcome, BallOutcome::Wicket { .. }));
        match outcome.boundary() {
            Some(4) => figures.fours += 1,
            Some(6) => figures.sixes += 1,
            _ => {}
        }
    }
}
