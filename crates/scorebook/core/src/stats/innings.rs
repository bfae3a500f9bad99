use strum::IntoEnumIterator;

use super::overs_label;
use crate::config::{FormatConfig, Phase};
use crate::state::{Innings, OversBowled, Team};

/// Runs, wickets and overs within one phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseRow {
    pub phase: Phase,
    pub runs: u32,
    pub wickets: u32,
    pub balls: u32,
    pub overs: String,
}

/// Phase-by-phase split; `None` when the format has no phases.
///
/// Phases in which no legal ball was bowled are left out.
pub fn phase_breakdown(innings: &Innings, format: &FormatConfig) -> Option<Vec<PhaseRow>> {
    if format.is_unlimited() || format.phases.is_none() {
        return None;
    }
    let rows = Phase::iter()
        .map(|phase| (phase, innings.phase_tally(phase)))
        .filter(|(_, tally)| tally.balls > 0)
        .map(|(phase, tally)| PhaseRow {
            phase,
            runs: tally.runs,
            wickets: tally.wickets,
            balls: tally.balls,
            overs: overs_label(tally.balls, innings.balls_per_over()),
        })
        .collect();
    Some(rows)
}

/// Headline numbers for one innings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InningsSummary {
    pub team: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: OversBowled,
    pub run_rate: f64,
    /// Dots as a percentage of legal deliveries.
    pub dot_ball_percent: f64,
    pub fours: u32,
    pub sixes: u32,
    pub runs_in_boundaries: u32,
    pub extras: u32,
}

pub fn innings_summary(innings: &Innings, batting: &Team) -> InningsSummary {
    let score = innings.score(batting);

    let (mut legal, mut dots, mut fours, mut sixes) = (0u32, 0u32, 0u32, 0u32);
    for ball in innings.balls() {
        if ball.is_legal() {
            legal += 1;
            dots += u32::from(ball.is_dot());
        }
        match ball.outcome.boundary() {
            Some(4) => fours += 1,
            Some(6) => sixes += 1,
            _ => {}
        }
    }
    let dot_ball_percent = if legal == 0 {
        0.0
    } else {
        f64::from(dots) * 100.0 / f64::from(legal)
    };

    InningsSummary {
        team: innings.batting_team().to_string(),
        runs: score.runs,
        wickets: score.wickets,
        overs: score.overs,
        run_rate: score.run_rate,
        dot_ball_percent,
        fours,
        sixes,
        runs_in_boundaries: fours * 4 + sixes * 6,
        extras: innings.extras().total(),
    }
}

/// One partnership with resolved batter names.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartnershipRow {
    pub wicket_number: u32,
    pub batter1_name: String,
    pub batter1_runs: u32,
    pub batter1_balls: u32,
    pub batter2_name: String,
    pub batter2_runs: u32,
    pub batter2_balls: u32,
    pub total_runs: u32,
    pub total_balls: u32,
    /// Still open, or closed by the end of the innings rather than a wicket.
    pub unbroken: bool,
}

pub fn partnership_rows(innings: &Innings, batting: &Team) -> Vec<PartnershipRow> {
    let name = |number| {
        batting
            .player(number)
            .map_or_else(|| "Unknown".to_string(), |p| p.name.clone())
    };
    let wickets = innings.wickets();

    innings
        .all_partnerships()
        .map(|stand| PartnershipRow {
            wicket_number: stand.wicket_number,
            batter1_name: name(stand.batter1),
            batter1_runs: stand.batter1_runs,
            batter1_balls: stand.batter1_balls,
            batter2_name: name(stand.batter2),
            batter2_runs: stand.batter2_runs,
            batter2_balls: stand.batter2_balls,
            total_runs: stand.runs,
            total_balls: stand.balls,
            unbroken: stand.wicket_number > wickets,
        })
        .collect()
}

/// Cumulative run rate at the end of each recorded over.
pub fn run_rate_progression(innings: &Innings) -> Vec<f64> {
    innings
        .cumulative_runs()
        .iter()
        .enumerate()
        .map(|(index, runs)| f64::from(*runs) / (index as f64 + 1.0))
        .collect()
}
