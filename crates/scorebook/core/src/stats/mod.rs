//! Read-only derivations over finished (or running) innings.
//!
//! Nothing here mutates state. Reporting layers call these to build
//! scorecards, charts and summaries.

mod innings;
mod players;
mod result;

pub use innings::{
    InningsSummary, PartnershipRow, PhaseRow, innings_summary, partnership_rows, phase_breakdown,
    run_rate_progression,
};
pub use players::{
    BattingRow, BowlingRow, ScoringBreakdown, bowling_overs, economy, scoring_breakdown,
    strike_rate, top_batters, top_bowlers,
};
pub use result::{MatchResult, match_result};

/// `"5.3"` for a part-over, `"6"` for whole overs.
pub fn overs_label(balls: u32, balls_per_over: u32) -> String {
    let per_over = balls_per_over.max(1);
    let (overs, rest) = (balls / per_over, balls % per_over);
    if rest > 0 {
        format!("{overs}.{rest}")
    } else {
        overs.to_string()
    }
}
