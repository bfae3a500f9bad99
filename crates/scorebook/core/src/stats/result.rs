use std::fmt;

use crate::config::FormatConfig;
use crate::state::{Innings, Team};

/// Outcome of a two-innings limited-overs match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "result", rename_all = "snake_case"))]
pub enum MatchResult {
    WonByRuns { winner: String, margin: u32 },
    WonByWickets { winner: String, margin: u32 },
    Tied,
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WonByRuns { winner, margin } => write!(f, "{winner} win by {margin} runs"),
            Self::WonByWickets { winner, margin } => {
                write!(f, "{winner} win by {margin} wicket(s)")
            }
            Self::Tied => f.write_str("Match tied"),
        }
    }
}

/// Decides the match from both innings.
///
/// The chase target is the first-innings score plus one; a successful chase
/// wins by the wickets in hand.
pub fn match_result(
    first: &Innings,
    first_batting: &Team,
    second: &Innings,
    second_batting: &Team,
) -> MatchResult {
    let first_runs = first.score(first_batting).runs;
    let second_score = second.score(second_batting);
    let target = first_runs + 1;

    if second_score.runs >= target {
        MatchResult::WonByWickets {
            winner: second.batting_team().to_string(),
            margin: FormatConfig::MAX_WICKETS.saturating_sub(second_score.wickets),
        }
    } else if second_score.runs < first_runs {
        MatchResult::WonByRuns {
            winner: first.batting_team().to_string(),
            margin: first_runs - second_score.runs,
        }
    } else {
        MatchResult::Tied
    }
}
