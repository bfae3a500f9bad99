//! Match replay and the report built from it.

use anyhow::{Context, Result};
use scorebook_content::{InningsScript, LoadedMatch};
use scorebook_core::stats::{
    BattingRow, BowlingRow, InningsSummary, PartnershipRow, PhaseRow, bowling_overs,
    innings_summary, match_result, partnership_rows, phase_breakdown, run_rate_progression,
    top_batters, top_bowlers,
};
use scorebook_core::{
    FallOfWicket, FormatConfig, Innings, InningsSession, InningsStatus, MatchResult, ScoringError,
    Team,
};
use serde::Serialize;

/// Everything derived from one replayed match.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub title: String,
    pub format: String,
    pub innings: Vec<InningsReport>,
    /// `None` when only one innings was scripted.
    pub result: Option<MatchResult>,
    pub top_batters: Vec<BattingRow>,
    pub top_bowlers: Vec<BowlingRow>,
}

#[derive(Debug, Serialize)]
pub struct InningsReport {
    pub status: InningsStatus,
    pub target: Option<u32>,
    pub summary: InningsSummary,
    pub batting: Vec<BattingLine>,
    pub bowling: Vec<BowlingLine>,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub partnerships: Vec<PartnershipRow>,
    pub phases: Option<Vec<PhaseRow>>,
    pub run_rate_progression: Vec<f64>,
}

/// One scorecard batting line.
#[derive(Debug, Serialize)]
pub struct BattingLine {
    pub name: String,
    pub dismissal: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
}

/// One scorecard bowling line.
#[derive(Debug, Serialize)]
pub struct BowlingLine {
    pub name: String,
    pub overs: String,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
}

/// Plays every scripted innings and derives the report.
///
/// The side batting second chases the first-innings score plus one. An
/// innings whose script runs out before it ends is declared.
pub fn replay(loaded: LoadedMatch, top: usize) -> Result<MatchReport> {
    let LoadedMatch {
        script,
        format,
        mut home,
        mut away,
    } = loaded;

    let mut played: Vec<(Innings, InningsStatus, Option<u32>)> = Vec::new();
    let mut target = None;
    for (index, innings_script) in script.innings.iter().enumerate() {
        let (batting, bowling) = if index == 0 {
            (&mut home, &mut away)
        } else {
            (&mut away, &mut home)
        };
        let (innings, status) = play_innings(&format, innings_script, batting, bowling, target)
            .with_context(|| format!("Innings {} of '{}'", index + 1, script.title))?;
        played.push((innings, status, target));
        target = Some(played[index].0.score(batting).runs + 1);
    }

    let result = match played.as_slice() {
        [(first, ..), (second, ..)] => Some(match_result(first, &home, second, &away)),
        _ => None,
    };

    let innings = played
        .iter()
        .enumerate()
        .map(|(index, (innings, status, target))| {
            let (batting, bowling) = if index == 0 {
                (&home, &away)
            } else {
                (&away, &home)
            };
            innings_report(&format, innings, *status, *target, batting, bowling)
        })
        .collect();

    Ok(MatchReport {
        title: script.title.clone(),
        format: format.name.clone(),
        innings,
        result,
        top_batters: top_batters(&[&home, &away], top),
        top_bowlers: top_bowlers(&[&home, &away], top, format.balls_per_over),
    })
}

fn play_innings(
    format: &FormatConfig,
    script: &InningsScript,
    batting: &mut Team,
    bowling: &mut Team,
    target: Option<u32>,
) -> Result<(Innings, InningsStatus)> {
    let mut session = InningsSession::new(format, batting, bowling, target)?;
    let mut policy = script.selection();

    let mut status = session
        .play(batting, bowling, &mut policy, script.feed())
        .inspect_err(|error| {
            tracing::error!(
                code = error.error_code(),
                severity = %error.severity(),
                "scripted innings failed"
            );
        })?;
    if !status.is_complete() {
        tracing::info!(team = %batting.name, "script ended mid-innings, declaring");
        session.declare()?;
        status = session.status();
    }
    Ok((session.into_innings(), status))
}

fn innings_report(
    format: &FormatConfig,
    innings: &Innings,
    status: InningsStatus,
    target: Option<u32>,
    batting: &Team,
    bowling: &Team,
) -> InningsReport {
    let batting_lines = batting
        .batters()
        .filter(|player| player.batted)
        .map(|player| BattingLine {
            name: batting
                .display_name(player.number)
                .unwrap_or_else(|| player.name.clone()),
            dismissal: player.batting.dismissal_text().to_string(),
            runs: player.batting.runs,
            balls: player.batting.balls,
            fours: player.batting.fours,
            sixes: player.batting.sixes,
            strike_rate: player.batting.strike_rate(),
        })
        .collect();

    // Bowlers in the order they first came on.
    let mut bowlers: Vec<_> = innings
        .bowler_overs()
        .iter()
        .filter_map(|(number, overs)| Some((*overs.first()?, *number)))
        .collect();
    bowlers.sort_unstable();
    let bowling_lines = bowlers
        .into_iter()
        .filter_map(|(_, number)| bowling.player(number))
        .map(|player| BowlingLine {
            name: player.name.clone(),
            overs: bowling_overs(player, format.balls_per_over),
            maidens: player.bowling.maidens,
            runs: player.bowling.runs,
            wickets: player.bowling.wickets,
            economy: player.bowling.economy(format.balls_per_over),
        })
        .collect();

    InningsReport {
        status,
        target,
        summary: innings_summary(innings, batting),
        batting: batting_lines,
        bowling: bowling_lines,
        fall_of_wickets: innings.fall_of_wickets().to_vec(),
        partnerships: partnership_rows(innings, batting),
        phases: phase_breakdown(innings, format),
        run_rate_progression: run_rate_progression(innings),
    }
}

#[cfg(test)]
mod tests {
    use scorebook_content::ContentFactory;

    use super::*;
    use crate::dirs::bundled_data_dir;

    fn demo() -> MatchReport {
        let loaded = ContentFactory::new(bundled_data_dir())
            .load_match("demo")
            .unwrap();
        replay(loaded, 3).unwrap()
    }

    #[test]
    fn demo_chase_succeeds_in_the_last_over() {
        let report = demo();
        assert_eq!(report.format, "T5");
        assert_eq!(report.innings.len(), 2);

        let first = &report.innings[0];
        assert_eq!(first.status, InningsStatus::OversExhausted);
        assert_eq!(first.target, None);
        assert_eq!((first.summary.runs, first.summary.wickets), (51, 4));

        let second = &report.innings[1];
        assert_eq!(second.status, InningsStatus::TargetReached);
        assert_eq!(second.target, Some(52));
        assert_eq!((second.summary.runs, second.summary.wickets), (52, 2));
        assert_eq!(second.summary.overs.to_string(), "4.3");

        assert_eq!(
            report.result,
            Some(MatchResult::WonByWickets {
                winner: "Australia".to_string(),
                margin: 8,
            })
        );
    }

    #[test]
    fn scorecards_follow_batting_and_bowling_order() {
        let report = demo();
        let first = &report.innings[0];

        let names: Vec<&str> = first.batting.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Rohit Sharma (c)",
                "Shubman Gill",
                "Virat Kohli",
                "Shreyas Iyer",
                "KL Rahul †",
                "Hardik Pandya",
            ]
        );
        assert_eq!(first.batting[3].dismissal, "not out");

        let bowlers: Vec<(&str, &str)> = first
            .bowling
            .iter()
            .map(|l| (l.name.as_str(), l.overs.as_str()))
            .collect();
        assert_eq!(
            bowlers,
            [
                ("Mitchell Starc", "2"),
                ("Pat Cummins", "2"),
                ("Josh Hazlewood", "1"),
            ]
        );

        let second = &report.innings[1];
        assert_eq!(second.batting.len(), 4);
        assert_eq!(second.batting[0].name, "Travis Head");
        assert_eq!(second.batting[0].runs, 24);
        assert_eq!(second.partnerships.len(), 3);
        assert!(second.partnerships[2].unbroken);

        assert_eq!(report.top_batters[0].name, "Travis Head");
        assert_eq!(report.top_bowlers[0].name, "Pat Cummins");
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_value(demo()).unwrap();
        assert_eq!(json["result"]["result"], "won_by_wickets");
        assert_eq!(json["innings"][1]["status"], "target_reached");
        assert_eq!(json["innings"][0]["fall_of_wickets"][0]["score"], 15);
    }
}
