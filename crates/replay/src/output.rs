//! Terminal and JSON rendering of a match report.

use anyhow::{Context, Result};
use console::style;

use crate::report::{InningsReport, MatchReport};

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Scorecards and headline statistics
    Summary,
    /// Full report as JSON
    Json,
}

pub fn print_json(report: &MatchReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

pub fn print_summary(report: &MatchReport) {
    println!(
        "{} {}",
        style(&report.title).bold().green(),
        style(format!("({})", report.format)).dim()
    );
    println!();

    for innings in &report.innings {
        print_innings(innings);
    }

    if let Some(result) = &report.result {
        println!("{} {}", style("Result:").bold().cyan(), result);
        println!();
    }

    println!("{}", style("Top batters").bold().yellow());
    for row in &report.top_batters {
        let marker = if row.not_out { "*" } else { "" };
        println!(
            "  {:<24} {:>4}{:<1} ({} balls, SR {:.1})  {}",
            row.name, row.runs, marker, row.balls, row.strike_rate, row.team
        );
    }
    println!("{}", style("Top bowlers").bold().yellow());
    for row in &report.top_bowlers {
        println!(
            "  {:<24} {}/{} ({} ov, econ {:.2})  {}",
            row.name, row.wickets, row.runs, row.overs, row.economy, row.team
        );
    }
}

fn print_innings(innings: &InningsReport) {
    let summary = &innings.summary;
    println!(
        "{} {}/{} ({} ov, RR {:.2}) {}",
        style(&summary.team).bold().cyan(),
        summary.runs,
        summary.wickets,
        summary.overs,
        summary.run_rate,
        style(format!("[{}]", innings.status)).dim()
    );
    if let Some(target) = innings.target {
        println!("  Target: {}", target);
    }

    for line in &innings.batting {
        println!(
            "  {:<26} {:<28} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            line.name, line.dismissal, line.runs, line.balls, line.fours, line.sixes,
            line.strike_rate
        );
    }
    println!("  Extras: {}", summary.extras);

    if !innings.fall_of_wickets.is_empty() {
        let falls: Vec<String> = innings
            .fall_of_wickets
            .iter()
            .map(|fall| format!("{}-{} ({}, {})", fall.score, fall.wicket, fall.batter, fall.at))
            .collect();
        println!("  {} {}", style("FoW:").dim(), falls.join(", "));
    }
    println!();

    for line in &innings.bowling {
        println!(
            "  {:<26} {:>5} {:>3} {:>4} {:>3} {:>6.2}",
            line.name, line.overs, line.maidens, line.runs, line.wickets, line.economy
        );
    }
    println!();

    for row in &innings.partnerships {
        let unbroken = if row.unbroken { "*" } else { "" };
        println!(
            "  {:>2}. {:>4}{:<1} ({} balls)  {} {}, {} {}",
            row.wicket_number,
            row.total_runs,
            unbroken,
            row.total_balls,
            row.batter1_name,
            row.batter1_runs,
            row.batter2_name,
            row.batter2_runs
        );
    }

    if let Some(phases) = &innings.phases {
        for row in phases {
            println!(
                "  {:<10} {:>4}/{} in {} ov",
                row.phase.as_ref(),
                row.runs,
                row.wickets,
                row.overs
            );
        }
    }
    println!(
        "  Dots {:.1}%, boundaries {} x4 {} x6 ({} runs)",
        summary.dot_ball_percent, summary.fours, summary.sixes, summary.runs_in_boundaries
    );
    println!();
}
