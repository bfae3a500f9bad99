use std::cmp::Reverse;

use super::overs_label;
use crate::state::{Player, PlayerNumber, Team};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattingRow {
    pub team: String,
    pub number: PlayerNumber,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub not_out: bool,
    pub strike_rate: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BowlingRow {
    pub team: String,
    pub number: PlayerNumber,
    pub name: String,
    pub wickets: u32,
    pub runs: u32,
    pub overs: String,
    pub economy: f64,
}

/// Deliveries scored off, bucketed by runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringBreakdown {
    pub zeros: u32,
    pub ones: u32,
    pub twos: u32,
    pub threes: u32,
    pub fours: u32,
    pub fives: u32,
    pub sixes: u32,
}

pub fn scoring_breakdown(player: &Player) -> ScoringBreakdown {
    let count = |runs| player.batting.deliveries_scoring(runs);
    ScoringBreakdown {
        zeros: count(0),
        ones: count(1),
        twos: count(2),
        threes: count(3),
        fours: count(4),
        fives: count(5),
        sixes: count(6),
    }
}

pub fn strike_rate(player: &Player) -> f64 {
    player.batting.strike_rate()
}

pub fn economy(player: &Player, balls_per_over: u32) -> f64 {
    player.bowling.economy(balls_per_over)
}

/// Bowler's overs, e.g. `"3.2"`.
pub fn bowling_overs(player: &Player, balls_per_over: u32) -> String {
    overs_label(player.bowling.balls, balls_per_over)
}

/// Highest run scorers among players who faced a ball, across `teams`.
pub fn top_batters(teams: &[&Team], n: usize) -> Vec<BattingRow> {
    let mut rows: Vec<BattingRow> = teams
        .iter()
        .flat_map(|team| {
            team.players()
                .filter(|p| p.batted && p.batting.balls > 0)
                .map(|p| BattingRow {
                    team: team.name.clone(),
                    number: p.number,
                    name: p.name.clone(),
                    runs: p.batting.runs,
                    balls: p.batting.balls,
                    not_out: !p.batting.is_out(),
                    strike_rate: p.batting.strike_rate(),
                })
        })
        .collect();
    rows.sort_by_key(|row| Reverse(row.runs));
    rows.truncate(n);
    rows
}

/// Most wickets, then fewest runs, among players who bowled a legal ball.
pub fn top_bowlers(teams: &[&Team], n: usize, balls_per_over: u32) -> Vec<BowlingRow> {
    let mut rows: Vec<BowlingRow> = teams
        .iter()
        .flat_map(|team| {
            team.players()
                .filter(|p| p.bowled && p.bowling.balls > 0)
                .map(|p| BowlingRow {
                    team: team.name.clone(),
                    number: p.number,
                    name: p.name.clone(),
                    wickets: p.bowling.wickets,
                    runs: p.bowling.runs,
                    overs: overs_label(p.bowling.balls, balls_per_over),
                    economy: p.bowling.economy(balls_per_over),
                })
        })
        .collect();
    rows.sort_by_key(|row| (Reverse(row.wickets), row.runs));
    rows.truncate(n);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side() -> Team {
        let mut team = Team::from_roster(
            "Home",
            [(1, "Joe Root"), (2, "Zak Crawley"), (3, "Mark Wood")],
        )
        .unwrap();
        for (number, runs, balls, wickets, conceded) in
            [(1, 40, 30, 0, 0), (2, 55, 41, 2, 30), (3, 0, 0, 2, 18)]
        {
            let player = team.player_mut(PlayerNumber(number)).unwrap();
            player.batted = balls > 0;
            player.batting.runs = runs;
            player.batting.balls = balls;
            player.bowled = true;
            player.bowling.balls = 24;
            player.bowling.wickets = wickets;
            player.bowling.runs = conceded;
        }
        team
    }

    #[test]
    fn top_batters_sorted_by_runs() {
        let team = side();
        let rows = top_batters(&[&team], 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Zak Crawley");
        assert!(rows[0].not_out);
        assert_eq!(rows[1].runs, 40);
    }

    #[test]
    fn top_bowlers_break_ties_on_runs() {
        let team = side();
        let rows = top_bowlers(&[&team], 2, 6);
        assert_eq!(rows[0].name, "Mark Wood");
        assert_eq!(rows[1].name, "Zak Crawley");
        assert_eq!(rows[0].overs, "4");
        assert_eq!(rows[0].economy, 4.5);
    }

    #[test]
    fn breakdown_reads_scoring_distribution() {
        let mut player = Player::new(1, "Joe Root");
        player.batting.scoring_distribution.insert(0, 3);
        player.batting.scoring_distribution.insert(4, 2);
        let breakdown = scoring_breakdown(&player);
        assert_eq!(breakdown.zeros, 3);
        assert_eq!(breakdown.fours, 2);
        assert_eq!(breakdown.fives, 0);
        player.bowling.balls = 20;
        assert_eq!(bowling_overs(&player, 6), "3.2");
    }
}
