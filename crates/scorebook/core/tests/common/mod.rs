#![allow(dead_code)]

use scorebook_core::{
    BallOutcome, BatterRequest, BowlerRequest, FormatConfig, InningsSession, OpenersRequest,
    OrderedSelection, PlayerNumber, SelectionPolicy, Team,
};

pub const STRIKER: PlayerNumber = PlayerNumber(1);
pub const NON_STRIKER: PlayerNumber = PlayerNumber(2);
pub const OPENING_BOWLER: PlayerNumber = PlayerNumber(21);

/// Eleven batters numbered 1..=11.
pub fn batting_side() -> Team {
    Team::from_roster(
        "India",
        [
            (1, "Rohit Sharma"),
            (2, "Shubman Gill"),
            (3, "Virat Kohli"),
            (4, "Shreyas Iyer"),
            (5, "KL Rahul"),
            (6, "Hardik Pandya"),
            (7, "Ravindra Jadeja"),
            (8, "Axar Patel"),
            (9, "Kuldeep Yadav"),
            (10, "Jasprit Bumrah"),
            (11, "Mohammed Siraj"),
        ],
    )
    .expect("valid roster")
}

/// Eleven fielders numbered 21..=31; 21 opens the bowling.
pub fn bowling_side() -> Team {
    Team::from_roster(
        "Australia",
        [
            (21, "Mitchell Starc"),
            (22, "Pat Cummins"),
            (23, "Josh Hazlewood"),
            (24, "Adam Zampa"),
            (25, "Glenn Maxwell"),
            (26, "Travis Head"),
            (27, "Steve Smith"),
            (28, "Marnus Labuschagne"),
            (29, "Mitchell Marsh"),
            (30, "Alex Carey"),
            (31, "David Warner"),
        ],
    )
    .expect("valid roster")
}

/// Session with openers 1 and 2 in and over 0 started by bowler 21.
pub fn opened<'f>(
    format: &'f FormatConfig,
    batting: &mut Team,
    bowling: &mut Team,
) -> InningsSession<'f> {
    let mut session =
        InningsSession::new(format, batting, bowling, None).expect("session should start");
    session
        .open(STRIKER, NON_STRIKER, batting)
        .expect("openers are valid");
    session
        .begin_over(OPENING_BOWLER, bowling)
        .expect("opening bowler is valid");
    session
}

/// Ordered policy that also counts how often it was asked for a batter.
#[derive(Default)]
pub struct CountingSelection {
    pub batter_requests: usize,
}

impl SelectionPolicy for CountingSelection {
    fn choose_openers(
        &mut self,
        request: &OpenersRequest<'_>,
    ) -> Option<(PlayerNumber, PlayerNumber)> {
        OrderedSelection.choose_openers(request)
    }

    fn choose_bowler(&mut self, request: &BowlerRequest<'_>) -> Option<PlayerNumber> {
        OrderedSelection.choose_bowler(request)
    }

    fn choose_batter(&mut self, request: &BatterRequest<'_>) -> Option<PlayerNumber> {
        self.batter_requests += 1;
        OrderedSelection.choose_batter(request)
    }
}

/// Policy that always answers with the same replacement batter.
pub struct FixedBatter(pub PlayerNumber);

impl SelectionPolicy for FixedBatter {
    fn choose_openers(
        &mut self,
        request: &OpenersRequest<'_>,
    ) -> Option<(PlayerNumber, PlayerNumber)> {
        OrderedSelection.choose_openers(request)
    }

    fn choose_bowler(&mut self, request: &BowlerRequest<'_>) -> Option<PlayerNumber> {
        OrderedSelection.choose_bowler(request)
    }

    fn choose_batter(&mut self, _request: &BatterRequest<'_>) -> Option<PlayerNumber> {
        Some(self.0)
    }
}

/// Runs `outcomes` through an opened session with the ordered policy.
pub fn deliver_all(
    session: &mut InningsSession<'_>,
    batting: &mut Team,
    bowling: &mut Team,
    outcomes: &[BallOutcome],
) {
    for outcome in outcomes {
        session
            .deliver(outcome, batting, bowling, &mut OrderedSelection)
            .expect("delivery should apply");
    }
}

/// Team score re-derived from extras and every player's batting runs.
pub fn derived_score(session: &InningsSession<'_>, batting: &Team) -> u32 {
    session.innings().extras().total() + batting.players().map(|p| p.batting.runs).sum::<u32>()
}
