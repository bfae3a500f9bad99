mod common;

use common::*;
use scorebook_core::{
    BallOutcome, DismissalDetail, FormatConfig, InningsStatus, OverBall, OversBowled, PlayerNumber,
};

/// Six singles: the score moves to 6/0 in exactly one over, and the odd runs
/// bring the original striker back on strike before the end-of-over swap.
#[test]
fn six_singles_complete_one_over() {
    let format = FormatConfig::t20();
    let (mut batting, mut bowling) = (batting_side(), bowling_side());
    let mut session = opened(&format, &mut batting, &mut bowling);

    let mut last = None;
    for _ in 0..6 {
        last = Some(
            session
                .deliver(
                    &BallOutcome::normal(1),
                    &mut batting,
                    &mut bowling,
                    &mut CountingSelection::default(),
                )
                .expect("single should apply"),
        );
    }
    let last = last.expect("six deliveries");

    // The engine reports the crease before end-of-over bookkeeping.
    assert_eq!(last.crease.striker, Some(STRIKER));
    assert_eq!(last.legal_balls, 6);
    assert_eq!(last.over_runs, 6);

    let score = session.score(&batting);
    assert_eq!(score.runs, 6);
    assert_eq!(score.wickets, 0);
    assert_eq!(score.overs, OversBowled::new(1, 0));
    assert_eq!(score.overs.as_decimal(), 1.0);
    assert_eq!(score.run_rate, 6.0);

    // Mandatory swap at the end of the over.
    assert_eq!(session.innings().crease().striker, Some(NON_STRIKER));
    assert_eq!(session.innings().over_totals(), &[6]);
    assert_eq!(session.innings().cumulative_runs(), &[6]);
}

/// Boundary, wide, no-ball with runs and a dot.
#[test]
fn extras_and_illegal_deliveries_are_split_correctly() {
    let format = FormatConfig::t20();
    let (mut batting, mut bowling) = (batting_side(), bowling_side());
    let mut session = opened(&format, &mut batting, &mut bowling);

    deliver_all(
        &mut session,
        &mut batting,
        &mut bowling,
        &[
            BallOutcome::normal(4),
            BallOutcome::Wide {
                runs: 1,
                swapped: false,
            },
            BallOutcome::NoBallRuns { runs: 3 },
            BallOutcome::dot(),
        ],
    );

    let innings = session.innings();
    assert_eq!(session.score(&batting).runs, 8);
    assert_eq!(innings.current_over().map(|o| o.legal_balls), Some(2));
    assert_eq!(innings.legal_balls(), 2);
    assert_eq!(innings.balls().len(), 4);
    assert_eq!(innings.extras().wides, 1);
    assert_eq!(innings.extras().no_balls, 1);
    assert_eq!(innings.extras().total(), 2);

    let bowler = bowling.player(OPENING_BOWLER).expect("bowler");
    assert_eq!(bowler.bowling.runs, 8);
    assert_eq!(bowler.bowling.balls, 2);
    assert_eq!(bowler.bowling.wides, 1);
    assert_eq!(bowler.bowling.noballs, 1);
    assert_eq!(bowler.bowling.fours, 1);
    assert_eq!(bowler.bowling.dots, 1);

    let striker = batting.player(STRIKER).expect("striker");
    assert_eq!(striker.batting.runs, 6);
    assert_eq!(striker.batting.balls, 3);
    assert_eq!(striker.batting.fours, 1);
    assert_eq!(striker.batting.deliveries_scoring(2), 1);
    assert_eq!(derived_score(&session, &batting), 8);
}

/// Caught dismissal off Starc; a new partnership opens.
#[test]
fn caught_dismissal_is_labelled_and_opens_partnership() {
    let format = FormatConfig::t20();
    let (mut batting, mut bowling) = (batting_side(), bowling_side());
    let mut session = opened(&format, &mut batting, &mut bowling);

    deliver_all(
        &mut session,
        &mut batting,
        &mut bowling,
        &[BallOutcome::normal(2)],
    );
    let result = session
        .deliver(
            &BallOutcome::wicket(DismissalDetail::caught("Smith")),
            &mut batting,
            &mut bowling,
            &mut CountingSelection::default(),
        )
        .expect("wicket should apply");

    assert_eq!(result.wickets, 1);
    assert_eq!(result.dismissed, Some(STRIKER));
    assert!(!result.over_ended_early);
    assert_eq!(result.crease.striker, Some(PlayerNumber(3)));
    assert_eq!(result.crease.non_striker, Some(NON_STRIKER));

    let out = batting.player(STRIKER).expect("dismissed batter");
    assert_eq!(out.batting.dismissal.as_deref(), Some("c Smith b Starc"));
    assert_eq!(out.batting.balls, 2);

    let innings = session.innings();
    let fall = &innings.fall_of_wickets()[0];
    assert_eq!(fall.score, 2);
    assert_eq!(fall.batter, "Rohit Sharma");
    assert_eq!(fall.bowler, "Mitchell Starc");
    assert_eq!(fall.at, OverBall::new(0, 2));

    assert_eq!(innings.partnerships().len(), 1);
    assert_eq!(innings.partnerships()[0].end_score, Some(2));
    let open = innings.current_partnership().expect("new partnership");
    assert_eq!(open.batter1, NON_STRIKER);
    assert_eq!(open.batter2, PlayerNumber(3));
    assert_eq!(open.wicket_number, 2);
    assert_eq!(open.start_score, 2);

    let bowler = bowling.player(OPENING_BOWLER).expect("bowler");
    assert_eq!(bowler.bowling.wickets, 1);
    assert!(batting.player(PlayerNumber(3)).expect("new batter").batted);
}

/// Tenth wicket in the middle of an over ends the innings on the spot.
#[test]
fn tenth_wicket_mid_over_ends_the_innings() {
    let format = FormatConfig::t20();
    let (mut batting, mut bowling) = (batting_side(), bowling_side());
    let mut session = opened(&format, &mut batting, &mut bowling);
    let mut policy = CountingSelection::default();
    let bowled = BallOutcome::wicket(DismissalDetail::bowled());

    for _ in 0..6 {
        session
            .deliver(&bowled, &mut batting, &mut bowling, &mut policy)
            .expect("wicket should apply");
    }
    session
        .begin_over(PlayerNumber(22), &mut bowling)
        .expect("second bowler is valid");
    for _ in 0..3 {
        session
            .deliver(&bowled, &mut batting, &mut bowling, &mut policy)
            .expect("wicket should apply");
    }
    assert_eq!(policy.batter_requests, 9);
    assert_eq!(session.status(), InningsStatus::InProgress);

    let last = session
        .deliver(&bowled, &mut batting, &mut bowling, &mut policy)
        .expect("tenth wicket should apply");

    assert!(last.over_ended_early);
    assert_eq!(last.wickets, 10);
    assert_eq!(policy.batter_requests, 9, "no replacement is requested");
    assert!(!last.crease.is_full());
    assert_eq!(last.crease.striker, None);
    assert_eq!(last.crease.non_striker, None);
    assert_eq!(session.status(), InningsStatus::AllOut);

    let innings = session.innings();
    assert_eq!(innings.fall_of_wickets()[9].at.to_string(), "1.4");
    assert_eq!(innings.partnerships().len(), 10);
    assert!(innings.current_partnership().is_none());
    assert_eq!(innings.over_totals(), &[0, 0]);
    assert!(innings.current_over().is_none());
    assert_eq!(session.score(&batting).overs, OversBowled::new(1, 4));

    let err = session
        .deliver(&BallOutcome::dot(), &mut batting, &mut bowling, &mut policy)
        .expect_err("innings is over");
    assert!(matches!(
        err,
        scorebook_core::SessionError::InningsComplete {
            status: InningsStatus::AllOut
        }
    ));
}

/// Six legal deliveries without extras add exactly one over.
#[test]
fn six_legal_deliveries_add_exactly_one_over() {
    let format = FormatConfig::one_day();
    let (mut batting, mut bowling) = (batting_side(), bowling_side());
    let mut session = opened(&format, &mut batting, &mut bowling);

    deliver_all(
        &mut session,
        &mut batting,
        &mut bowling,
        &[BallOutcome::normal(2), BallOutcome::dot(), BallOutcome::normal(1)],
    );
    let before = session.score(&batting).overs;
    assert_eq!(before, OversBowled::new(0, 3));

    deliver_all(
        &mut session,
        &mut batting,
        &mut bowling,
        &[BallOutcome::dot(), BallOutcome::dot(), BallOutcome::normal(4)],
    );
    session
        .begin_over(PlayerNumber(22), &mut bowling)
        .expect("second bowler is valid");
    deliver_all(
        &mut session,
        &mut batting,
        &mut bowling,
        &[BallOutcome::dot(), BallOutcome::normal(6), BallOutcome::dot()],
    );

    let after = session.score(&batting).overs;
    assert_eq!(after, OversBowled::new(1, 3));
    assert_eq!(after.as_decimal() - before.as_decimal(), 1.0);
}
