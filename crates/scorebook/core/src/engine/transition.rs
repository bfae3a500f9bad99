//! Delivery transition: plan, apply, verify.

use tracing::{debug, info};

use super::DeliveryResult;
use super::errors::{
    DeliveryError, ExecuteError, InvariantError, TransitionPhase, TransitionPhaseError,
};
use super::reducer::{BattingReducer, BowlingReducer, InningsReducer};
use crate::config::FormatConfig;
use crate::error::ErrorContext;
use crate::outcome::BallOutcome;
use crate::selection::{BatterRequest, SelectionError, SelectionPolicy, SelectionRole};
use crate::state::{
    BallEvent, CreaseEnd, FallOfWicket, Innings, OverBall, OverState, Partnership, PlayerNumber,
    Team,
};

/// Who comes in after a wicket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Replacement {
    Batter(PlayerNumber),
    /// Tenth wicket; nobody is asked.
    AllOut,
    /// No eligible batter remains.
    Exhausted,
}

#[derive(Clone, Debug)]
struct DismissalPlan {
    batter: PlayerNumber,
    batter_name: String,
    /// End the dismissed batter occupies after any crossing.
    end: CreaseEnd,
    label: String,
    replacement: Replacement,
}

/// Everything the delivery needs, resolved before any mutation.
#[derive(Clone, Debug)]
struct DeliveryPlan {
    over: OverState,
    striker: PlayerNumber,
    bowler_name: String,
    /// Batter credited with the ball: the striker, or the run-out victim.
    receiver: PlayerNumber,
    dismissal: Option<DismissalPlan>,
}

/// Executes one delivery through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - check the payload and the innings, resolve the
///    dismissal and ask for a replacement batter
/// 2. `apply` - mutate figures, extras, partnership, phase and crease
/// 3. `post_validate` - verify innings invariants
pub(super) fn execute_delivery<P>(
    outcome: &BallOutcome,
    innings: &mut Innings,
    format: &FormatConfig,
    batting: &mut Team,
    bowling: &mut Team,
    policy: &mut P,
) -> Result<DeliveryResult, ExecuteError>
where
    P: SelectionPolicy + ?Sized,
{
    let plan = pre_validate(outcome, innings, format, batting, bowling, policy)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = apply(outcome, plan, innings, batting, bowling)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    post_validate(innings, format, batting)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

fn pre_validate<P>(
    outcome: &BallOutcome,
    innings: &Innings,
    format: &FormatConfig,
    batting: &Team,
    bowling: &Team,
    policy: &mut P,
) -> Result<DeliveryPlan, DeliveryError>
where
    P: SelectionPolicy + ?Sized,
{
    outcome.validate()?;

    let over = *innings
        .current_over()
        .ok_or(DeliveryError::OverNotInProgress)?;
    if over.legal_balls >= format.balls_per_over {
        return Err(DeliveryError::OverComplete {
            legal_balls: over.legal_balls,
        });
    }

    let crease = *innings.crease();
    let (striker, non_striker) = crease.pair().ok_or(DeliveryError::CreaseIncomplete)?;
    for batter in [striker, non_striker] {
        if !batting.contains(batter) {
            return Err(DeliveryError::PlayerNotFound {
                team: batting.name.clone(),
                number: batter,
            });
        }
    }
    let bowler = bowling
        .player(over.bowler)
        .ok_or_else(|| DeliveryError::PlayerNotFound {
            team: bowling.name.clone(),
            number: over.bowler,
        })?;

    let (receiver, dismissal) = match outcome {
        BallOutcome::RunOut { dismissed, .. } => {
            let mut after = crease;
            if outcome.rotates_strike() {
                after.swap();
            }
            let out = after.get(*dismissed).unwrap_or(striker);
            let survivor = after.get(dismissed.other());
            (out, Some((out, *dismissed, survivor)))
        }
        BallOutcome::Wicket { .. } => {
            (striker, Some((striker, CreaseEnd::Striker, Some(non_striker))))
        }
        _ => (striker, None),
    };

    let dismissal = match dismissal {
        Some((batter, end, survivor)) => {
            let label = outcome
                .dismissal_label(&bowler.name)
                .unwrap_or_else(|| format!("b {}", bowler.surname()));
            let batter_name = batting
                .player(batter)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            let replacement = plan_replacement(innings, batting, batter, survivor, policy)?;
            Some(DismissalPlan {
                batter,
                batter_name,
                end,
                label,
                replacement,
            })
        }
        None => None,
    };

    Ok(DeliveryPlan {
        over,
        striker,
        bowler_name: bowler.name.clone(),
        receiver,
        dismissal,
    })
}

fn plan_replacement<P>(
    innings: &Innings,
    batting: &Team,
    dismissed: PlayerNumber,
    survivor: Option<PlayerNumber>,
    policy: &mut P,
) -> Result<Replacement, DeliveryError>
where
    P: SelectionPolicy + ?Sized,
{
    let wickets = innings.wickets() + 1;
    if wickets >= FormatConfig::MAX_WICKETS {
        return Ok(Replacement::AllOut);
    }

    let request = BatterRequest::new(batting, wickets, dismissed, survivor);
    if request.eligible.is_empty() {
        return Ok(Replacement::Exhausted);
    }

    let choice = policy
        .choose_batter(&request)
        .ok_or(SelectionError::Declined {
            role: SelectionRole::Batter,
        })?;
    request.validate(choice).inspect_err(|error| {
        tracing::warn!(batter = %choice, %error, "rejected replacement batter");
    })?;
    Ok(Replacement::Batter(choice))
}

fn apply(
    outcome: &BallOutcome,
    plan: DeliveryPlan,
    innings: &mut Innings,
    batting: &mut Team,
    bowling: &mut Team,
) -> Result<DeliveryResult, DeliveryError> {
    let DeliveryPlan {
        over,
        striker,
        bowler_name,
        receiver,
        dismissal,
    } = plan;
    let total = outcome.total_runs();
    let legal = outcome.is_legal();

    let bowling_name = bowling.name.clone();
    let Some(bowler) = bowling.player_mut(over.bowler) else {
        return Err(DeliveryError::PlayerNotFound {
            team: bowling_name,
            number: over.bowler,
        });
    };
    bowler.bowled = true;
    BowlingReducer::new(&mut bowler.bowling).deliver(outcome);

    let batting_name = batting.name.clone();
    let Some(batter) = batting.player_mut(receiver) else {
        return Err(DeliveryError::PlayerNotFound {
            team: batting_name,
            number: receiver,
        });
    };
    BattingReducer::new(&mut batter.batting).receive(outcome);

    let mut reducer = InningsReducer::new(innings);
    reducer.log_ball(BallEvent {
        over: over.index,
        ball: over.legal_balls + 1,
        bowler: over.bowler,
        striker,
        runs: total,
        outcome: outcome.clone(),
    });
    reducer.add_extras(outcome.extras());
    reducer.add_runs(total);
    reducer.accrue_phase(total, legal, outcome.is_wicket());
    if outcome.counts_for_partnership() {
        reducer.credit_partnership(receiver, total, outcome.bat_runs());
    }
    if outcome.rotates_strike() {
        reducer.crease().swap();
    }

    debug!(
        over = over.index,
        ball = over.legal_balls + 1,
        kind = outcome.kind(),
        runs = total,
        striker = %striker,
        bowler = %over.bowler,
        "delivery applied"
    );

    let mut over_ended_early = false;
    let mut dismissed = None;
    if let Some(plan) = dismissal {
        let score = reducer.innings().runs();
        let wicket = reducer.innings().wickets() + 1;
        let at = OverBall::new(over.index, over.legal_balls + 1);

        if let Some(out) = batting.player_mut(plan.batter) {
            BattingReducer::new(&mut out.batting).dismiss(plan.label.clone());
        }
        reducer.record_wicket(FallOfWicket {
            score,
            wicket,
            batter: plan.batter_name.clone(),
            bowler: bowler_name,
            at,
        });
        info!(
            wicket,
            score,
            at = %at,
            batter = %plan.batter_name,
            dismissal = %plan.label,
            "wicket"
        );

        match plan.replacement {
            Replacement::Batter(next) => {
                let survivor = reducer.crease().get(plan.end.other());
                reducer.crease().set(plan.end, Some(next));
                if let Some(player) = batting.player_mut(next) {
                    player.batted = true;
                }
                if let Some(survivor) = survivor {
                    reducer.open_partnership(Partnership::open(survivor, next, wicket + 1, score));
                }
                debug!(batter = %next, wicket = wicket + 1, "new batter");
            }
            Replacement::AllOut | Replacement::Exhausted => {
                reducer.crease().clear();
                over_ended_early = true;
                info!(wickets = wicket, score, "no batters remain");
            }
        }
        dismissed = Some(plan.batter);
    }

    if legal {
        reducer.over().count_legal_ball();
    }

    let innings = reducer.innings();
    let over_now = innings.current_over().copied().unwrap_or(over);
    Ok(DeliveryResult {
        wickets: innings.wickets(),
        over_runs: over_now.runs,
        legal_balls: over_now.legal_balls,
        crease: *innings.crease(),
        batters_yet: batting.yet_to_bat(None),
        over_ended_early,
        dismissed,
        runs: total,
    })
}

fn post_validate(
    innings: &Innings,
    format: &FormatConfig,
    batting: &Team,
) -> Result<(), DeliveryError> {
    let context = invariant_context(innings);
    let wickets = innings.wickets();

    if wickets > FormatConfig::MAX_WICKETS {
        return Err(InvariantError::TooManyWickets { wickets, context }.into());
    }

    let closed = innings.partnerships().len() as u32;
    if closed != wickets {
        return Err(InvariantError::PartnershipCount {
            closed,
            wickets,
            context,
        }
        .into());
    }

    let derived = innings.extras().total() + innings.batting_runs_since_open(batting);
    if derived != innings.runs() {
        return Err(InvariantError::ScoreMismatch {
            running: innings.runs(),
            derived,
            context,
        }
        .into());
    }

    if let Some(over) = innings.current_over()
        && over.legal_balls > format.balls_per_over
    {
        return Err(InvariantError::OverOverflow {
            legal_balls: over.legal_balls,
            balls_per_over: format.balls_per_over,
            context,
        }
        .into());
    }

    Ok(())
}

fn invariant_context(innings: &Innings) -> ErrorContext {
    let mut context = ErrorContext::new().with_message("post-delivery invariant");
    if let Some(ball) = innings.balls().last() {
        context = context
            .with_batter(ball.striker)
            .with_bowler(ball.bowler)
            .at(ball.at());
    }
    context
}
