//! Rim contact scoring
//!
//! A basket is a ball that enters the top sensor and later the bottom one.
//! Each ball walks `Spawned -> ToppedOut -> Scored`, or drops straight to
//! `Unscored` when it reaches the bottom sensor first. Both end states are
//! final, so repeated contacts never count twice.

use super::body::{BodyRole, SensorKind};
use super::engine::ContactPair;
use super::state::{BallPhase, GameEvent, GameState};
use crate::display::ScoreDisplay;

/// What a contact-begin event did to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Not a ball/sensor pair
    Ignored,
    /// Ball entered the top sensor for the first time
    RimEntered { ball: u32 },
    /// Ball re-entered the top sensor before reaching the bottom
    AlreadyTopped { ball: u32 },
    /// Ball reached the bottom sensor after the top: point scored
    Basket { ball: u32 },
    /// Ball reached the bottom sensor without passing the top
    Miss { ball: u32 },
    /// Ball already scored or missed; contact has no effect
    Settled { ball: u32 },
}

/// Resolve a contact pair to (sensor, ball id), in either body order
pub fn classify(state: &GameState, pair: &ContactPair) -> Option<(SensorKind, u32)> {
    match (state.role_of(pair.first)?, state.role_of(pair.second)?) {
        (BodyRole::Sensor(kind), BodyRole::Ball(ball)) => Some((kind, ball)),
        (BodyRole::Ball(ball), BodyRole::Sensor(kind)) => Some((kind, ball)),
        _ => None,
    }
}

/// Advance the scoring state machine for one contact-begin event
pub fn on_contact_begin<D: ScoreDisplay>(
    state: &mut GameState,
    display: &D,
    pair: &ContactPair,
) -> ContactOutcome {
    let Some((sensor, id)) = classify(state, pair) else {
        return ContactOutcome::Ignored;
    };
    let Some(ball) = state.ball_mut(id) else {
        return ContactOutcome::Ignored;
    };

    let outcome = match (sensor, ball.phase) {
        (_, phase) if phase.is_terminal() => ContactOutcome::Settled { ball: id },
        (SensorKind::Top, BallPhase::ToppedOut) => ContactOutcome::AlreadyTopped { ball: id },
        (SensorKind::Top, _) => {
            ball.phase = BallPhase::ToppedOut;
            ContactOutcome::RimEntered { ball: id }
        }
        (SensorKind::Bottom, BallPhase::ToppedOut) => {
            ball.phase = BallPhase::Scored;
            ContactOutcome::Basket { ball: id }
        }
        (SensorKind::Bottom, _) => {
            ball.phase = BallPhase::Unscored;
            ContactOutcome::Miss { ball: id }
        }
    };

    match outcome {
        ContactOutcome::RimEntered { ball } => {
            log::trace!("ball {} entered the rim", ball);
            state.events.push(GameEvent::RimEntered { ball });
        }
        ContactOutcome::Basket { ball } => {
            state.score.points += 1;
            state.events.push(GameEvent::Basket { ball });
            display.post(state.score.readout());
            log::info!("basket! ball {} ({})", ball, state.score.readout());
        }
        ContactOutcome::Miss { ball } => {
            log::debug!("ball {} passed under the rim", ball);
            state.events.push(GameEvent::Miss { ball });
        }
        _ => {}
    }

    outcome
}
