//! Ball spawning

use super::body::{BodyDesc, BodyKind, BodyRole, CollisionFilter, Shape};
use super::engine::HostEngine;
use super::state::{Ball, BallPhase, GameEvent, GameState};
use crate::display::ScoreDisplay;
use crate::forward_of;
use crate::settings::Settings;

/// Throw a ball from the current camera pose
///
/// Returns the new ball's id, or `None` if the host has no camera frame yet.
pub fn spawn_ball<E: HostEngine, D: ScoreDisplay>(
    state: &mut GameState,
    engine: &mut E,
    display: &D,
    settings: &Settings,
) -> Option<u32> {
    let Some(frame) = engine.current_frame() else {
        log::debug!("no camera frame, skipping throw");
        return None;
    };

    let id = state.next_ball_id();
    let role = BodyRole::Ball(id);
    let body = engine.add_body(
        BodyDesc {
            kind: BodyKind::Dynamic,
            shape: Shape::Sphere {
                radius: settings.ball_radius,
            },
            transform: frame.transform,
            filter: CollisionFilter::BALL,
            mass: settings.ball_mass,
            role,
            texture: Some(settings.ball_texture.clone()),
        },
        None,
    );
    state.register_body(body, role);

    // Cameras look down -Z
    let impulse = -forward_of(&frame.transform) * settings.throw_power;
    engine.apply_impulse(body, impulse);

    state.balls.insert(
        id,
        Ball {
            id,
            body,
            phase: BallPhase::Spawned,
            spawn_transform: frame.transform,
        },
    );
    state.score.thrown += 1;
    state.events.push(GameEvent::BallThrown { ball: id });
    display.post(state.score.readout());
    log::debug!("ball {} thrown, impulse {:?}", id, impulse);

    Some(id)
}
