//! Session controller: routes host callbacks to the game handlers
//!
//! Callbacks arrive one at a time on the interaction context. Each is turned
//! into a `HostEvent` and handed to `handle_event` together with the session
//! state, so no handler reaches for globals.

use glam::Vec2;

use super::engine::{ContactPair, HostEngine, PlaneAnchor, TrackingConfig};
use super::placement::{place_hoop, visualize_surface};
use super::scoring::{ContactOutcome, on_contact_begin};
use super::state::{GameState, SessionPhase};
use super::throw::spawn_ball;
use crate::display::ScoreDisplay;
use crate::settings::Settings;

/// Callbacks delivered by the host
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// View appeared: start tracking
    Started,
    /// View disappeared: pause tracking
    Paused,
    /// World tracking found a new plane
    SurfaceAdded(PlaneAnchor),
    /// World tracking refined an existing plane
    SurfaceUpdated(PlaneAnchor),
    /// Tap gesture at a screen point (pixels)
    Tap(Vec2),
    /// Physics reported two bodies starting to touch
    ContactBegan(ContactPair),
}

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    HoopPlaced,
    BallThrown { ball: u32 },
    /// Tap didn't land on a detected surface
    NoSurfaceHit,
    /// Hoop asset or its sensors unavailable
    PlacementAborted,
    /// Tracking has no camera frame yet
    NoCameraFrame,
    /// Session isn't running
    Inactive,
}

/// Result of handling one host event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Lifecycle(SessionPhase),
    Surface { visualized: bool },
    Tap(TapOutcome),
    Contact(ContactOutcome),
}

/// Handle a tap: place the hoop first, throw balls afterwards
pub fn handle_tap<E: HostEngine, D: ScoreDisplay>(
    state: &mut GameState,
    engine: &mut E,
    display: &D,
    settings: &Settings,
    screen_point: Vec2,
) -> TapOutcome {
    if state.phase != SessionPhase::Running {
        log::debug!("tap ignored, session {:?}", state.phase);
        return TapOutcome::Inactive;
    }

    if state.is_hoop_placed() {
        return match spawn_ball(state, engine, display, settings) {
            Some(ball) => TapOutcome::BallThrown { ball },
            None => TapOutcome::NoCameraFrame,
        };
    }

    let Some(hit) = engine.hit_test(screen_point).into_iter().next() else {
        log::debug!("tap at {:?} hit no surface", screen_point);
        return TapOutcome::NoSurfaceHit;
    };
    match place_hoop(state, engine, settings, &hit) {
        Some(_) => TapOutcome::HoopPlaced,
        None => TapOutcome::PlacementAborted,
    }
}

/// Dispatch one host callback
pub fn handle_event<E: HostEngine, D: ScoreDisplay>(
    state: &mut GameState,
    engine: &mut E,
    display: &D,
    settings: &Settings,
    event: &HostEvent,
) -> EventOutcome {
    match event {
        HostEvent::Started => {
            engine.run_session(&TrackingConfig {
                show_statistics: settings.show_statistics,
                ..TrackingConfig::default()
            });
            state.phase = SessionPhase::Running;
            display.post(state.score.readout());
            log::info!("session running");
            EventOutcome::Lifecycle(state.phase)
        }
        HostEvent::Paused => {
            engine.pause_session();
            state.phase = SessionPhase::Paused;
            log::info!("session paused");
            EventOutcome::Lifecycle(state.phase)
        }
        HostEvent::SurfaceAdded(anchor) | HostEvent::SurfaceUpdated(anchor) => {
            let visualized = state.phase == SessionPhase::Running
                && visualize_surface(state, engine, settings, anchor);
            EventOutcome::Surface { visualized }
        }
        HostEvent::Tap(point) => {
            EventOutcome::Tap(handle_tap(state, engine, display, settings, *point))
        }
        HostEvent::ContactBegan(pair) => EventOutcome::Contact(on_contact_begin(state, display, pair)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ScoreChannel;
    use crate::sim::engine::AnchorId;
    use crate::world::{AssetCatalog, SimWorld};
    use glam::{Mat4, Vec3};

    fn wall() -> PlaneAnchor {
        PlaneAnchor {
            id: AnchorId(1),
            transform: Mat4::from_cols(
                Vec3::X.extend(0.0),
                Vec3::Z.extend(0.0),
                Vec3::NEG_Y.extend(0.0),
                Vec3::new(0.0, 1.6, -2.0).extend(1.0),
            ),
            extent: Vec2::new(1.0, 1.0),
        }
    }

    fn running_world() -> SimWorld {
        let mut world = SimWorld::new(AssetCatalog::standard());
        world.set_camera(Some(Mat4::from_translation(Vec3::new(0.0, 1.6, 0.0))));
        world.add_plane(wall());
        world
    }

    #[test]
    fn test_taps_ignored_until_started() {
        let mut state = GameState::new();
        let mut world = running_world();
        let (channel, _label) = ScoreChannel::new();
        let settings = Settings::default();

        let center = world.viewport() / 2.0;
        let outcome = handle_tap(&mut state, &mut world, &channel, &settings, center);
        assert_eq!(outcome, TapOutcome::Inactive);
        assert!(!state.is_hoop_placed());
    }

    #[test]
    fn test_first_tap_places_then_throws() {
        let mut state = GameState::new();
        let mut world = running_world();
        let (channel, mut label) = ScoreChannel::new();
        let settings = Settings::default();
        handle_event(&mut state, &mut world, &channel, &settings, &HostEvent::Started);

        let center = world.viewport() / 2.0;
        let tap = HostEvent::Tap(center);
        assert_eq!(
            handle_event(&mut state, &mut world, &channel, &settings, &tap),
            EventOutcome::Tap(TapOutcome::HoopPlaced)
        );
        assert_eq!(
            handle_event(&mut state, &mut world, &channel, &settings, &tap),
            EventOutcome::Tap(TapOutcome::BallThrown { ball: 1 })
        );
        label.refresh();
        assert_eq!(label.text(), "0 / 1");
    }

    #[test]
    fn test_tap_off_surface_is_ignored() {
        let mut state = GameState::new();
        let mut world = running_world();
        let (channel, _label) = ScoreChannel::new();
        let settings = Settings::default();
        handle_event(&mut state, &mut world, &channel, &settings, &HostEvent::Started);

        // Top-left corner ray passes above and beside the 1 m wall
        let outcome = handle_tap(&mut state, &mut world, &channel, &settings, Vec2::ZERO);
        assert_eq!(outcome, TapOutcome::NoSurfaceHit);
        assert!(!state.is_hoop_placed());
    }

    #[test]
    fn test_pause_stops_taps_and_surfaces() {
        let mut state = GameState::new();
        let mut world = running_world();
        let (channel, _label) = ScoreChannel::new();
        let settings = Settings::default();
        handle_event(&mut state, &mut world, &channel, &settings, &HostEvent::Started);
        handle_event(&mut state, &mut world, &channel, &settings, &HostEvent::Paused);
        assert!(world.is_paused());

        let outcome = handle_event(
            &mut state,
            &mut world,
            &channel,
            &settings,
            &HostEvent::SurfaceAdded(wall()),
        );
        assert_eq!(outcome, EventOutcome::Surface { visualized: false });
        let center = world.viewport() / 2.0;
        assert_eq!(
            handle_tap(&mut state, &mut world, &channel, &settings, center),
            TapOutcome::Inactive
        );
    }
}
