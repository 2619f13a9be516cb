//! End-to-end sessions against the stand-in world

use ar_hoops::sim::{
    AnchorId, BallPhase, EventOutcome, GameState, HostEvent, PlaneAnchor, SessionPhase, TapOutcome,
    handle_event,
};
use ar_hoops::world::assets::RIM_CENTER;
use ar_hoops::world::{AssetCatalog, SimWorld};
use ar_hoops::{ScoreChannel, ScoreLabel, Settings};
use glam::{Mat4, Vec2, Vec3};

struct Harness {
    state: GameState,
    world: SimWorld,
    settings: Settings,
    channel: ScoreChannel,
    label: ScoreLabel,
}

impl Harness {
    fn new(catalog: AssetCatalog) -> Self {
        let (channel, label) = ScoreChannel::new();
        let mut world = SimWorld::new(catalog);
        world.set_camera(Some(Mat4::from_translation(Vec3::new(0.0, 1.6, 0.0))));
        Self {
            state: GameState::new(),
            world,
            settings: Settings::default(),
            channel,
            label,
        }
    }

    fn send(&mut self, event: HostEvent) -> EventOutcome {
        handle_event(
            &mut self.state,
            &mut self.world,
            &self.channel,
            &self.settings,
            &event,
        )
    }

    fn tap(&mut self) -> TapOutcome {
        let center = self.world.viewport() / 2.0;
        match self.send(HostEvent::Tap(center)) {
            EventOutcome::Tap(outcome) => outcome,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    fn detect(&mut self, anchor: PlaneAnchor) -> EventOutcome {
        self.world.add_plane(anchor.clone());
        self.send(HostEvent::SurfaceAdded(anchor))
    }

    fn run_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            for pair in self.world.advance(1.0 / 60.0) {
                self.send(HostEvent::ContactBegan(pair));
            }
        }
    }

    fn readout(&mut self) -> String {
        self.label.refresh();
        self.label.text().to_string()
    }

    fn rim(&self) -> Vec3 {
        self.state
            .hoop
            .as_ref()
            .expect("hoop placed")
            .transform
            .transform_point3(RIM_CENTER)
    }

    /// Camera straight above the rim, looking down
    fn aim_from_above(&mut self) {
        let pos = self.rim() + Vec3::Y;
        self.world.set_camera(Some(Mat4::from_cols(
            Vec3::X.extend(0.0),
            Vec3::NEG_Z.extend(0.0),
            Vec3::Y.extend(0.0),
            pos.extend(1.0),
        )));
    }

    /// Camera straight under the rim, looking up
    fn aim_from_below(&mut self) {
        let pos = self.rim() - Vec3::Y * 1.2;
        self.world.set_camera(Some(Mat4::from_cols(
            Vec3::X.extend(0.0),
            Vec3::Z.extend(0.0),
            Vec3::NEG_Y.extend(0.0),
            pos.extend(1.0),
        )));
    }
}

fn wall(id: u32, z: f32) -> PlaneAnchor {
    PlaneAnchor {
        id: AnchorId(id),
        transform: Mat4::from_cols(
            Vec3::X.extend(0.0),
            Vec3::Z.extend(0.0),
            Vec3::NEG_Y.extend(0.0),
            Vec3::new(0.0, 1.6, z).extend(1.0),
        ),
        extent: Vec2::new(2.0, 2.0),
    }
}

fn placed_harness() -> Harness {
    let mut h = Harness::new(AssetCatalog::standard());
    h.send(HostEvent::Started);
    h.detect(wall(1, -2.0));
    assert_eq!(h.tap(), TapOutcome::HoopPlaced);
    h
}

#[test]
fn test_readout_scenario() {
    let mut h = Harness::new(AssetCatalog::standard());
    h.send(HostEvent::Started);
    assert_eq!(h.readout(), "0 / 0");

    h.detect(wall(1, -2.0));
    assert_eq!(h.tap(), TapOutcome::HoopPlaced);
    assert_eq!(h.readout(), "0 / 0");

    h.aim_from_above();
    assert_eq!(h.tap(), TapOutcome::BallThrown { ball: 1 });
    assert_eq!(h.readout(), "0 / 1");

    h.run_frames(60);
    assert_eq!(h.readout(), "1 / 1");
    assert_eq!(h.state.ball(1).unwrap().phase, BallPhase::Scored);

    h.aim_from_below();
    assert_eq!(h.tap(), TapOutcome::BallThrown { ball: 2 });
    h.run_frames(180);
    assert_eq!(h.readout(), "1 / 2");
    assert_eq!(h.state.ball(2).unwrap().phase, BallPhase::Unscored);
}

#[test]
fn test_taps_after_placement_never_place_again() {
    let mut h = placed_harness();
    let hoop = h.state.hoop.as_ref().unwrap().body;
    let bodies = h.world.body_count();

    // Lose tracking: the tap is dropped, not turned into a placement
    h.world.set_camera(None);
    assert_eq!(h.tap(), TapOutcome::NoCameraFrame);
    assert_eq!(h.world.body_count(), bodies);

    // Another wall in view still only throws
    h.world
        .set_camera(Some(Mat4::from_translation(Vec3::new(0.0, 1.6, 0.0))));
    h.detect(wall(2, -1.0));
    assert!(matches!(h.tap(), TapOutcome::BallThrown { .. }));
    assert_eq!(h.state.hoop.as_ref().unwrap().body, hoop);
    assert_eq!(h.state.hoop.as_ref().unwrap().anchor, AnchorId(1));
}

#[test]
fn test_surfaces_stop_after_placement() {
    let mut h = Harness::new(AssetCatalog::standard());
    h.send(HostEvent::Started);
    assert_eq!(h.detect(wall(1, -2.0)), EventOutcome::Surface { visualized: true });
    assert_eq!(h.detect(wall(2, -4.0)), EventOutcome::Surface { visualized: true });
    assert_eq!(h.world.surface_visual_count(), 2);

    assert_eq!(h.tap(), TapOutcome::HoopPlaced);
    assert_eq!(h.world.surface_visual_count(), 0);

    assert_eq!(h.detect(wall(3, -3.0)), EventOutcome::Surface { visualized: false });
    assert_eq!(
        h.send(HostEvent::SurfaceUpdated(wall(1, -2.0))),
        EventOutcome::Surface { visualized: false }
    );
    assert_eq!(h.world.surface_visual_count(), 0);
    assert_eq!(h.state.surfaces_visualized, 2);
}

#[test]
fn test_missing_asset_leaves_session_untouched() {
    let mut h = Harness::new(AssetCatalog::empty());
    h.send(HostEvent::Started);
    h.detect(wall(1, -2.0));

    assert_eq!(h.tap(), TapOutcome::PlacementAborted);
    assert!(!h.state.is_hoop_placed());
    assert_eq!(h.world.surface_visual_count(), 1);
    assert_eq!(h.readout(), "0 / 0");
}

#[test]
fn test_balls_accumulate() {
    let mut h = placed_harness();
    h.aim_from_above();
    for _ in 0..5 {
        h.tap();
        h.run_frames(30);
    }
    assert_eq!(h.state.balls.len(), 5);
    assert_eq!(h.state.score.thrown, 5);
    assert!(h.state.score.points <= h.state.score.thrown);
}

#[test]
fn test_statistics_flag_reaches_host() {
    let mut h = Harness::new(AssetCatalog::standard());
    h.settings.show_statistics = false;
    assert_eq!(
        h.send(HostEvent::Started),
        EventOutcome::Lifecycle(SessionPhase::Running)
    );
    let config = h.world.tracking_config().unwrap();
    assert!(config.vertical_planes);
    assert!(!config.show_statistics);
}
