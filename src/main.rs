//! AR Hoops entry point
//!
//! Runs a scripted session against the stand-in world: two walls are
//! detected, the hoop goes on the first, then a volley of balls is thrown
//! from jittered camera poses over and under the rim.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use ar_hoops::consts::SIM_DT;
use ar_hoops::sim::{AnchorId, GameState, HostEvent, PlaneAnchor, handle_event};
use ar_hoops::world::assets::RIM_CENTER;
use ar_hoops::world::{AssetCatalog, SimWorld};
use ar_hoops::{ScoreChannel, ScoreLabel, Settings, platform};
use glam::{Mat4, Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Frame time of the scripted host
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames to let each ball fly before the next throw
const FRAMES_PER_THROW: u32 = 90;
/// Balls in the scripted volley
const VOLLEY: u32 = 12;

/// Demo session: state, host and score label
struct Game {
    state: GameState,
    world: SimWorld,
    settings: Settings,
    channel: ScoreChannel,
    label: ScoreLabel,
    rng: Pcg32,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Self {
        let mut world = SimWorld::new(AssetCatalog::standard());
        world.set_substeps(settings.quality.substeps());
        let (channel, label) = ScoreChannel::new();
        Self {
            state: GameState::new(),
            world,
            settings,
            channel,
            label,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn send(&mut self, event: HostEvent) {
        handle_event(
            &mut self.state,
            &mut self.world,
            &self.channel,
            &self.settings,
            &event,
        );
    }

    /// Run physics frames, forwarding contact callbacks; UI refreshes per frame
    fn run_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            for pair in self.world.advance(FRAME_DT) {
                self.send(HostEvent::ContactBegan(pair));
            }
            for event in self.state.drain_events() {
                log::debug!("{:?}", event);
            }
            if self.label.refresh() {
                log::info!("score: {}", self.label.text());
            }
        }
    }

    fn detect_wall(&mut self, id: u32, origin: Vec3, normal: Vec3, extent: Vec2) {
        // X along the wall, Y out of it, Z pointing down
        let x = Vec3::Y.cross(normal).normalize();
        let anchor = PlaneAnchor {
            id: AnchorId(id),
            transform: Mat4::from_cols(
                x.extend(0.0),
                normal.extend(0.0),
                Vec3::NEG_Y.extend(0.0),
                origin.extend(1.0),
            ),
            extent,
        };
        self.world.add_plane(anchor.clone());
        self.send(HostEvent::SurfaceAdded(anchor));
    }

    /// Camera pose looking straight down (above) or straight up (below) the rim
    fn camera_at_rim(&mut self, above: bool) -> Option<Mat4> {
        let rim = self
            .state
            .hoop
            .as_ref()?
            .transform
            .transform_point3(RIM_CENTER);
        let jitter = Vec3::new(
            self.rng.random_range(-0.15..0.15),
            0.0,
            self.rng.random_range(-0.15..0.15),
        );
        let (height, y_axis, z_axis) = if above {
            (1.0, Vec3::NEG_Z, Vec3::Y)
        } else {
            (-1.2, Vec3::Z, Vec3::NEG_Y)
        };
        Some(Mat4::from_cols(
            Vec3::X.extend(0.0),
            y_axis.extend(0.0),
            z_axis.extend(0.0),
            (rim + jitter + Vec3::Y * height).extend(1.0),
        ))
    }

    fn run(&mut self) {
        log::info!("AR Hoops starting (sim dt {:.4}s)", SIM_DT);
        self.send(HostEvent::Started);
        self.world
            .set_camera(Some(Mat4::from_translation(Vec3::new(0.0, 1.6, 0.0))));

        self.detect_wall(1, Vec3::new(0.0, 1.6, -2.5), Vec3::Z, Vec2::new(2.5, 2.0));
        self.detect_wall(2, Vec3::new(-3.0, 1.4, -1.0), Vec3::X, Vec2::new(1.5, 1.5));
        self.run_frames(1);

        let center = self.world.viewport() / 2.0;
        self.send(HostEvent::Tap(center));
        if !self.state.is_hoop_placed() {
            log::warn!("hoop placement failed, nothing to throw at");
            return;
        }

        for throw in 0..VOLLEY {
            // Every fourth ball comes up from under the rim
            let above = throw % 4 != 3;
            let camera = self.camera_at_rim(above);
            self.world.set_camera(camera);
            self.send(HostEvent::Tap(center));
            self.run_frames(FRAMES_PER_THROW);
        }

        self.send(HostEvent::Paused);
        self.label.refresh();
        log::info!(
            "session over: {} ({} walls seen, {} balls in play)",
            self.label.text(),
            self.state.surfaces_visualized,
            self.state.balls.len()
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    platform::init_logging();
    let mut game = Game::new(Settings::load(), 2019);
    game.run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    platform::init_logging();

    // Usage: ar-hoops [settings.json] [seed]
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_from(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2019);

    let mut game = Game::new(settings, seed);
    game.run();
    println!("{}", game.label.text());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
