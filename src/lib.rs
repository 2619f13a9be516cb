//! AR Hoops - an augmented-reality basketball mini-game
//!
//! Core modules:
//! - `sim`: Game session controller (surface visualization, hoop placement,
//!   ball spawning, contact scoring) written against the `HostEngine` trait
//! - `world`: Deterministic stand-in host engine for the demo and tests
//! - `display`: Score readout and its hand-off to the UI context
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Data-driven game tuning

pub mod display;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod world;

pub use display::{ScoreChannel, ScoreDisplay, ScoreLabel, ScoreReadout};
pub use settings::{SessionQuality, Settings};

use glam::{Mat4, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep of the stand-in world (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Regulation basketball radius in meters
    pub const BALL_RADIUS: f32 = 0.1213;
    /// Impulse magnitude applied along the camera's backward axis
    pub const THROW_POWER: f32 = 10.0;
    /// Default rigid-body mass (kg)
    pub const BALL_MASS: f32 = 1.0;

    /// Opacity of the wall visualization
    pub const SURFACE_OPACITY: f32 = 0.1;

    /// Gravity (m/s², world -Y)
    pub const GRAVITY: f32 = 9.8;
    /// Bounce factor for ball vs hoop contacts
    pub const RESTITUTION: f32 = 0.6;
}

/// Tag given to surface visualizations; every node carrying it is removed on placement
pub const WALL_TAG: &str = "Wall";
/// Name of the hoop root node inside the hoop asset
pub const HOOP_NODE: &str = "Hoop";
/// Name of the backboard child node inside the hoop asset
pub const BOARD_NODE: &str = "board";

/// World-space position of a transform
#[inline]
pub fn translation_of(transform: &Mat4) -> Vec3 {
    transform.w_axis.truncate()
}

/// Camera forward axis (third column); cameras look down their -Z
#[inline]
pub fn forward_of(transform: &Mat4) -> Vec3 {
    transform.z_axis.truncate()
}

/// Orient a hoop at a hit-test transform
///
/// The hit pose lies on the wall with its Y axis along the wall normal; the
/// hoop asset is authored with its backboard facing +Z, so it is tipped -90°
/// about its local X axis to face outward.
#[inline]
pub fn hoop_pose_from_hit(hit: &Mat4) -> Mat4 {
    *hit * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}

/// Pose of a wall rectangle relative to its surface anchor (lies flat on the plane)
#[inline]
pub fn surface_visual_pose(anchor: &Mat4) -> Mat4 {
    *anchor * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
}
