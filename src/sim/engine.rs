//! Host AR/physics engine interface
//!
//! World tracking, plane detection, asset loading, rigid-body simulation and
//! rendering all live on the other side of this trait. The session controller
//! only issues requests and reacts to callbacks.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::body::{BodyDesc, BodyId, SensorKind, Shape, VisualId};

/// Host-assigned identifier of a detected plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId(pub u32);

/// A detected vertical plane as reported by world tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    /// Anchor pose; local Y is the plane normal
    pub transform: Mat4,
    /// Detected size along local X (width) and local Z (height)
    pub extent: Vec2,
}

/// Result of projecting a screen point onto detected planes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitResult {
    pub anchor: AnchorId,
    /// Hit pose: anchor orientation at the intersection point
    pub world_transform: Mat4,
    pub distance: f32,
}

/// Snapshot of the tracked camera for the current frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraFrame {
    pub transform: Mat4,
}

/// World tracking configuration passed when the session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub vertical_planes: bool,
    pub horizontal_planes: bool,
    /// Show the host's fps/timing overlay
    pub show_statistics: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            vertical_planes: true,
            horizontal_planes: false,
            show_statistics: true,
        }
    }
}

/// Semi-transparent rectangle laid on a detected plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceVisualDesc {
    /// Node the rectangle is attached under
    pub anchor: AnchorId,
    /// Pose relative to the anchor
    pub local_transform: Mat4,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
    pub opacity: f32,
    pub tag: String,
}

/// Named box child of the hoop asset (sensor volume or backboard)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetBox {
    pub name: String,
    /// Center relative to the hoop root
    pub offset: Vec3,
    pub half_extents: Vec3,
}

/// Loaded hoop scene: root node plus the children placement needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoopAsset {
    pub name: String,
    /// Collision hull derived from the visual mesh (concave, hence compound)
    pub collision: Shape,
    /// Named children of the root node
    pub children: Vec<AssetBox>,
}

impl HoopAsset {
    /// Look up a direct child by name
    pub fn child(&self, name: &str) -> Option<&AssetBox> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Look up the sensor volume for `kind`
    pub fn sensor(&self, kind: SensorKind) -> Option<&AssetBox> {
        self.child(kind.node_name())
    }
}

/// A contact-begin callback: two bodies started overlapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPair {
    pub first: BodyId,
    pub second: BodyId,
}

/// Requests the session controller makes of the AR/physics host
pub trait HostEngine {
    /// Start (or resume) world tracking
    fn run_session(&mut self, config: &TrackingConfig);

    /// Pause world tracking and physics
    fn pause_session(&mut self);

    /// Hit-test a screen point against existing planes, within their extent.
    /// Results are sorted nearest first.
    fn hit_test(&self, screen_point: Vec2) -> Vec<HitResult>;

    /// Camera of the current frame, if tracking has produced one
    fn current_frame(&self) -> Option<CameraFrame>;

    /// Load a hoop scene by asset name and return its root named `root`
    fn load_hoop_asset(&mut self, asset: &str, root: &str) -> Option<HoopAsset>;

    /// True if an image asset with this name exists
    fn has_image(&self, name: &str) -> bool;

    /// Apply an image as the diffuse texture of a body's child node
    fn set_texture(&mut self, body: BodyId, child: &str, image: &str);

    fn add_surface_visual(&mut self, desc: SurfaceVisualDesc) -> VisualId;

    fn resize_surface_visual(&mut self, visual: VisualId, width: f32, height: f32);

    fn remove_surface_visual(&mut self, visual: VisualId);

    /// Create a rigid body; `parent` attaches it as a child node
    fn add_body(&mut self, desc: BodyDesc, parent: Option<BodyId>) -> BodyId;

    /// Apply a one-shot impulse at the body's center
    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3);
}
