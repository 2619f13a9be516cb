//! Rigid-body descriptions handed to the host engine
//!
//! Bodies carry a `BodyRole` assigned when they are created, so contact
//! callbacks can classify participants without looking at node names.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Identifier the host engine hands back for a created body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

/// Identifier the host engine hands back for a visual-only node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualId(pub u32);

/// Collision category bits
pub mod category {
    /// Dynamic basketballs
    pub const BALL: u32 = 1 << 0;
    /// The static hoop (rim + backboard)
    pub const HOOP: u32 = 1 << 1;
    /// Sensor-only rim volumes
    pub const SENSOR: u32 = 1 << 2;
    pub const NONE: u32 = 0;
    pub const ALL: u32 = u32::MAX;
}

/// Which body pairs resolve physically and which only report overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilter {
    /// Category bits of this body
    pub category: u32,
    /// Categories this body physically collides with
    pub collision_mask: u32,
    /// Categories whose overlaps are reported as contact events
    pub contact_test_mask: u32,
}

impl CollisionFilter {
    /// Balls bounce off the hoop and each other, and report sensor overlaps
    pub const BALL: Self = Self {
        category: category::BALL,
        collision_mask: category::BALL | category::HOOP,
        contact_test_mask: category::SENSOR,
    };

    /// The hoop obstructs balls and reports nothing
    pub const HOOP: Self = Self {
        category: category::HOOP,
        collision_mask: category::BALL,
        contact_test_mask: category::NONE,
    };

    /// Sensors never obstruct, they only report balls
    pub const SENSOR: Self = Self {
        category: category::SENSOR,
        collision_mask: category::NONE,
        contact_test_mask: category::BALL,
    };

    /// True if `self` and `other` should be pushed apart
    pub fn collides_with(&self, other: &CollisionFilter) -> bool {
        self.category & other.collision_mask != 0 && other.category & self.collision_mask != 0
    }

    /// True if an overlap between `self` and `other` should be reported
    pub fn reports_contact_with(&self, other: &CollisionFilter) -> bool {
        self.contact_test_mask & other.category != 0 || other.contact_test_mask & self.category != 0
    }
}

/// Static bodies never move; dynamic bodies are integrated by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Static,
    Dynamic,
}

/// Collision shape in the body's local frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Oriented box given by half extents
    Box { half_extents: Vec3 },
    /// Several shapes at local offsets, standing in for a concave mesh
    Compound(Vec<(Vec3, Shape)>),
}

/// Which sensor a contact volume is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    Top,
    Bottom,
}

impl SensorKind {
    /// Name of the matching child node in the hoop asset
    pub fn node_name(&self) -> &'static str {
        match self {
            SensorKind::Top => "top",
            SensorKind::Bottom => "bottom",
        }
    }
}

/// Role of a body in contact events, fixed at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRole {
    Hoop,
    Sensor(SensorKind),
    /// Ball with its session-local id
    Ball(u32),
}

/// Everything the host needs to create a rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub shape: Shape,
    /// World transform at creation
    pub transform: Mat4,
    pub filter: CollisionFilter,
    /// Mass for dynamic bodies (ignored for static ones)
    pub mass: f32,
    pub role: BodyRole,
    /// Diffuse texture name, if any
    pub texture: Option<String>,
}
