//! Asset catalog for the stand-in world
//!
//! Hoop geometry is authored in the hoop's local frame: origin on the wall,
//! +Z out of the backboard, +Y up.

use std::collections::BTreeSet;

use glam::Vec3;

use crate::sim::{AssetBox, HoopAsset, Shape};
use crate::{BOARD_NODE, HOOP_NODE};

/// Backboard half extents (1.8 m x 1.05 m x 5 cm)
pub const BOARD_HALF_EXTENTS: Vec3 = Vec3::new(0.9, 0.525, 0.025);
/// Rim center relative to the hoop origin
pub const RIM_CENTER: Vec3 = Vec3::new(0.0, -0.2, 0.33);
/// Rim ring radius (45 cm inner diameter)
pub const RIM_RADIUS: f32 = 0.23;
/// Thickness of the rim tube
pub const RIM_TUBE_RADIUS: f32 = 0.01;
/// Spheres approximating the rim ring
pub const RIM_SEGMENTS: usize = 24;

/// Sensor slab just above the rim
pub const TOP_SENSOR_OFFSET: Vec3 = Vec3::new(0.0, 0.06, 0.0);
/// Sensor slab under the net
pub const BOTTOM_SENSOR_OFFSET: Vec3 = Vec3::new(0.0, -0.3, 0.0);
pub const SENSOR_HALF_EXTENTS: Vec3 = Vec3::new(0.12, 0.02, 0.12);

/// Named assets the world can "load"
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    /// Scene name -> hoop scene
    scenes: Vec<(String, HoopAsset)>,
    images: BTreeSet<String>,
}

impl AssetCatalog {
    /// No scenes, no images
    pub fn empty() -> Self {
        Self::default()
    }

    /// The regulation hoop plus backboard and ball textures
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        catalog.add_scene("art.scnassets/Hoop.scn", standard_hoop());
        catalog.add_image("art.scnassets/backboard.jpg");
        catalog.add_image("basketball");
        catalog
    }

    pub fn add_scene(&mut self, name: &str, hoop: HoopAsset) {
        self.scenes.retain(|(n, _)| n != name);
        self.scenes.push((name.to_string(), hoop));
    }

    pub fn add_image(&mut self, name: &str) {
        self.images.insert(name.to_string());
    }

    pub fn remove_image(&mut self, name: &str) {
        self.images.remove(name);
    }

    /// Drop a named child from every hoop scene
    pub fn strip_child(&mut self, child: &str) {
        for (_, hoop) in &mut self.scenes {
            hoop.children.retain(|c| c.name != child);
        }
    }

    /// Root node `root` of scene `name`
    pub fn scene(&self, name: &str, root: &str) -> Option<&HoopAsset> {
        self.scenes
            .iter()
            .find(|(n, hoop)| n == name && hoop.name == root)
            .map(|(_, hoop)| hoop)
    }

    pub fn has_image(&self, name: &str) -> bool {
        self.images.contains(name)
    }
}

/// Backboard plus a ring of rim spheres, with the two sensor children
pub fn standard_hoop() -> HoopAsset {
    let board_offset = Vec3::new(0.0, 0.0, BOARD_HALF_EXTENTS.z);

    let mut parts = vec![(
        board_offset,
        Shape::Box {
            half_extents: BOARD_HALF_EXTENTS,
        },
    )];
    for i in 0..RIM_SEGMENTS {
        let theta = i as f32 / RIM_SEGMENTS as f32 * std::f32::consts::TAU;
        let offset = RIM_CENTER + Vec3::new(theta.cos(), 0.0, theta.sin()) * RIM_RADIUS;
        parts.push((
            offset,
            Shape::Sphere {
                radius: RIM_TUBE_RADIUS,
            },
        ));
    }

    HoopAsset {
        name: HOOP_NODE.to_string(),
        collision: Shape::Compound(parts),
        children: vec![
            AssetBox {
                name: BOARD_NODE.to_string(),
                offset: board_offset,
                half_extents: BOARD_HALF_EXTENTS,
            },
            AssetBox {
                name: "top".to_string(),
                offset: RIM_CENTER + TOP_SENSOR_OFFSET,
                half_extents: SENSOR_HALF_EXTENTS,
            },
            AssetBox {
                name: "bottom".to_string(),
                offset: RIM_CENTER + BOTTOM_SENSOR_OFFSET,
                half_extents: SENSOR_HALF_EXTENTS,
            },
        ],
    }
}
