//! Stand-in AR/physics host
//!
//! A small deterministic world that implements `HostEngine`: scripted planes
//! and camera pose, hit-testing, dynamic spheres under gravity, static boxes
//! and compounds, and contact-begin reporting. It lets the demo and the tests
//! run whole sessions without a device.

pub mod assets;
pub mod camera;
pub mod shapes;

pub use assets::AssetCatalog;
pub use shapes::{Contact, sphere_vs_shape};

use std::collections::{BTreeMap, BTreeSet};

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::consts::*;
use crate::sim::{
    BodyDesc, BodyId, BodyKind, CameraFrame, CollisionFilter, ContactPair, HitResult, HoopAsset,
    HostEngine, PlaneAnchor, Shape, SurfaceVisualDesc, TrackingConfig, VisualId,
};
use camera::{DEFAULT_FOV_Y, DEFAULT_VIEWPORT, ray_plane_hit, screen_ray};
use shapes::bounce;

/// A rigid body inside the world
#[derive(Debug, Clone)]
pub struct SimBody {
    pub id: BodyId,
    pub kind: BodyKind,
    pub shape: Shape,
    pub transform: Mat4,
    pub velocity: Vec3,
    pub mass: f32,
    pub filter: CollisionFilter,
    pub parent: Option<BodyId>,
    /// Child node name -> image
    pub textures: BTreeMap<String, String>,
}

impl SimBody {
    fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    fn set_position(&mut self, pos: Vec3) {
        self.transform.w_axis = Vec4::new(pos.x, pos.y, pos.z, 1.0);
    }

    fn sphere_radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Sphere { radius } => Some(radius),
            _ => None,
        }
    }
}

/// Deterministic stand-in for the AR/physics engine
#[derive(Debug)]
pub struct SimWorld {
    assets: AssetCatalog,
    planes: Vec<PlaneAnchor>,
    camera: Option<Mat4>,
    viewport: Vec2,
    fov_y: f32,
    config: Option<TrackingConfig>,
    paused: bool,
    visuals: BTreeMap<VisualId, SurfaceVisualDesc>,
    /// Bodies sorted by id for deterministic iteration
    bodies: Vec<SimBody>,
    /// Pairs overlapping at the end of the last substep
    touching: BTreeSet<(BodyId, BodyId)>,
    substeps: u32,
    accumulator: f32,
    next_id: u32,
}

impl SimWorld {
    pub fn new(assets: AssetCatalog) -> Self {
        Self {
            assets,
            planes: Vec::new(),
            camera: None,
            viewport: DEFAULT_VIEWPORT,
            fov_y: DEFAULT_FOV_Y,
            config: None,
            paused: false,
            visuals: BTreeMap::new(),
            bodies: Vec::new(),
            touching: BTreeSet::new(),
            substeps: 1,
            accumulator: 0.0,
            next_id: 1,
        }
    }

    /// Physics substeps per fixed tick
    pub fn set_substeps(&mut self, substeps: u32) {
        self.substeps = substeps.max(1);
    }

    /// Set (or lose) the tracked camera pose
    pub fn set_camera(&mut self, camera: Option<Mat4>) {
        self.camera = camera;
    }

    /// Register a detected plane so hit-tests can find it
    pub fn add_plane(&mut self, anchor: PlaneAnchor) {
        match self.planes.iter_mut().find(|p| p.id == anchor.id) {
            Some(existing) => *existing = anchor,
            None => self.planes.push(anchor),
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tracking_config(&self) -> Option<&TrackingConfig> {
        self.config.as_ref()
    }

    pub fn surface_visual_count(&self) -> usize {
        self.visuals.len()
    }

    pub fn surface_visual(&self, visual: VisualId) -> Option<&SurfaceVisualDesc> {
        self.visuals.get(&visual)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, id: BodyId) -> Option<&SimBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut SimBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn position_of(&self, id: BodyId) -> Option<Vec3> {
        self.body(id).map(SimBody::position)
    }

    pub fn velocity_of(&self, id: BodyId) -> Option<Vec3> {
        self.body(id).map(|b| b.velocity)
    }

    /// Image applied to a body's backboard child, if any
    pub fn texture_of(&self, id: BodyId) -> Option<&str> {
        self.body(id)?.textures.get(crate::BOARD_NODE).map(String::as_str)
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance by a frame delta using fixed ticks; returns contact-begin events
    pub fn advance(&mut self, frame_dt: f32) -> Vec<ContactPair> {
        let mut contacts = Vec::new();
        if self.paused {
            return contacts;
        }

        self.accumulator += frame_dt.min(0.1);
        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            let dt = SIM_DT / self.substeps as f32;
            for _ in 0..self.substeps {
                self.step(dt, &mut contacts);
            }
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        contacts
    }

    /// One physics substep: integrate, resolve, then report new overlaps
    fn step(&mut self, dt: f32, contacts: &mut Vec<ContactPair>) {
        let gravity = Vec3::new(0.0, -GRAVITY, 0.0);
        for body in self.bodies.iter_mut().filter(|b| b.kind == BodyKind::Dynamic) {
            body.velocity += gravity * dt;
            let pos = body.position() + body.velocity * dt;
            body.set_position(pos);
        }

        self.resolve_collisions();

        let touching = self.overlapping_pairs();
        for pair in touching.difference(&self.touching) {
            contacts.push(ContactPair {
                first: pair.0,
                second: pair.1,
            });
        }
        self.touching = touching;
    }

    fn resolve_collisions(&mut self) {
        let dynamic: Vec<usize> = (0..self.bodies.len())
            .filter(|&i| self.bodies[i].kind == BodyKind::Dynamic)
            .collect();

        for &i in &dynamic {
            let Some(radius) = self.bodies[i].sphere_radius() else {
                continue;
            };

            // Against static geometry
            for j in 0..self.bodies.len() {
                if self.bodies[j].kind != BodyKind::Static
                    || !self.bodies[i].filter.collides_with(&self.bodies[j].filter)
                {
                    continue;
                }
                let hit = sphere_vs_shape(
                    self.bodies[i].position(),
                    radius,
                    &self.bodies[j].shape,
                    &self.bodies[j].transform,
                );
                if let Some(hit) = hit {
                    let ball = &mut self.bodies[i];
                    let pos = ball.position() + hit.normal * hit.penetration;
                    ball.set_position(pos);
                    ball.velocity = bounce(ball.velocity, hit.normal, RESTITUTION);
                }
            }
        }

        // Ball against ball
        for (n, &i) in dynamic.iter().enumerate() {
            for &j in &dynamic[n + 1..] {
                let (Some(ri), Some(rj)) =
                    (self.bodies[i].sphere_radius(), self.bodies[j].sphere_radius())
                else {
                    continue;
                };
                if !self.bodies[i].filter.collides_with(&self.bodies[j].filter) {
                    continue;
                }
                let Some(hit) = shapes::sphere_vs_sphere(
                    self.bodies[i].position(),
                    ri,
                    self.bodies[j].position(),
                    rj,
                ) else {
                    continue;
                };

                let (mi, mj) = (self.bodies[i].mass, self.bodies[j].mass);
                let inv_sum = 1.0 / mi + 1.0 / mj;
                let rel = (self.bodies[i].velocity - self.bodies[j].velocity).dot(hit.normal);
                let impulse = if rel < 0.0 {
                    -(1.0 + RESTITUTION) * rel / inv_sum
                } else {
                    0.0
                };

                let push = hit.normal * hit.penetration / inv_sum;
                let a = &mut self.bodies[i];
                a.set_position(a.position() + push / mi);
                a.velocity += hit.normal * impulse / mi;
                let b = &mut self.bodies[j];
                b.set_position(b.position() - push / mj);
                b.velocity -= hit.normal * impulse / mj;
            }
        }
    }

    /// Every (lower id, higher id) pair that overlaps and wants contact reports
    fn overlapping_pairs(&self) -> BTreeSet<(BodyId, BodyId)> {
        let mut pairs = BTreeSet::new();
        for ball in self.bodies.iter().filter(|b| b.kind == BodyKind::Dynamic) {
            let Some(radius) = ball.sphere_radius() else {
                continue;
            };
            for other in &self.bodies {
                if other.id == ball.id || !ball.filter.reports_contact_with(&other.filter) {
                    continue;
                }
                let overlap = match other.kind {
                    BodyKind::Static => {
                        sphere_vs_shape(ball.position(), radius, &other.shape, &other.transform)
                            .is_some()
                    }
                    BodyKind::Dynamic => other.sphere_radius().is_some_and(|r| {
                        ball.position().distance(other.position()) < radius + r
                    }),
                };
                if overlap {
                    pairs.insert((ball.id.min(other.id), ball.id.max(other.id)));
                }
            }
        }
        pairs
    }
}

impl HostEngine for SimWorld {
    fn run_session(&mut self, config: &TrackingConfig) {
        self.config = Some(*config);
        self.paused = false;
        log::debug!("world tracking running: {:?}", config);
    }

    fn pause_session(&mut self) {
        self.paused = true;
    }

    fn hit_test(&self, screen_point: Vec2) -> Vec<HitResult> {
        let Some(camera) = self.camera else {
            return Vec::new();
        };
        let (origin, dir) = screen_ray(&camera, screen_point, self.viewport, self.fov_y);
        let mut hits: Vec<HitResult> = self
            .planes
            .iter()
            .filter_map(|plane| ray_plane_hit(origin, dir, plane))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn current_frame(&self) -> Option<CameraFrame> {
        self.camera.map(|transform| CameraFrame { transform })
    }

    fn load_hoop_asset(&mut self, asset: &str, root: &str) -> Option<HoopAsset> {
        self.assets.scene(asset, root).cloned()
    }

    fn has_image(&self, name: &str) -> bool {
        self.assets.has_image(name)
    }

    fn set_texture(&mut self, body: BodyId, child: &str, image: &str) {
        if let Some(body) = self.body_mut(body) {
            body.textures.insert(child.to_string(), image.to_string());
        }
    }

    fn add_surface_visual(&mut self, desc: SurfaceVisualDesc) -> VisualId {
        let id = VisualId(self.alloc_id());
        self.visuals.insert(id, desc);
        id
    }

    fn resize_surface_visual(&mut self, visual: VisualId, width: f32, height: f32) {
        if let Some(desc) = self.visuals.get_mut(&visual) {
            desc.width = width;
            desc.height = height;
        }
    }

    fn remove_surface_visual(&mut self, visual: VisualId) {
        self.visuals.remove(&visual);
    }

    fn add_body(&mut self, desc: BodyDesc, parent: Option<BodyId>) -> BodyId {
        let id = BodyId(self.alloc_id());
        let mut textures = BTreeMap::new();
        if let Some(texture) = desc.texture {
            textures.insert(String::new(), texture);
        }
        self.bodies.push(SimBody {
            id,
            kind: desc.kind,
            shape: desc.shape,
            transform: desc.transform,
            velocity: Vec3::ZERO,
            mass: desc.mass.max(f32::EPSILON),
            filter: desc.filter,
            parent,
            textures,
        });
        id
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3) {
        if let Some(body) = self.body_mut(body) {
            if body.kind == BodyKind::Dynamic {
                body.velocity += impulse / body.mass;
            }
        }
    }
}
