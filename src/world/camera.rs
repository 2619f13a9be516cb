//! Pinhole camera and plane hit-testing

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::sim::{HitResult, PlaneAnchor};

/// Default vertical field of view (radians)
pub const DEFAULT_FOV_Y: f32 = 60.0 * std::f32::consts::PI / 180.0;
/// Default viewport: a portrait phone screen, in points
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(390.0, 844.0);

/// World-space ray through a screen point (origin, unit direction)
///
/// Screen coordinates have their origin at the top-left corner, Y down.
pub fn screen_ray(camera: &Mat4, point: Vec2, viewport: Vec2, fov_y: f32) -> (Vec3, Vec3) {
    let ndc = Vec2::new(
        2.0 * point.x / viewport.x - 1.0,
        1.0 - 2.0 * point.y / viewport.y,
    );
    let half_height = (fov_y / 2.0).tan();
    let aspect = viewport.x / viewport.y;
    let dir_cam = Vec3::new(ndc.x * half_height * aspect, ndc.y * half_height, -1.0);
    let dir = camera.transform_vector3(dir_cam).normalize_or_zero();
    (camera.w_axis.truncate(), dir)
}

/// Intersect a ray with a detected plane, inside its extent only
pub fn ray_plane_hit(origin: Vec3, dir: Vec3, anchor: &PlaneAnchor) -> Option<HitResult> {
    let normal = anchor.transform.y_axis.truncate().normalize_or_zero();
    let plane_point = anchor.transform.w_axis.truncate();

    let denom = dir.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (plane_point - origin).dot(normal) / denom;
    if t <= 0.0 {
        return None;
    }

    let point = origin + dir * t;
    let local = anchor.transform.inverse().transform_point3(point);
    if local.x.abs() > anchor.extent.x / 2.0 || local.z.abs() > anchor.extent.y / 2.0 {
        return None;
    }

    let mut world_transform = anchor.transform;
    world_transform.w_axis = Vec4::new(point.x, point.y, point.z, 1.0);
    Some(HitResult {
        anchor: anchor.id,
        world_transform,
        distance: t,
    })
}
