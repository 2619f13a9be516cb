//! Sphere-vs-shape overlap tests for the stand-in world
//!
//! Balls are the only moving bodies, so every query is a sphere against a
//! posed shape (box, sphere, or compound of those).

use glam::{Mat4, Vec3};

use crate::sim::Shape;

/// Result of an overlap check
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Surface normal pointing from the shape toward the sphere center
    pub normal: Vec3,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

/// Sphere against any shape posed at `transform`; returns the deepest contact
pub fn sphere_vs_shape(center: Vec3, radius: f32, shape: &Shape, transform: &Mat4) -> Option<Contact> {
    match shape {
        Shape::Sphere { radius: r } => {
            sphere_vs_sphere(center, radius, transform.w_axis.truncate(), *r)
        }
        Shape::Box { half_extents } => sphere_vs_box(center, radius, *half_extents, transform),
        Shape::Compound(parts) => parts
            .iter()
            .filter_map(|(offset, part)| {
                let part_transform = *transform * Mat4::from_translation(*offset);
                sphere_vs_shape(center, radius, part, &part_transform)
            })
            .max_by(|a, b| a.penetration.total_cmp(&b.penetration)),
    }
}

/// Sphere against sphere
pub fn sphere_vs_sphere(center: Vec3, radius: f32, other: Vec3, other_radius: f32) -> Option<Contact> {
    let delta = center - other;
    let dist = delta.length();
    let reach = radius + other_radius;
    if dist >= reach {
        return None;
    }
    // Coincident centers: push straight up
    let normal = if dist > 1e-6 { delta / dist } else { Vec3::Y };
    Some(Contact {
        normal,
        penetration: reach - dist,
    })
}

/// Sphere against an oriented box (rigid `transform`, no scale)
pub fn sphere_vs_box(center: Vec3, radius: f32, half_extents: Vec3, transform: &Mat4) -> Option<Contact> {
    let local = transform.inverse().transform_point3(center);
    let closest = local.clamp(-half_extents, half_extents);
    let delta = local - closest;
    let dist = delta.length();

    if dist > 1e-6 {
        if dist >= radius {
            return None;
        }
        return Some(Contact {
            normal: transform.transform_vector3(delta / dist).normalize_or_zero(),
            penetration: radius - dist,
        });
    }

    // Center inside the box: leave through the nearest face
    let depth = half_extents - local.abs();
    let (axis, face_depth) = if depth.x <= depth.y && depth.x <= depth.z {
        (Vec3::X * local.x.signum(), depth.x)
    } else if depth.y <= depth.z {
        (Vec3::Y * local.y.signum(), depth.y)
    } else {
        (Vec3::Z * local.z.signum(), depth.z)
    };
    Some(Contact {
        normal: transform.transform_vector3(axis).normalize_or_zero(),
        penetration: face_depth + radius,
    })
}

/// Reflect velocity off a surface with restitution, only if moving into it
#[inline]
pub fn bounce(velocity: Vec3, normal: Vec3, restitution: f32) -> Vec3 {
    let vn = velocity.dot(normal);
    if vn >= 0.0 {
        return velocity;
    }
    velocity - (1.0 + restitution) * vn * normal
}
