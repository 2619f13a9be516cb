//! Wall visualization and hoop placement

use glam::{Mat4, Vec3};

use super::body::{BodyDesc, BodyId, BodyKind, BodyRole, CollisionFilter, SensorKind, Shape};
use super::engine::{HitResult, HostEngine, PlaneAnchor, SurfaceVisualDesc};
use super::state::{GameEvent, GameState, Hoop, SurfaceVisual};
use crate::settings::Settings;
use crate::{BOARD_NODE, HOOP_NODE, WALL_TAG, hoop_pose_from_hit, surface_visual_pose};

/// Draw (or resize) the wall rectangle for a detected surface
///
/// Returns true if a new rectangle was added. Does nothing once the hoop is placed.
pub fn visualize_surface<E: HostEngine>(
    state: &mut GameState,
    engine: &mut E,
    settings: &Settings,
    anchor: &PlaneAnchor,
) -> bool {
    if state.is_hoop_placed() {
        log::trace!("hoop placed, not visualizing surface {:?}", anchor.id);
        return false;
    }

    if let Some(existing) = state.surfaces.iter_mut().find(|s| s.anchor == anchor.id) {
        if existing.extent != anchor.extent {
            engine.resize_surface_visual(existing.visual, anchor.extent.x, anchor.extent.y);
            existing.extent = anchor.extent;
        }
        return false;
    }

    let visual = engine.add_surface_visual(SurfaceVisualDesc {
        anchor: anchor.id,
        local_transform: surface_visual_pose(&Mat4::IDENTITY),
        width: anchor.extent.x,
        height: anchor.extent.y,
        color: settings.surface_color,
        opacity: settings.surface_opacity,
        tag: WALL_TAG.to_string(),
    });

    state.surfaces.push(SurfaceVisual {
        anchor: anchor.id,
        visual,
        extent: anchor.extent,
    });
    state.surfaces_visualized += 1;
    state.events.push(GameEvent::SurfaceVisualized { anchor: anchor.id });
    log::debug!(
        "visualized surface {:?} ({:.2} x {:.2})",
        anchor.id,
        anchor.extent.x,
        anchor.extent.y
    );
    true
}

/// Place the hoop at a hit-test result
///
/// Aborts without touching state if the asset or its sensor children are
/// missing. A missing backboard or backboard image only skips the texture.
pub fn place_hoop<E: HostEngine>(
    state: &mut GameState,
    engine: &mut E,
    settings: &Settings,
    hit: &HitResult,
) -> Option<BodyId> {
    if state.is_hoop_placed() {
        return None;
    }

    let Some(asset) = engine.load_hoop_asset(&settings.hoop_asset, HOOP_NODE) else {
        log::debug!("hoop asset {} unavailable", settings.hoop_asset);
        return None;
    };
    let (Some(top), Some(bottom)) = (
        asset.sensor(SensorKind::Top).cloned(),
        asset.sensor(SensorKind::Bottom).cloned(),
    ) else {
        log::debug!("hoop asset {} has no sensor children", asset.name);
        return None;
    };

    let transform = hoop_pose_from_hit(&hit.world_transform);
    let hoop_body = engine.add_body(
        BodyDesc {
            kind: BodyKind::Static,
            shape: asset.collision.clone(),
            transform,
            filter: CollisionFilter::HOOP,
            mass: 0.0,
            role: BodyRole::Hoop,
            texture: None,
        },
        None,
    );
    state.register_body(hoop_body, BodyRole::Hoop);

    if asset.child(BOARD_NODE).is_none() {
        log::debug!("hoop has no {} node, skipping texture", BOARD_NODE);
    } else if !engine.has_image(&settings.backboard_texture) {
        log::debug!("backboard image {} missing", settings.backboard_texture);
    } else {
        engine.set_texture(hoop_body, BOARD_NODE, &settings.backboard_texture);
    }

    // Every wall goes, not just the one that was tapped
    let mut cleared = 0;
    for surface in state.surfaces.drain(..) {
        engine.remove_surface_visual(surface.visual);
        cleared += 1;
    }
    state.events.push(GameEvent::WallsCleared { count: cleared });

    let mut sensor_body = |kind: SensorKind, offset: Vec3, half_extents: Vec3| {
        let body = engine.add_body(
            BodyDesc {
                kind: BodyKind::Static,
                shape: Shape::Box { half_extents },
                transform: transform * Mat4::from_translation(offset),
                filter: CollisionFilter::SENSOR,
                mass: 0.0,
                role: BodyRole::Sensor(kind),
                texture: None,
            },
            Some(hoop_body),
        );
        state.register_body(body, BodyRole::Sensor(kind));
        body
    };
    let top_sensor = sensor_body(SensorKind::Top, top.offset, top.half_extents);
    let bottom_sensor = sensor_body(SensorKind::Bottom, bottom.offset, bottom.half_extents);

    state.hoop = Some(Hoop {
        body: hoop_body,
        transform,
        top_sensor,
        bottom_sensor,
        anchor: hit.anchor,
    });
    state.events.push(GameEvent::HoopPlaced { anchor: hit.anchor });
    log::info!(
        "hoop placed on surface {:?}, cleared {} wall(s)",
        hit.anchor,
        cleared
    );

    Some(hoop_body)
}
