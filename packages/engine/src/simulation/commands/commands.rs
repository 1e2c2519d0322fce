use crate::core::error::SceneResult;
use crate::domain::models::TowerModel;
use crate::domain::tower::TowerLayout;
use crate::rigid_body::{Material, RigidBody, Vec2};

use super::{normalize_viewport, SceneCore};

/// Remove the old tower and insert one block per placement.
pub(super) fn build_tower(scene: &mut SceneCore) -> usize {
    if scene.disposed {
        return 0;
    }
    let removed = scene.bodies.remove_bodies(&scene.tower_ids);
    scene.tower_ids.clear();
    scene.tower_levels.clear();
    scene.mouse.forget_missing(&scene.bodies);

    scene.layout = TowerLayout::new(scene.width, scene.height, &scene.settings.tower);
    let placements = scene.layout.placements();

    let block = &scene.settings.block;
    let material = Material {
        friction: block.friction,
        friction_air: block.friction_air,
        restitution: block.restitution,
    };

    scene.tower_ids.reserve(placements.len());
    for p in &placements {
        let size = p.size as f32;
        let body = RigidBody::new_rect(p.x as f32, p.y as f32, size, size, block.density, material)
            .with_chamfer(block.chamfer);
        let id = scene.bodies.add_body(body);
        scene.tower_ids.push(id);
        scene.tower_levels.insert(id, p.color_seed);
    }

    log::debug!(
        "rebuilt tower: removed {}, added {} blocks over {} levels",
        removed,
        placements.len(),
        scene.layout.total_levels
    );
    placements.len()
}

/// Floor and side walls, sized to the current viewport. Invisible.
pub(super) fn rebuild_boundaries(scene: &mut SceneCore) {
    if scene.disposed {
        return;
    }
    scene.bodies.remove_bodies(&scene.boundary_ids);
    scene.boundary_ids.clear();

    let w = scene.width as f32;
    let h = scene.height as f32;
    let t = scene.settings.boundary.thickness;
    let floor_material = Material {
        friction: scene.settings.boundary.floor_friction,
        ..Material::default()
    };
    let wall_material = Material {
        friction: scene.settings.boundary.wall_friction,
        ..Material::default()
    };

    let floor = RigidBody::new_static_rect(w / 2.0, h, w * 1.4, t, floor_material).hidden();
    let left = RigidBody::new_static_rect(-t / 2.0, h / 2.0, t, h * 1.2, wall_material).hidden();
    let right = RigidBody::new_static_rect(w + t / 2.0, h / 2.0, t, h * 1.2, wall_material).hidden();

    for body in [floor, left, right] {
        let id = scene.bodies.add_body(body);
        scene.boundary_ids.push(id);
    }
}

pub(super) fn reset(scene: &mut SceneCore) {
    scene.gravity_y = 1.0;
    build_tower(scene);
}

pub(super) fn resize(scene: &mut SceneCore, width: f64, height: f64) -> SceneResult<()> {
    let (width, height) = normalize_viewport(width, height, scene.settings.min_height)?;
    scene.width = width;
    scene.height = height;

    rebuild_boundaries(scene);
    let blocks = build_tower(scene);
    log::info!("resized to {}x{}: {} blocks", width, height, blocks);
    Ok(())
}

pub(super) fn select_model(scene: &mut SceneCore, key: &str, now_ms: f64) -> SceneResult<()> {
    let model = TowerModel::from_key(key).map_err(|e| {
        log::warn!("{e}");
        e
    })?;
    scene.model = model;
    if scene.disposed {
        return Ok(());
    }
    scene.shimmer.celebrate(now_ms);
    log::debug!("model {} selected, shimmering", model.key());
    Ok(())
}

pub(super) fn toggle_shimmer(scene: &mut SceneCore, now_ms: f64) -> bool {
    if scene.disposed {
        return false;
    }
    let on = scene.shimmer.toggle(now_ms);
    log::debug!("shimmer toggled {}", if on { "on" } else { "off" });
    on
}

pub(super) fn pointer_down(scene: &mut SceneCore, x: f32, y: f32) -> Option<u32> {
    if scene.disposed {
        return None;
    }
    scene.mouse.pointer_down(&scene.bodies, Vec2::new(x, y))
}

pub(super) fn pointer_move(scene: &mut SceneCore, x: f32, y: f32) {
    scene.mouse.pointer_move(Vec2::new(x, y));
}

pub(super) fn pointer_up(scene: &mut SceneCore) {
    scene.mouse.pointer_up();
}

pub(super) fn dispose(scene: &mut SceneCore) {
    scene.shimmer.cancel();
    scene.mouse.pointer_up();
    scene.bodies.clear();
    scene.tower_ids.clear();
    scene.tower_levels.clear();
    scene.boundary_ids.clear();
    scene.render.transforms.clear();
    scene.render.colors.clear();
    scene.render.body_ids.clear();
    scene.disposed = true;
    log::info!("tower scene disposed");
}
