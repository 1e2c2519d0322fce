use std::collections::HashMap;

use crate::core::error::SceneResult;
use crate::domain::models::TowerModel;
use crate::domain::settings::SceneSettings;
use crate::domain::tower::TowerLayout;
use crate::mouse_constraint::MouseConstraint;
use crate::rigid_body_system::RigidBodySystem;
use crate::shimmer::ShimmerTimer;

use super::commands;
use super::perf_stats::PerfStats;
use super::random;
use super::{normalize_viewport, RenderBuffers, SceneCore};

pub(super) fn create_scene_core(width: f64, height: f64, settings: SceneSettings) -> SceneResult<SceneCore> {
    let (width, height) = normalize_viewport(width, height, settings.min_height)?;

    let mut scene = SceneCore {
        layout: TowerLayout::new(width, height, &settings.tower),
        width,
        height,
        bodies: RigidBodySystem::with_iterations(settings.solver_iterations),
        tower_ids: Vec::new(),
        tower_levels: HashMap::new(),
        boundary_ids: Vec::new(),
        mouse: MouseConstraint::new(settings.drag.stiffness, settings.drag.damping),
        shimmer: ShimmerTimer::new(&settings.shimmer),
        model: TowerModel::default(),
        gravity_x: settings.gravity_x,
        gravity_y: settings.gravity_y,
        frame: 0,
        rng_state: random::seed(settings.seed),
        last_tick_ms: None,
        accumulator_ms: 0.0,
        disposed: false,
        render: RenderBuffers {
            transforms: Vec::new(),
            colors: Vec::new(),
            body_ids: Vec::new(),
        },
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        settings,
    };

    commands::rebuild_boundaries(&mut scene);
    commands::build_tower(&mut scene);

    log::info!(
        "tower scene {}x{}: {} levels, {} blocks",
        scene.width,
        scene.height,
        scene.layout.total_levels,
        scene.tower_ids.len()
    );

    Ok(scene)
}
