//! Scene - the tower, its boundaries and the effects around them
//!
//! `SceneCore` only orchestrates; the work lives in:
//! - domain::tower for where blocks go
//! - rigid_body_system for how they move
//! - mouse_constraint / shimmer for the interaction and the effect
//!
//! The host drives it with `tick(now_ms)` once per animation frame and
//! forwards resize, reset, pointer and model-picker events.

use std::collections::HashMap;

use crate::core::error::{SceneError, SceneResult};
use crate::domain::models::TowerModel;
use crate::domain::settings::SceneSettings;
use crate::domain::tower::{PlacementDescriptor, TowerLayout};
use crate::mouse_constraint::MouseConstraint;
use crate::rigid_body_system::RigidBodySystem;
use crate::shimmer::ShimmerTimer;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/random.rs"]
mod random;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::TowerScene;
pub use perf_stats::PerfStats;
pub use render_extract::TRANSFORM_STRIDE;

use perf_timer::PerfTimer;

/// Buffers handed to the JS renderer (one entry per visible body)
pub(crate) struct RenderBuffers {
    /// x, y, width, height, angle, chamfer
    transforms: Vec<f32>,
    /// Packed RGBA, see `Hsla::to_rgba_u32`
    colors: Vec<u32>,
    body_ids: Vec<u32>,
}

/// The scene
pub struct SceneCore {
    settings: SceneSettings,
    width: f64,
    height: f64,
    layout: TowerLayout,

    bodies: RigidBodySystem,
    /// Tower body IDs in placement order
    tower_ids: Vec<u32>,
    /// Body ID -> tower level, kept off the bodies themselves
    tower_levels: HashMap<u32, u32>,
    boundary_ids: Vec<u32>,

    mouse: MouseConstraint,
    shimmer: ShimmerTimer,
    model: TowerModel,

    // Settings
    gravity_x: f32,
    gravity_y: f32,

    // State
    frame: u64,
    rng_state: u32,
    last_tick_ms: Option<f64>,
    accumulator_ms: f64,
    disposed: bool,

    render: RenderBuffers,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SceneCore {
    /// Create a scene with default settings and build the tower.
    pub fn new(width: f64, height: f64) -> SceneResult<Self> {
        Self::with_settings(width, height, SceneSettings::default())
    }

    pub fn with_settings(width: f64, height: f64, settings: SceneSettings) -> SceneResult<Self> {
        init::create_scene_core(width, height, settings)
    }

    pub fn width(&self) -> f64 { self.width }

    pub fn height(&self) -> f64 { self.height }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn settings(&self) -> &SceneSettings { &self.settings }

    pub fn layout(&self) -> &TowerLayout { &self.layout }

    pub fn total_levels(&self) -> u32 { self.layout.total_levels }

    pub fn model(&self) -> TowerModel { self.model }

    pub fn bodies(&self) -> &RigidBodySystem { &self.bodies }

    pub fn body_count(&self) -> usize { self.bodies.body_count() }

    pub fn tower_body_count(&self) -> usize { self.tower_ids.len() }

    pub fn tower_body_ids(&self) -> &[u32] { &self.tower_ids }

    pub fn boundary_body_ids(&self) -> &[u32] { &self.boundary_ids }

    /// Level of a tower block, `None` for boundaries and unknown IDs.
    pub fn tower_level(&self, body_id: u32) -> Option<u32> {
        self.tower_levels.get(&body_id).copied()
    }

    /// Placements for the current viewport.
    pub fn placements(&self) -> Vec<PlacementDescriptor> {
        self.layout.placements()
    }

    pub fn is_shimmering(&self) -> bool { self.shimmer.is_shimmering() }

    pub fn is_disposed(&self) -> bool { self.disposed }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) {
        settings::set_gravity(self, x, y);
    }

    pub fn gravity(&self) -> (f32, f32) {
        settings::get_gravity(self)
    }

    // === TOWER ===

    /// Throw away the current tower and lay out a fresh one for the current
    /// viewport. Returns the number of blocks.
    pub fn build_tower(&mut self) -> usize {
        commands::build_tower(self)
    }

    /// Restore default gravity and rebuild the tower.
    pub fn reset(&mut self) {
        commands::reset(self)
    }

    /// Adopt a new container size: boundaries and tower are rebuilt.
    pub fn resize(&mut self, width: f64, height: f64) -> SceneResult<()> {
        commands::resize(self, width, height)
    }

    // === EFFECTS ===

    /// Switch model and start the celebration shimmer.
    pub fn select_model(&mut self, key: &str, now_ms: f64) -> SceneResult<()> {
        commands::select_model(self, key, now_ms)
    }

    /// Manual shimmer toggle. Returns the new shimmering flag.
    pub fn toggle_shimmer(&mut self, now_ms: f64) -> bool {
        commands::toggle_shimmer(self, now_ms)
    }

    // === POINTER ===

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<u32> {
        commands::pointer_down(self, x, y)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        commands::pointer_move(self, x, y)
    }

    pub fn pointer_up(&mut self) {
        commands::pointer_up(self)
    }

    pub fn grabbed_body(&self) -> Option<u32> {
        self.mouse.grabbed_body()
    }

    // === STEPPING ===

    /// Advance to host time `now_ms`: fire due shimmer pulses, then run as
    /// many fixed physics steps as the elapsed time calls for. Returns the
    /// number of steps taken.
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        step::tick(self, now_ms)
    }

    /// Run exactly one fixed physics step.
    pub fn step(&mut self) {
        step::step(self);
    }

    // === RENDERING ===

    /// Refresh the render buffers. Returns the number of visible bodies.
    pub fn extract_render(&mut self) -> usize {
        render_extract::extract_render(self)
    }

    pub fn render_transforms(&self) -> &[f32] {
        &self.render.transforms
    }

    pub fn render_colors(&self) -> &[u32] {
        &self.render.colors
    }

    /// CSS fill style of the `index`-th extracted body.
    pub fn body_fill_style(&self, index: usize) -> Option<String> {
        render_extract::body_fill_style(self, index)
    }

    // === LIFECYCLE ===

    /// Stop effects, release the drag and drop every body. Later ticks do
    /// nothing.
    pub fn dispose(&mut self) {
        commands::dispose(self)
    }
}

/// Validate host dimensions and apply the scene's sizing rules: whole
/// pixels, never shorter than `min_height`.
pub(crate) fn normalize_viewport(width: f64, height: f64, min_height: f64) -> SceneResult<(f64, f64)> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(SceneError::InvalidViewport { width, height });
    }
    let width = width.floor().max(1.0);
    let height = height.max(min_height).floor();
    Ok((width, height))
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
