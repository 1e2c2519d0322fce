//! Scene configuration.
//!
//! Every field has a default matching the shipped look of the scene, so a
//! settings bundle only needs to name what it overrides:
//!
//! ```
//! use tower_vision_engine::domain::settings::SceneSettings;
//!
//! let settings = SceneSettings::from_json(r#"{ "tower": { "margin": 48 } }"#).unwrap();
//! assert_eq!(settings.tower.margin, 48.0);
//! assert_eq!(settings.tower.floor_offset, 60.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::SceneResult;

/// Geometry inputs of the tower generator that are safe to tune.
///
/// The taper breakpoints and carve-out bands are fixed in
/// [`crate::domain::tower`] and intentionally not part of this struct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerParams {
    /// Horizontal margin subtracted from the viewport width.
    pub margin: f64,
    /// Distance from the bottom of the viewport to the floor surface.
    pub floor_offset: f64,
    /// Gap between the floor surface and the base row.
    pub base_margin: f64,
    pub min_block_size: f64,
    pub max_block_size: f64,
    /// Viewport width is divided by this to get the raw block size.
    pub block_divisor: f64,
}

impl Default for TowerParams {
    fn default() -> Self {
        Self {
            margin: 32.0,
            floor_offset: 60.0,
            base_margin: 20.0,
            min_block_size: 12.0,
            max_block_size: 24.0,
            block_divisor: 32.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockMaterial {
    pub friction: f32,
    pub friction_air: f32,
    pub restitution: f32,
    pub density: f32,
    /// Corner radius, used by the renderer only.
    pub chamfer: f32,
}

impl Default for BlockMaterial {
    fn default() -> Self {
        Self {
            friction: 0.4,
            friction_air: 0.015,
            restitution: 0.05,
            density: 0.001,
            chamfer: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundarySettings {
    pub floor_friction: f32,
    pub wall_friction: f32,
    /// Thickness of the floor and both walls.
    pub thickness: f32,
}

impl Default for BoundarySettings {
    fn default() -> Self {
        Self {
            floor_friction: 0.9,
            wall_friction: 0.1,
            thickness: 80.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimmerSettings {
    /// How long a model-selection celebration lasts.
    pub duration_ms: f64,
    /// Period of the random push while shimmering.
    pub pulse_interval_ms: f64,
    /// Pulses owed beyond this (e.g. after a background tab) are dropped.
    pub max_catch_up_pulses: u32,
    pub base_force: f32,
    /// Added per `index % 5` step so neighbouring blocks don't move in lockstep.
    pub force_step: f32,
    /// Upward component as a fraction of the per-body magnitude.
    pub lift_ratio: f32,
}

impl Default for ShimmerSettings {
    fn default() -> Self {
        Self {
            duration_ms: 1200.0,
            pulse_interval_ms: 120.0,
            max_catch_up_pulses: 3,
            base_force: 0.005,
            force_step: 0.0004,
            lift_ratio: 0.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            stiffness: 0.14,
            damping: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub tower: TowerParams,
    pub block: BlockMaterial,
    pub boundary: BoundarySettings,
    pub shimmer: ShimmerSettings,
    pub drag: DragSettings,
    pub gravity_x: f32,
    pub gravity_y: f32,
    /// px/ms² per unit of gravity.
    pub gravity_scale: f32,
    pub timestep_ms: f64,
    pub max_steps_per_tick: u32,
    pub solver_iterations: u32,
    /// The scene never gets shorter than this, whatever the container says.
    pub min_height: f64,
    pub max_pixel_ratio: f64,
    pub seed: u32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            tower: TowerParams::default(),
            block: BlockMaterial::default(),
            boundary: BoundarySettings::default(),
            shimmer: ShimmerSettings::default(),
            drag: DragSettings::default(),
            gravity_x: 0.0,
            gravity_y: 1.0,
            gravity_scale: 0.001,
            timestep_ms: 1000.0 / 60.0,
            max_steps_per_tick: 4,
            solver_iterations: 6,
            min_height: 520.0,
            max_pixel_ratio: 2.0,
            seed: 12345,
        }
    }
}

impl SceneSettings {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Canvas backing-store ratio for a device pixel ratio reported by the host.
    pub fn pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        let device = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        device.min(self.max_pixel_ratio)
    }
}
