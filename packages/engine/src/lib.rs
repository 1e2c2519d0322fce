//! Tower Vision Engine - block tower physics scene in WASM
//!
//! Architecture:
//! - core/        - Error types
//! - domain/      - Tower geometry, palette, models, settings (no state)
//! - systems/     - Rigid bodies, drag constraint, shimmer timer
//! - simulation/  - Scene orchestration and the JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

// Short paths used throughout the crate
pub use systems::mouse_constraint;
pub use systems::rigid_body;
pub use systems::rigid_body_system;
pub use systems::shimmer;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` records to the browser console, or to stderr natively.
/// Only the first call installs a logger; later calls are ignored.
fn install_logger(level: log::Level) {
    #[cfg(target_arch = "wasm32")]
    let installed = console_log::init_with_level(level);
    #[cfg(not(target_arch = "wasm32"))]
    let installed = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .try_init();

    if installed.is_err() {
        log::debug!("logger already installed");
    }
}

/// Initialize the engine: panic hook and console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    install_logger(log::Level::Info);
    log::info!("Tower Vision engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Like `init`, with debug-level logging (shimmer transitions, rebuilds)
#[wasm_bindgen]
pub fn init_verbose() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    install_logger(log::Level::Debug);
    log::debug!("verbose logging enabled");
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Tower placements for a viewport as a JSON array, without building a scene
#[wasm_bindgen]
pub fn tower_placements_json(width: f64, height: f64) -> String {
    serde_json::to_string(&domain::tower::generate(width, height)).unwrap_or_else(|_| "[]".to_string())
}

/// `[{ value, label }]` for the model picker
#[wasm_bindgen]
pub fn models_json() -> String {
    domain::models::TowerModel::options_json()
}

// Re-export main types
pub use crate::core::SceneError;
pub use domain::settings::SceneSettings;
pub use domain::tower::{generate, PlacementDescriptor, TowerLayout};
pub use simulation::{SceneCore, TowerScene};
