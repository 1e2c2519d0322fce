use wasm_bindgen::prelude::*;

use crate::core::error::SceneError;
use crate::domain::settings::SceneSettings;

use super::perf_stats::PerfStats;
use super::SceneCore;

fn to_js(err: SceneError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Where the render buffers live in wasm memory. Valid until the next
/// `extract_render`, `resize` or `dispose`.
#[wasm_bindgen]
pub struct AbiLayout {
    transforms_ptr: u32,
    transforms_len_elements: u32,
    transforms_len_bytes: u32,
    colors_ptr: u32,
    colors_len_elements: u32,
    colors_len_bytes: u32,
    body_count: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn transforms_ptr(&self) -> u32 { self.transforms_ptr }
    #[wasm_bindgen(getter)]
    pub fn transforms_len_elements(&self) -> u32 { self.transforms_len_elements }
    #[wasm_bindgen(getter)]
    pub fn transforms_len_bytes(&self) -> u32 { self.transforms_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn colors_ptr(&self) -> u32 { self.colors_ptr }
    #[wasm_bindgen(getter)]
    pub fn colors_len_elements(&self) -> u32 { self.colors_len_elements }
    #[wasm_bindgen(getter)]
    pub fn colors_len_bytes(&self) -> u32 { self.colors_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
}

#[wasm_bindgen]
pub struct TowerScene {
    core: SceneCore,
}

#[wasm_bindgen]
impl TowerScene {
    /// Create the scene for a container of the given size and build the tower
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<TowerScene, JsValue> {
        let core = SceneCore::new(width, height).map_err(to_js)?;
        Ok(Self { core })
    }

    /// Same as the constructor, with a JSON settings bundle
    #[wasm_bindgen(js_name = withSettingsJson)]
    pub fn with_settings_json(width: f64, height: f64, json: String) -> Result<TowerScene, JsValue> {
        let settings = SceneSettings::from_json(&json).map_err(to_js)?;
        let core = SceneCore::with_settings(width, height, settings).map_err(to_js)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn total_levels(&self) -> u32 { self.core.total_levels() }

    #[wasm_bindgen(getter)]
    pub fn is_shimmering(&self) -> bool { self.core.is_shimmering() }

    #[wasm_bindgen(getter)]
    pub fn model(&self) -> String { self.core.model().key().to_string() }

    pub fn settings_json(&self) -> String {
        self.core.settings().to_json()
    }

    /// Backing-store ratio the host canvas should use
    pub fn pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        self.core.settings().pixel_ratio(device_pixel_ratio)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.core.set_gravity(x, y);
    }

    // === TOWER ===

    /// Rebuild the tower in place. Returns the number of blocks
    pub fn build_tower(&mut self) -> usize {
        self.core.build_tower()
    }

    /// "Build again" button
    pub fn reset(&mut self) {
        self.core.reset();
    }

    /// Forward ResizeObserver content-rect sizes here
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.core.resize(width, height).map_err(to_js)
    }

    /// Number of tower blocks (boundaries excluded)
    pub fn tower_body_count(&self) -> usize {
        self.core.tower_body_count()
    }

    /// Total bodies including the invisible floor and walls
    pub fn body_count(&self) -> usize {
        self.core.body_count()
    }

    /// Current placements as a JSON array
    pub fn placements_json(&self) -> String {
        serde_json::to_string(&self.core.placements()).unwrap_or_else(|_| "[]".to_string())
    }

    // === EFFECTS ===

    /// Call on mount and whenever the model picker changes
    pub fn select_model(&mut self, key: &str, now_ms: f64) -> Result<(), JsValue> {
        self.core.select_model(key, now_ms).map_err(to_js)
    }

    /// "Highlight tower" button. Returns the new state
    pub fn toggle_shimmer(&mut self, now_ms: f64) -> bool {
        self.core.toggle_shimmer(now_ms)
    }

    // === POINTER ===

    /// Returns the grabbed body ID, or 0 if nothing was hit
    pub fn pointer_down(&mut self, x: f32, y: f32) -> u32 {
        self.core.pointer_down(x, y).unwrap_or(0)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.core.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.core.pointer_up();
    }

    // === STEPPING ===

    /// Call from requestAnimationFrame with its timestamp
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        self.core.tick(now_ms)
    }

    pub fn step(&mut self) {
        self.core.step();
    }

    // === RENDERING ===

    /// Refresh render buffers; returns the number of bodies to draw
    pub fn extract_render(&mut self) -> usize {
        self.core.extract_render()
    }

    /// CSS fill style for the `index`-th extracted body
    pub fn body_fill_style(&self, index: usize) -> Option<String> {
        self.core.body_fill_style(index)
    }

    pub fn abi_layout(&self) -> AbiLayout {
        let transforms = self.core.render_transforms();
        let colors = self.core.render_colors();
        AbiLayout {
            transforms_ptr: transforms.as_ptr() as u32,
            transforms_len_elements: transforms.len() as u32,
            transforms_len_bytes: std::mem::size_of_val(transforms) as u32,
            colors_ptr: colors.as_ptr() as u32,
            colors_len_elements: colors.len() as u32,
            colors_len_bytes: std::mem::size_of_val(colors) as u32,
            body_count: colors.len() as u32,
        }
    }

    // === LIFECYCLE ===

    /// Component teardown
    pub fn dispose(&mut self) {
        self.core.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_layout_matches_extracted_buffers() {
        let mut scene = TowerScene::new(640.0, 800.0).unwrap();
        let count = scene.extract_render();
        let abi = scene.abi_layout();

        assert_eq!(abi.body_count() as usize, count);
        assert_eq!(abi.colors_len_elements() as usize, count);
        assert_eq!(abi.transforms_len_elements() as usize, count * super::super::TRANSFORM_STRIDE);
        assert_eq!(abi.transforms_len_bytes(), abi.transforms_len_elements() * 4);
        assert_eq!(abi.colors_len_bytes(), abi.colors_len_elements() * 4);
    }

    #[test]
    fn grabbing_empty_space_reports_zero() {
        let mut scene = TowerScene::new(640.0, 800.0).unwrap();
        assert_eq!(scene.pointer_down(1.0, 1.0), 0);
    }
}
