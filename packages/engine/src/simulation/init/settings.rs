use super::perf_stats::PerfStats;
use super::SceneCore;

pub(super) fn enable_perf_metrics(scene: &mut SceneCore, enabled: bool) {
    scene.perf_enabled = enabled;
    if !enabled {
        scene.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(scene: &SceneCore) -> PerfStats {
    scene.perf_stats.clone()
}

pub(super) fn set_gravity(scene: &mut SceneCore, x: f32, y: f32) {
    scene.gravity_x = x;
    scene.gravity_y = y;
}

pub(super) fn get_gravity(scene: &SceneCore) -> (f32, f32) {
    (scene.gravity_x, scene.gravity_y)
}
