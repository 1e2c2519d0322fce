use crate::rigid_body::Vec2;

use super::random::next_unit;
use super::{PerfTimer, SceneCore};

/// Absorbs rounding when the accumulator holds an exact multiple of `dt`.
const STEP_EPSILON_MS: f64 = 1e-6;

pub(super) fn tick(scene: &mut SceneCore, now_ms: f64) -> u32 {
    if scene.disposed {
        return 0;
    }

    // === SHIMMER ===
    let shimmer_start = if scene.perf_enabled { Some(PerfTimer::start()) } else { None };
    let shimmer = scene.shimmer.advance(now_ms);
    for _ in 0..shimmer.pulses {
        apply_shimmer_pulse(scene);
    }
    if shimmer.ended {
        log::debug!("shimmer ended at {now_ms:.0}ms");
    }
    if let Some(t0) = shimmer_start {
        scene.perf_stats.shimmer_ms = t0.elapsed_ms();
        scene.perf_stats.shimmer_pulses = shimmer.pulses;
    }

    // === FIXED STEPS ===
    let dt = scene.settings.timestep_ms;
    let elapsed = match scene.last_tick_ms {
        Some(last) => (now_ms - last).max(0.0),
        // First frame: take one step so the scene starts moving immediately.
        None => dt,
    };
    scene.last_tick_ms = Some(now_ms);

    let max_steps = scene.settings.max_steps_per_tick.max(1);
    // Drop backlog we could never catch up on (tab in background, debugger).
    scene.accumulator_ms = (scene.accumulator_ms + elapsed).min(dt * f64::from(max_steps));

    let mut steps = 0;
    while scene.accumulator_ms + STEP_EPSILON_MS >= dt && steps < max_steps {
        step(scene);
        scene.accumulator_ms -= dt;
        steps += 1;
    }
    steps
}

pub(super) fn step(scene: &mut SceneCore) {
    if scene.disposed {
        return;
    }
    let perf_on = scene.perf_enabled;
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let dt = scene.settings.timestep_ms as f32;
    let gravity = Vec2::new(scene.gravity_x, scene.gravity_y);

    scene.mouse.apply(&mut scene.bodies, dt);

    // === RIGID BODY PHYSICS ===
    let report = if perf_on {
        let t0 = PerfTimer::start();
        let report = scene.bodies.update(dt, gravity, scene.settings.gravity_scale);
        scene.perf_stats.rigid_ms = t0.elapsed_ms();
        report
    } else {
        scene.bodies.update(dt, gravity, scene.settings.gravity_scale)
    };

    scene.frame += 1;

    if let Some(t0) = step_start {
        scene.perf_stats.step_ms = t0.elapsed_ms();
        scene.perf_stats.contacts = report.contacts;
        scene.perf_stats.pairs = report.pairs;
        scene.perf_stats.body_count = scene.bodies.body_count() as u32;
        scene.perf_stats.tower_bodies = scene.tower_ids.len() as u32;
        scene.perf_stats.frame = scene.frame;
    }
}

/// Nudge every tower block: a random sideways push plus a small lift.
/// Magnitude cycles with the block's index so neighbours don't move as one.
pub(super) fn apply_shimmer_pulse(scene: &mut SceneCore) {
    let shimmer = &scene.settings.shimmer;
    for (index, &id) in scene.tower_ids.iter().enumerate() {
        let magnitude = shimmer.base_force + (index % 5) as f32 * shimmer.force_step;
        let sideways = (next_unit(&mut scene.rng_state) - 0.5) * magnitude;
        if let Some(body) = scene.bodies.body_mut(id) {
            body.apply_force(Vec2::new(sideways, -magnitude * shimmer.lift_ratio));
        }
    }
}
