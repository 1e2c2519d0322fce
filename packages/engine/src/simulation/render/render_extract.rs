use crate::domain::palette::{block_color, Hsla};

use super::SceneCore;

/// f32 values per body in the transform buffer:
/// x, y, width, height, angle, chamfer
pub const TRANSFORM_STRIDE: usize = 6;

/// Non-tower bodies that are visible (none by default) fall back to this.
const UNTAGGED_COLOR: Hsla = Hsla {
    hue: 0.0,
    saturation: 0.0,
    lightness: 60.0,
    alpha: 1.0,
};

fn body_color(scene: &SceneCore, body_id: u32) -> Hsla {
    match scene.tower_levels.get(&body_id) {
        Some(&level) => block_color(level, scene.shimmer.is_shimmering()),
        None => UNTAGGED_COLOR,
    }
}

pub(super) fn extract_render(scene: &mut SceneCore) -> usize {
    let mut transforms = std::mem::take(&mut scene.render.transforms);
    let mut colors = std::mem::take(&mut scene.render.colors);
    let mut body_ids = std::mem::take(&mut scene.render.body_ids);
    transforms.clear();
    colors.clear();
    body_ids.clear();

    for body in scene.bodies.bodies().iter().filter(|b| b.visible) {
        transforms.extend_from_slice(&[
            body.pos.x,
            body.pos.y,
            body.width(),
            body.height(),
            body.angle,
            body.chamfer,
        ]);
        colors.push(body_color(scene, body.id).to_rgba_u32());
        body_ids.push(body.id);
    }

    let count = body_ids.len();
    scene.render.transforms = transforms;
    scene.render.colors = colors;
    scene.render.body_ids = body_ids;
    count
}

pub(super) fn body_fill_style(scene: &SceneCore, index: usize) -> Option<String> {
    let id = *scene.render.body_ids.get(index)?;
    Some(body_color(scene, id).to_css())
}
