//! Block colors.
//!
//! A block's color is a pure function of its tower level and whether the
//! scene is shimmering. Hue drifts slowly with height; the shimmer palette is
//! brighter, more saturated and drifts faster.

/// HSL color with alpha. Hue in degrees, saturation/lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

pub fn block_color(level: u32, shimmering: bool) -> Hsla {
    let level = level as f32;
    if shimmering {
        Hsla {
            hue: 220.0 + level * 0.6,
            saturation: 95.0,
            lightness: 65.0,
            alpha: 0.9,
        }
    } else {
        Hsla {
            hue: 215.0 + level * 0.35,
            saturation: 75.0,
            lightness: 62.0,
            alpha: 0.95,
        }
    }
}

impl Hsla {
    /// CSS `hsla()` string for canvas fill styles.
    pub fn to_css(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            trim(self.hue),
            trim(self.saturation),
            trim(self.lightness),
            trim(self.alpha)
        )
    }

    /// Packed for a little-endian `Uint32Array` view over RGBA bytes:
    /// `0xAABBGGRR`.
    pub fn to_rgba_u32(&self) -> u32 {
        let (r, g, b) = self.to_rgb();
        let a = channel(self.alpha);
        (a << 24) | (b << 16) | (g << 8) | r
    }

    fn to_rgb(&self) -> (u32, u32, u32) {
        let h = self.hue.rem_euclid(360.0) / 360.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            let v = channel(l);
            return (v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        (
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[inline]
fn channel(v: f32) -> u32 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Format without trailing zeros, rounded to 3 decimals.
fn trim(v: f32) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
