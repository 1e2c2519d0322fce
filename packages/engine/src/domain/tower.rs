//! Tower silhouette generator.
//!
//! Lays square blocks out level by level into a tapering tower, leaving an
//! open arch near the base and a checkerboard lattice band above it. The
//! output only depends on the viewport size (and [`TowerParams`]), so the
//! same viewport always produces the same placements in the same order.

use serde::Serialize;

use crate::domain::settings::TowerParams;

// Taper breakpoints (fraction of total height).
const TAPER_LOWER_END: f64 = 0.3;
const TAPER_MIDDLE_END: f64 = 0.6;
/// Narrowest a level may get, as a fraction of the effective width.
const MIN_WIDTH_FACTOR: f64 = 0.12;

/// Levels below this fraction of the tower are the arch.
const ARCH_TOP: f64 = 0.12;
/// Lattice band runs from the arch top up to this fraction.
const LATTICE_TOP: f64 = 0.28;

/// Share of the viewport height the tower may occupy.
const HEIGHT_SHARE: f64 = 0.7;
/// Level pitch and block edge, relative to the block cell.
const CELL_FILL: f64 = 0.9;

const MIN_COLUMNS: i64 = 2;

/// One block the scene should materialize.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlacementDescriptor {
    pub level: u32,
    pub column: u32,
    /// Center
    pub x: f64,
    pub y: f64,
    /// Edge length of the square block.
    pub size: f64,
    /// Drives the block's display color; equal to `level`.
    pub color_seed: u32,
}

/// Geometry of one tier before carve-outs are applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelRow {
    pub level: u32,
    pub progress: f64,
    pub width_factor: f64,
    pub columns: u32,
    pub offset_x: f64,
    pub y: f64,
}

/// Constants derived once per viewport.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerLayout {
    pub width: f64,
    pub height: f64,
    pub effective_width: f64,
    pub base_y: f64,
    pub block_size: f64,
    pub level_height: f64,
    pub total_levels: u32,
}

/// Three-segment piecewise-linear taper, floored at [`MIN_WIDTH_FACTOR`].
pub fn width_factor(progress: f64) -> f64 {
    let factor = if progress <= TAPER_LOWER_END {
        1.0 - progress * 0.75
    } else if progress <= TAPER_MIDDLE_END {
        0.6 - (progress - TAPER_LOWER_END) * 0.5
    } else {
        0.35 - (progress - TAPER_MIDDLE_END) * 0.35
    };
    factor.max(MIN_WIDTH_FACTOR)
}

/// Generate placements with the default [`TowerParams`].
pub fn generate(width: f64, height: f64) -> Vec<PlacementDescriptor> {
    TowerLayout::new(width, height, &TowerParams::default()).placements()
}

impl TowerLayout {
    pub fn new(width: f64, height: f64, params: &TowerParams) -> Self {
        let block_size = (width / params.block_divisor)
            .round()
            .clamp(params.min_block_size, params.max_block_size);
        let level_height = block_size * CELL_FILL;
        let total_levels = (height * HEIGHT_SHARE / level_height).floor().max(0.0) as u32;

        Self {
            width,
            height,
            effective_width: width - params.margin,
            base_y: height - params.floor_offset - params.base_margin,
            block_size,
            level_height,
            total_levels,
        }
    }

    pub fn block_edge(&self) -> f64 {
        self.block_size * CELL_FILL
    }

    pub fn row(&self, level: u32) -> LevelRow {
        let progress = f64::from(level) / f64::from(self.total_levels);
        let width_factor = width_factor(progress);
        let level_width = self.effective_width * width_factor;
        let columns = ((level_width / self.block_size).floor() as i64).max(MIN_COLUMNS) as u32;
        let offset_x = (self.width - f64::from(columns) * self.block_size) / 2.0;
        let y = self.base_y - f64::from(level) * self.level_height;

        LevelRow {
            level,
            progress,
            width_factor,
            columns,
            offset_x,
            y,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = LevelRow> + '_ {
        (0..self.total_levels).map(move |level| self.row(level))
    }

    /// Whether the cell at (`level`, `column`) is left open.
    pub fn is_carved(&self, level: u32, column: u32, columns: u32) -> bool {
        let level_f = f64::from(level);
        let total = f64::from(self.total_levels);
        let arch_top = total * ARCH_TOP;

        if level_f < arch_top {
            // Keep the two outermost columns on each side as the arch legs.
            return column > 1 && i64::from(column) < i64::from(columns) - 2;
        }
        level_f < total * LATTICE_TOP && column % 2 == level % 2
    }

    pub fn placements(&self) -> Vec<PlacementDescriptor> {
        let size = self.block_edge();
        let mut out = Vec::new();

        for row in self.rows() {
            for column in 0..row.columns {
                if self.is_carved(row.level, column, row.columns) {
                    continue;
                }
                out.push(PlacementDescriptor {
                    level: row.level,
                    column,
                    x: row.offset_x + f64::from(column) * self.block_size + self.block_size / 2.0,
                    y: row.y,
                    size,
                    color_seed: row.level,
                });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: f64, height: f64) -> TowerLayout {
        TowerLayout::new(width, height, &TowerParams::default())
    }

    #[test]
    fn taper_segments_meet_expected_values() {
        assert_eq!(width_factor(0.0), 1.0);
        assert!((width_factor(0.3) - 0.775).abs() < 1e-12);
        // Just past the first breakpoint the middle segment takes over.
        assert!((width_factor(0.30001) - 0.599995).abs() < 1e-9);
        assert!((width_factor(0.6) - 0.45).abs() < 1e-12);
        assert!((width_factor(0.8) - 0.28).abs() < 1e-12);
    }

    #[test]
    fn taper_never_drops_below_floor() {
        assert!((width_factor(1.0) - 0.21).abs() < 1e-12);
        assert_eq!(width_factor(2.0), MIN_WIDTH_FACTOR);
    }

    #[test]
    fn derived_constants_for_640_by_800() {
        let l = layout(640.0, 800.0);
        assert_eq!(l.block_size, 20.0);
        assert_eq!(l.level_height, 18.0);
        assert_eq!(l.total_levels, 31);
        assert_eq!(l.effective_width, 608.0);
        assert_eq!(l.base_y, 720.0);
    }

    #[test]
    fn block_size_is_clamped() {
        assert_eq!(layout(100.0, 600.0).block_size, 12.0);
        assert_eq!(layout(4000.0, 600.0).block_size, 24.0);
    }

    #[test]
    fn tiny_viewport_has_no_levels() {
        let l = layout(10.0, 10.0);
        assert_eq!(l.total_levels, 0);
        assert!(l.placements().is_empty());
    }

    #[test]
    fn narrow_width_still_gets_two_columns() {
        // effective width is negative here
        let l = layout(20.0, 600.0);
        assert!(l.total_levels > 0);
        for row in l.rows() {
            assert_eq!(row.columns, 2);
        }
    }

    #[test]
    fn lattice_starts_exactly_at_the_arch_top() {
        // 25 levels put the arch top on a whole level (25 * 0.12 = 3). The
        // lattice bound is inclusive, so level 3 is checkered; a strict
        // `level > 3` bound would leave this row solid.
        let l = layout(640.0, 650.0);
        assert_eq!(l.total_levels, 25);

        let row = l.row(3);
        let kept: Vec<u32> = l
            .placements()
            .iter()
            .filter(|p| p.level == 3)
            .map(|p| p.column)
            .collect();
        assert!(kept.iter().all(|c| c % 2 == 0));
        assert_eq!(kept.len() as u32, (row.columns + 1) / 2);
    }

    #[test]
    fn arch_keeps_two_legs_per_side() {
        let l = layout(640.0, 800.0);
        let placements = l.placements();
        let base: Vec<u32> = placements.iter().filter(|p| p.level == 0).map(|p| p.column).collect();
        let columns = l.row(0).columns;
        assert_eq!(base, vec![0, 1, columns - 2, columns - 1]);
    }

    #[test]
    fn descriptors_carry_level_as_color_seed() {
        for p in generate(800.0, 900.0) {
            assert_eq!(p.color_seed, p.level);
            assert_eq!(p.size, 24.0 * CELL_FILL);
        }
    }
}
