use std::collections::HashSet;

use proptest::prelude::*;
use tower_vision_engine::domain::settings::TowerParams;
use tower_vision_engine::{generate, TowerLayout};

fn layout(width: f64, height: f64) -> TowerLayout {
    TowerLayout::new(width, height, &TowerParams::default())
}

fn lattice_band(l: &TowerLayout, level: u32) -> bool {
    let total = f64::from(l.total_levels);
    let level = f64::from(level);
    level >= total * 0.12 && level < total * 0.28
}

#[test]
fn reference_viewport_640_by_800() {
    let l = layout(640.0, 800.0);
    assert_eq!(l.total_levels, 31);

    let placements = generate(640.0, 800.0);
    let first = placements[0];
    assert_eq!((first.level, first.column), (0, 0));
    assert_eq!(first.x, 30.0);
    assert_eq!(first.y, 720.0);
    assert_eq!(first.size, 18.0);

    let top = placements.last().unwrap();
    assert_eq!(top.level, 30);
    assert_eq!(top.y, 720.0 - 30.0 * 18.0);

    let narrowest = l.rows().map(|r| r.columns).min().unwrap();
    assert_eq!(l.row(30).columns, narrowest);
    assert!(l.row(30).width_factor >= 0.12);

    // Arch gap in the base row
    assert!(!placements.iter().any(|p| p.level == 0 && p.column == 2));
}

#[test]
fn arch_rows_at_800_by_900() {
    let l = layout(800.0, 900.0);
    assert_eq!(l.block_size, 24.0);
    assert_eq!(l.total_levels, 29);

    let placements = l.placements();
    // 29 * 0.12 = 3.48, so levels 0..=3 are the arch
    for level in 0..=3 {
        let columns = l.row(level).columns;
        let cols: Vec<u32> = placements
            .iter()
            .filter(|p| p.level == level)
            .map(|p| p.column)
            .collect();
        assert_eq!(cols, vec![0, 1, columns - 2, columns - 1], "level {level}");
    }
    let level4 = placements.iter().filter(|p| p.level == 4).count() as u32;
    assert!(level4 < l.row(4).columns);
    assert!(level4 > 4);
}

#[test]
fn tiny_width_keeps_two_columns() {
    let l = layout(20.0, 600.0);
    for p in l.placements() {
        assert!(p.column < 2);
    }
    for row in l.rows() {
        let count = l.placements().iter().filter(|p| p.level == row.level).count();
        let expected = if lattice_band(&l, row.level) { 1 } else { 2 };
        assert_eq!(count, expected, "level {}", row.level);
    }
}

#[test]
fn degenerate_viewports_yield_nothing() {
    assert!(generate(0.0, 0.0).is_empty());
    assert!(generate(640.0, 5.0).is_empty());
}

proptest! {
    #[test]
    fn same_viewport_same_tower(width in 1.0f64..2500.0, height in 1.0f64..2500.0) {
        prop_assert_eq!(generate(width, height), generate(width, height));
    }

    #[test]
    fn placements_are_ordered_by_level(width in 40.0f64..2500.0, height in 100.0f64..2500.0) {
        let placements = generate(width, height);
        for pair in placements.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.level < b.level || (a.level == b.level && a.column < b.column));
        }
    }

    #[test]
    fn rows_stay_centered_and_stacked(width in 40.0f64..2500.0, height in 100.0f64..2500.0) {
        let l = layout(width, height);
        for row in l.rows() {
            prop_assert!(row.columns >= 2);
            let span = f64::from(row.columns) * l.block_size;
            prop_assert!((row.offset_x * 2.0 + span - width).abs() < 1e-6);
            prop_assert!((row.y - (l.base_y - f64::from(row.level) * l.level_height)).abs() < 1e-6);
            prop_assert!(row.width_factor >= 0.12);
        }
    }

    #[test]
    fn cells_are_unique(width in 40.0f64..2500.0, height in 100.0f64..2500.0) {
        let placements = generate(width, height);
        let cells: HashSet<(u32, u32)> = placements.iter().map(|p| (p.level, p.column)).collect();
        prop_assert_eq!(cells.len(), placements.len());
    }

    #[test]
    fn lattice_rows_keep_about_half(width in 40.0f64..2500.0, height in 200.0f64..2500.0) {
        let l = layout(width, height);
        let placements = l.placements();
        for row in l.rows().filter(|r| lattice_band(&l, r.level)) {
            let kept = placements.iter().filter(|p| p.level == row.level).count() as i64;
            let half = i64::from(row.columns) / 2;
            prop_assert!((kept - half).abs() <= 1, "level {} kept {} of {}", row.level, kept, row.columns);
            for p in placements.iter().filter(|p| p.level == row.level) {
                prop_assert_ne!(p.column % 2, p.level % 2);
            }
        }
    }

    #[test]
    fn taller_viewports_never_lose_levels(
        width in 40.0f64..2500.0,
        height in 1.0f64..2500.0,
        extra in 0.0f64..1000.0,
    ) {
        prop_assert!(layout(width, height).total_levels <= layout(width, height + extra).total_levels);
    }
}
