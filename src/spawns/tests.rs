//! Spawns domain: anchor placement and army layout.

use bevy::math::DVec2;

use super::{
    ROW_WIDTH, SpawnPlans, UNIT_SPACING, UnitGroup, grid_offset, pair_units, plan_player,
    plan_spawns, spawn_anchor, spawn_radius,
};
use crate::content::{CatalogEntry, CatalogId};
use crate::core::GeneratorError;
use crate::scenario::PlayerId;

fn entry(key: &str, id: u32) -> CatalogEntry {
    CatalogEntry {
        key: key.to_string(),
        id: CatalogId(id),
    }
}

#[test]
fn test_four_players_sit_on_spawn_circle() {
    let map_size = 120;
    let center = DVec2::splat(60.0);
    let radius = spawn_radius(map_size);
    assert!((radius - 42.0).abs() < 1e-9);

    let expected_degrees = [0.0, 90.0, 180.0, 270.0];
    for (p, expected) in expected_degrees.iter().enumerate() {
        let (angle, anchor) = spawn_anchor(map_size, p as u8, 4);
        assert!((angle.to_degrees() - expected).abs() < 1e-9);
        assert!((anchor.distance(center) - radius).abs() < 1e-9);
    }

    // player 0 sits straight up the y axis, player 1 along +x
    let (_, first) = spawn_anchor(map_size, 0, 4);
    assert!((first - DVec2::new(60.0, 102.0)).length() < 1e-9);
    let (_, second) = spawn_anchor(map_size, 1, 4);
    assert!((second - DVec2::new(102.0, 60.0)).length() < 1e-9);
}

#[test]
fn test_grid_offset_wraps_every_row() {
    assert_eq!(grid_offset(0), DVec2::ZERO);
    assert_eq!(grid_offset(9), DVec2::new(9.0 * UNIT_SPACING, 0.0));
    assert_eq!(grid_offset(ROW_WIDTH), DVec2::new(0.0, UNIT_SPACING));
    assert_eq!(grid_offset(23), DVec2::new(3.0 * UNIT_SPACING, 2.0 * UNIT_SPACING));
}

#[test]
fn test_army_layout_wraps_after_ten_units() {
    let army = pair_units(vec![entry("A", 1), entry("B", 2)], &[12, 3]).unwrap();
    let plan = plan_player(100, 0, 1, &army);
    assert_eq!(plan.units.len(), 15);
    assert_eq!(plan.player, PlayerId(1));

    let first_row_y = plan.units[0].position.y;
    assert!(plan.units[..10].iter().all(|u| u.position.y == first_row_y));

    // unit 10 is the first of the second row, unit 11 the second
    let tenth = &plan.units[10];
    assert_eq!(tenth.unit.key, "A");
    assert_eq!(tenth.position, plan.anchor + DVec2::new(0.0, UNIT_SPACING));
    let eleventh = &plan.units[11];
    assert_eq!(eleventh.unit.key, "A");
    assert_eq!(eleventh.position, plan.anchor + DVec2::new(UNIT_SPACING, UNIT_SPACING));

    assert!(plan.units[12..].iter().all(|u| u.unit.key == "B"));
}

#[test]
fn test_units_face_anchor_angle() {
    let army = vec![UnitGroup {
        unit: entry("A", 1),
        count: 3,
    }];
    let plans = plan_spawns(80, 4, &army);
    assert_eq!(plans.len(), 4);
    for (p, plan) in plans.iter().enumerate() {
        let expected = 90.0 * p as f64;
        assert!(plan.units.iter().all(|u| (u.rotation_degrees - expected).abs() < 1e-9));
    }
}

#[test]
fn test_zero_count_places_nothing() {
    let army = pair_units(vec![entry("A", 1)], &[0]).unwrap();
    let plans = SpawnPlans(plan_spawns(50, 2, &army));
    assert_eq!(plans.unit_count(), 0);
    assert_eq!(plans.0.len(), 2);
}

#[test]
fn test_pair_units_length_mismatch() {
    let err = pair_units(vec![entry("A", 1), entry("B", 2)], &[12]).unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidParameters(_)));
}

#[test]
fn test_same_army_for_every_player() {
    let army = pair_units(vec![entry("A", 1), entry("B", 2)], &[4, 2]).unwrap();
    let plans = SpawnPlans(plan_spawns(64, 3, &army));
    assert_eq!(plans.unit_count(), 18);
    for plan in &plans.0 {
        let keys: Vec<&str> = plan.units.iter().map(|u| u.unit.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "A", "A", "A", "B", "B"]);
    }
}
