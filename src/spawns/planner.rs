//! Spawns domain: circular anchors and row-major army layout.

use std::f64::consts::TAU;

use bevy::math::DVec2;

use crate::content::CatalogEntry;
use crate::core::GeneratorError;
use crate::scenario::PlayerId;

/// Units per row before wrapping.
pub const ROW_WIDTH: usize = 10;
/// Spacing between neighbouring units, in tiles.
pub const UNIT_SPACING: f64 = 0.5;
/// Spawn circle radius as a fraction of half the map size.
pub const SPAWN_RADIUS_FACTOR: f64 = 0.7;

/// `count` copies of one unit kind. Shared by every player's army.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitGroup {
    pub unit: CatalogEntry,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedUnit {
    pub unit: CatalogEntry,
    pub position: DVec2,
    pub rotation_degrees: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPlan {
    pub player: PlayerId,
    /// Anchor angle in radians, measured from +y towards +x.
    pub angle: f64,
    pub anchor: DVec2,
    pub units: Vec<PlacedUnit>,
}

/// Zip unit kinds with their counts.
pub fn pair_units(
    units: Vec<CatalogEntry>,
    counts: &[u32],
) -> Result<Vec<UnitGroup>, GeneratorError> {
    if units.len() != counts.len() {
        return Err(GeneratorError::invalid_parameters(format!(
            "{} unit types but {} unit counts",
            units.len(),
            counts.len()
        )));
    }
    Ok(units
        .into_iter()
        .zip(counts)
        .map(|(unit, &count)| UnitGroup { unit, count })
        .collect())
}

pub fn spawn_radius(map_size: u32) -> f64 {
    SPAWN_RADIUS_FACTOR * map_size as f64 / 2.0
}

/// Angle and anchor point of player `index` out of `player_count`.
pub fn spawn_anchor(map_size: u32, index: u8, player_count: u8) -> (f64, DVec2) {
    let angle = TAU * index as f64 / player_count as f64;
    let center = DVec2::splat(map_size as f64 / 2.0);
    let radius = spawn_radius(map_size);
    (angle, center + DVec2::new(angle.sin(), angle.cos()) * radius)
}

/// Offset of the `slot`-th unit from its anchor.
pub fn grid_offset(slot: usize) -> DVec2 {
    let column = slot % ROW_WIDTH;
    let row = slot / ROW_WIDTH;
    DVec2::new(column as f64, row as f64) * UNIT_SPACING
}

pub fn plan_player(map_size: u32, index: u8, player_count: u8, army: &[UnitGroup]) -> SpawnPlan {
    let (angle, anchor) = spawn_anchor(map_size, index, player_count);
    let rotation_degrees = angle.to_degrees();

    let units = army
        .iter()
        .flat_map(|group| (0..group.count).map(move |_| &group.unit))
        .enumerate()
        .map(|(slot, unit)| PlacedUnit {
            unit: unit.clone(),
            position: anchor + grid_offset(slot),
            rotation_degrees,
        })
        .collect();

    SpawnPlan {
        player: PlayerId::active(index),
        angle,
        anchor,
        units,
    }
}

pub fn plan_spawns(map_size: u32, player_count: u8, army: &[UnitGroup]) -> Vec<SpawnPlan> {
    (0..player_count)
        .map(|index| plan_player(map_size, index, player_count, army))
        .collect()
}
