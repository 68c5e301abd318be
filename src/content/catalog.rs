//! Catalog of unit, tech and object identifiers keyed by name.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::GeneratorError;

/// Opaque host identifier for a unit, tech or placeable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(pub u32);

/// Which table a key is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Unit,
    Tech,
    Object,
}

impl CatalogKind {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Unit => "unit",
            CatalogKind::Tech => "tech",
            CatalogKind::Object => "object",
        }
    }
}

/// A resolved catalog key: the normalized name plus its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    pub key: String,
    pub id: CatalogId,
}

/// Key of the object placed on every storm cell.
pub const STORM_MARKER_KEY: &str = "BONFIRE";

const BUILTIN_UNITS: &[(&str, u32)] = &[
    ("ARCHER", 4),
    ("HAND_CANNONEER", 5),
    ("ELITE_SKIRMISHER", 6),
    ("SKIRMISHER", 7),
    ("LONGBOWMAN", 8),
    ("MANGUDAI", 11),
    ("CROSSBOWMAN", 24),
    ("KNIGHT", 38),
    ("CAVALRY_ARCHER", 39),
    ("MILITIA", 74),
    ("MAN_AT_ARMS", 75),
    ("LONG_SWORDSMAN", 77),
    ("VILLAGER_MALE", 83),
    ("SPEARMAN", 93),
    ("MONK", 125),
    ("CAVALIER", 283),
    ("PIKEMAN", 358),
    ("HALBERDIER", 359),
    ("HUSSAR", 441),
    ("SCOUT_CAVALRY", 448),
    ("TWO_HANDED_SWORDSMAN", 473),
    ("ARBALESTER", 492),
    ("LIGHT_CAVALRY", 546),
    ("CHAMPION", 567),
    ("PALADIN", 569),
];

const BUILTIN_TECHS: &[(&str, u32)] = &[
    ("HUSBANDRY", 39),
    ("CHEMISTRY", 47),
    ("FORGING", 67),
    ("IRON_CASTING", 68),
    ("SCALE_MAIL_ARMOR", 74),
    ("BLAST_FURNACE", 75),
    ("CHAIN_MAIL_ARMOR", 76),
    ("PLATE_MAIL_ARMOR", 77),
    ("PLATE_BARDING_ARMOR", 80),
    ("SCALE_BARDING_ARMOR", 81),
    ("CHAIN_BARDING_ARMOR", 82),
    ("BALLISTICS", 93),
    ("FLETCHING", 199),
    ("BODKIN_ARROW", 200),
    ("BRACER", 201),
    ("PADDED_ARCHER_ARMOR", 211),
    ("LEATHER_ARCHER_ARMOR", 212),
    ("SQUIRES", 215),
    ("RING_ARCHER_ARMOR", 219),
    ("BLOODLINES", 435),
    ("THUMB_RING", 437),
];

const BUILTIN_OBJECTS: &[(&str, u32)] = &[(STORM_MARKER_KEY, 304)];

/// Reduce a user-supplied key to its catalog form.
///
/// Accepts bare keys (`crossbowman`) and dataset-qualified names
/// (`UnitInfo.CROSSBOWMAN.ID`); both normalize to `CROSSBOWMAN`.
pub fn normalize_key(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut segments = trimmed.split('.');
    let first = segments.next().unwrap_or_default();
    let name = segments.next().unwrap_or(first);
    name.trim().to_ascii_uppercase()
}

/// Enumerated mapping from string keys to host ids.
#[derive(Resource, Debug, Clone, Default)]
pub struct Catalog {
    pub units: HashMap<String, CatalogId>,
    pub techs: HashMap<String, CatalogId>,
    pub objects: HashMap<String, CatalogId>,
}

impl Catalog {
    /// Catalog with the built-in tables.
    pub fn builtin() -> Self {
        fn table(entries: &[(&str, u32)]) -> HashMap<String, CatalogId> {
            entries
                .iter()
                .map(|(key, id)| (key.to_string(), CatalogId(*id)))
                .collect()
        }

        Self {
            units: table(BUILTIN_UNITS),
            techs: table(BUILTIN_TECHS),
            objects: table(BUILTIN_OBJECTS),
        }
    }

    fn table(&self, kind: CatalogKind) -> &HashMap<String, CatalogId> {
        match kind {
            CatalogKind::Unit => &self.units,
            CatalogKind::Tech => &self.techs,
            CatalogKind::Object => &self.objects,
        }
    }

    fn table_mut(&mut self, kind: CatalogKind) -> &mut HashMap<String, CatalogId> {
        match kind {
            CatalogKind::Unit => &mut self.units,
            CatalogKind::Tech => &mut self.techs,
            CatalogKind::Object => &mut self.objects,
        }
    }

    /// Add or replace an entry. The key is normalized first.
    pub fn insert(&mut self, kind: CatalogKind, key: &str, id: CatalogId) -> Option<CatalogId> {
        self.table_mut(kind).insert(normalize_key(key), id)
    }

    /// Resolve a key, failing with `InvalidParameters` when it is unknown.
    pub fn resolve(&self, kind: CatalogKind, raw: &str) -> Result<CatalogEntry, GeneratorError> {
        let key = normalize_key(raw);
        match self.table(kind).get(&key) {
            Some(id) => Ok(CatalogEntry { key, id: *id }),
            None => Err(GeneratorError::invalid_parameters(format!(
                "unknown {} '{}' (normalized to '{}')",
                kind.label(),
                raw,
                key
            ))),
        }
    }

    /// Resolve every key in order, stopping at the first unknown one.
    pub fn resolve_all(
        &self,
        kind: CatalogKind,
        raw_keys: &[String],
    ) -> Result<Vec<CatalogEntry>, GeneratorError> {
        raw_keys.iter().map(|raw| self.resolve(kind, raw)).collect()
    }

    /// Returns a summary of table sizes for logging.
    pub fn summary(&self) -> String {
        format!(
            "Catalog loaded: {} units, {} techs, {} objects",
            self.units.len(),
            self.techs.len(),
            self.objects.len()
        )
    }
}
