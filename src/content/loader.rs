//! Loader for RON recipe and catalog files.

use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::catalog::{Catalog, CatalogId, CatalogKind};

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Extra catalog entries, merged over the built-in tables.
///
/// ```ron
/// (
///     units: { "CHAMPION": 567 },
///     techs: { "HERESY": 439 },
/// )
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub units: BTreeMap<String, u32>,
    #[serde(default)]
    pub techs: BTreeMap<String, u32>,
    #[serde(default)]
    pub objects: BTreeMap<String, u32>,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse RON text, labelling errors with `file_name`.
pub fn parse_ron<T>(file_name: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct from disk.
pub fn load_ron_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_ron(&file_name, &contents)
}

/// Merge a catalog file over `catalog`, logging any overridden keys.
pub fn apply_catalog_file(catalog: &mut Catalog, file: CatalogFile) {
    let tables = [
        (CatalogKind::Unit, file.units),
        (CatalogKind::Tech, file.techs),
        (CatalogKind::Object, file.objects),
    ];

    for (kind, entries) in tables {
        for (key, id) in entries {
            if let Some(previous) = catalog.insert(kind, &key, CatalogId(id)) {
                debug!(
                    "Catalog {} '{}' overridden: {} -> {}",
                    kind.label(),
                    key,
                    previous.0,
                    id
                );
            }
        }
    }
}

/// Build the catalog: built-in tables plus the optional extension file.
pub fn load_catalog(extension: Option<&Path>) -> Result<Catalog, ContentLoadError> {
    let mut catalog = Catalog::builtin();
    if let Some(path) = extension {
        let file = load_ron_file::<CatalogFile>(path)?;
        apply_catalog_file(&mut catalog, file);
    }
    Ok(catalog)
}
