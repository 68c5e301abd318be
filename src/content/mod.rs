//! Content domain: the unit/tech/object catalog and RON file loading.

mod catalog;
mod loader;

pub use catalog::{
    Catalog, CatalogEntry, CatalogId, CatalogKind, STORM_MARKER_KEY, normalize_key,
};
pub use loader::{
    CatalogFile, ContentLoadError, apply_catalog_file, load_catalog, load_ron_file, parse_ron,
};

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{Args, GeneratorStage, PipelineFailed};

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_catalog_system.in_set(GeneratorStage::Load));
    }
}

/// Loads the catalog (built-ins plus `--catalog`) into a resource.
fn load_catalog_system(
    mut commands: Commands,
    args: Res<Args>,
    mut failures: MessageWriter<PipelineFailed>,
) {
    match load_catalog(args.catalog.as_deref()) {
        Ok(catalog) => {
            info!("{}", catalog.summary());
            commands.insert_resource(catalog);
        }
        Err(e) => {
            failures.write(PipelineFailed::new("content", e.into()));
        }
    }
}
