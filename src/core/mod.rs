//! Core domain: settings, validated config, errors and stage ordering.

mod config;
mod error;

pub use config::{
    Args, DEFAULT_BLOCK_SIZE, DEFAULT_DAMAGE_AMOUNT, DEFAULT_DAMAGE_FREQUENCY_SECONDS,
    DEFAULT_PLAYER_COUNT, GeneratorConfig, MAX_PLAYERS, RecipeFile, RecipeReward, RecipeUnit,
    Settings,
};
pub use error::GeneratorError;

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::content::{Catalog, load_ron_file};
use crate::scenario::{BaseScenario, GenerationReport, Scenario};

/// Ordered generator stages. Each runs once, at Startup.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorStage {
    /// Read flags, recipe and catalog.
    Load,
    /// Open the base scenario.
    Open,
    /// Validate everything into a `GeneratorConfig`.
    Resolve,
    Partition,
    Build,
    Plan,
    /// Hand the results to the scenario store.
    Export,
    /// Log the outcome and set the exit code.
    Finish,
}

/// Message fired when a stage fails. Later stages see their input resource
/// missing and skip.
#[derive(Debug)]
pub struct PipelineFailed {
    pub stage: &'static str,
    pub error: GeneratorError,
}

impl PipelineFailed {
    pub fn new(stage: &'static str, error: GeneratorError) -> Self {
        Self { stage, error }
    }
}

impl Message for PipelineFailed {}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PipelineFailed>()
            .configure_sets(
                Startup,
                (
                    GeneratorStage::Load,
                    GeneratorStage::Open,
                    GeneratorStage::Resolve,
                    GeneratorStage::Partition,
                    GeneratorStage::Build,
                    GeneratorStage::Plan,
                    GeneratorStage::Export,
                    GeneratorStage::Finish,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (
                    load_settings.in_set(GeneratorStage::Load),
                    resolve_config.in_set(GeneratorStage::Resolve),
                    report_outcome.in_set(GeneratorStage::Finish),
                ),
            );
    }
}

/// Merge command-line flags over the optional recipe file.
fn load_settings(
    mut commands: Commands,
    args: Res<Args>,
    mut failures: MessageWriter<PipelineFailed>,
) {
    let recipe = match args.recipe.as_deref() {
        Some(path) => match load_ron_file::<RecipeFile>(path) {
            Ok(recipe) => {
                info!("Loaded recipe {}", path.display());
                recipe
            }
            Err(e) => {
                failures.write(PipelineFailed::new("settings", e.into()));
                return;
            }
        },
        None => RecipeFile::default(),
    };

    commands.insert_resource(Settings::merge(&args, recipe));
}

fn resolve_config(
    mut commands: Commands,
    settings: Option<Res<Settings>>,
    catalog: Option<Res<Catalog>>,
    base: Option<Res<BaseScenario>>,
    mut failures: MessageWriter<PipelineFailed>,
) {
    let (Some(settings), Some(catalog), Some(base)) = (settings, catalog, base) else {
        return;
    };

    match GeneratorConfig::resolve(&settings, &catalog, base.0.map_size()) {
        Ok(config) => {
            info!(
                "Generating for {} players on a {}x{} map \
                 (block size {}, storm {}s, {} damage every {}s)",
                config.player_count,
                config.grid.map_size(),
                config.grid.map_size(),
                config.grid.block_size(),
                config.storm_seconds,
                config.damage_amount,
                config.damage_frequency_seconds
            );
            commands.insert_resource(config);
        }
        Err(e) => {
            failures.write(PipelineFailed::new("config", e));
        }
    }
}

fn report_outcome(
    mut failures: MessageReader<PipelineFailed>,
    report: Option<Res<GenerationReport>>,
    mut exit: MessageWriter<AppExit>,
) {
    let mut failed = false;
    for failure in failures.read() {
        error!(
            "Generation failed in {} stage ({}): {}",
            failure.stage,
            failure.error.kind(),
            failure.error
        );
        failed = true;
    }

    if failed {
        exit.write(AppExit::error());
        return;
    }

    if let Some(report) = report {
        info!("{}", report.summary());
    }
    exit.write(AppExit::Success);
}
