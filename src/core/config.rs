//! Core domain: command-line flags, RON recipes and the validated config.

use bevy::prelude::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

use crate::content::{Catalog, CatalogEntry, CatalogKind, STORM_MARKER_KEY};
use crate::core::GeneratorError;
use crate::spawns::{UnitGroup, pair_units};
use crate::storm::MapGrid;
use crate::triggers::{RewardSpec, pair_rewards};

pub const DEFAULT_BLOCK_SIZE: u32 = 1;
pub const DEFAULT_PLAYER_COUNT: u32 = 2;
pub const DEFAULT_DAMAGE_FREQUENCY_SECONDS: u32 = 1;
pub const DEFAULT_DAMAGE_AMOUNT: u32 = 3;
/// Player slots the host supports besides gaia.
pub const MAX_PLAYERS: u32 = 8;

#[derive(Parser, Resource, Debug, Clone, Default)]
#[command(name = "micro-royale-gen")]
#[command(about = "Generate storm, tech reward and spawn triggers for a battle royale scenario")]
pub struct Args {
    /// Scenario to start from
    #[arg(long = "base-map")]
    pub base_map: Option<PathBuf>,

    /// Where to write the generated scenario
    #[arg(long = "out-file")]
    pub out_file: Option<PathBuf>,

    /// Side length of the map in tiles (defaults to the base scenario's size)
    #[arg(long = "map-size", allow_negative_numbers = true)]
    pub map_size: Option<i64>,

    #[arg(long = "player-count", allow_negative_numbers = true)]
    pub player_count: Option<i64>,

    /// Seconds until the storm reaches the center of the map
    #[arg(long = "storm-seconds", allow_negative_numbers = true)]
    pub storm_seconds: Option<i64>,

    #[arg(long = "damage-frequency-in-seconds", allow_negative_numbers = true)]
    pub damage_frequency_in_seconds: Option<i64>,

    #[arg(long = "damage-amount", allow_negative_numbers = true)]
    pub damage_amount: Option<i64>,

    /// Side length of each storm area; larger blocks mean fewer triggers and
    /// a less smooth circle
    #[arg(long = "block-size", allow_negative_numbers = true)]
    pub block_size: Option<i64>,

    /// [MULTIPLE] Unit to give every player, e.g. CROSSBOWMAN or UnitInfo.CROSSBOWMAN.ID
    #[arg(long = "unit-to-generate")]
    pub unit_to_generate: Vec<String>,

    /// [MULTIPLE] Number of the matching --unit-to-generate unit
    #[arg(long = "unit-count", allow_negative_numbers = true)]
    pub unit_count: Vec<i64>,

    /// [MULTIPLE] Tech researched by every player at start
    #[arg(long = "tech-to-provide")]
    pub tech_to_provide: Vec<String>,

    /// [MULTIPLE] Tech researched by a player after reaching a kill goal
    #[arg(long = "tech-reward")]
    pub tech_reward: Vec<String>,

    /// [MULTIPLE] Kill goal for the matching --tech-reward
    #[arg(long = "tech-reward-kill-amount", allow_negative_numbers = true)]
    pub tech_reward_kill_amount: Vec<i64>,

    /// RON recipe providing any of the settings above
    #[arg(long)]
    pub recipe: Option<PathBuf>,

    /// RON file adding unit/tech/object ids to the built-in catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Build and log everything but do not write the output scenario
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecipeUnit {
    pub unit: String,
    pub count: i64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecipeReward {
    pub tech: String,
    pub kills: i64,
}

/// Settings read from a `--recipe` RON file. Every field is optional.
///
/// ```ron
/// (
///     storm_seconds: 600,
///     block_size: 3,
///     units: [(unit: "CROSSBOWMAN", count: 20)],
///     rewards: [(tech: "FLETCHING", kills: 5)],
/// )
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecipeFile {
    pub base_map: Option<PathBuf>,
    pub out_file: Option<PathBuf>,
    pub map_size: Option<i64>,
    pub player_count: Option<i64>,
    pub storm_seconds: Option<i64>,
    pub damage_frequency_in_seconds: Option<i64>,
    pub damage_amount: Option<i64>,
    pub block_size: Option<i64>,
    pub marker: Option<String>,
    pub units: Vec<RecipeUnit>,
    pub techs: Vec<String>,
    pub rewards: Vec<RecipeReward>,
}

/// Flags merged over the recipe, not yet validated.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub base_map: Option<PathBuf>,
    pub out_file: Option<PathBuf>,
    pub map_size: Option<i64>,
    pub player_count: Option<i64>,
    pub storm_seconds: Option<i64>,
    pub damage_frequency_seconds: Option<i64>,
    pub damage_amount: Option<i64>,
    pub block_size: Option<i64>,
    pub marker: Option<String>,
    pub unit_types: Vec<String>,
    pub unit_counts: Vec<i64>,
    pub initial_techs: Vec<String>,
    pub reward_techs: Vec<String>,
    pub reward_kills: Vec<i64>,
    pub dry_run: bool,
}

impl Settings {
    /// Flags win over recipe values; a list given on the command line
    /// replaces the recipe's list as a whole.
    pub fn merge(args: &Args, recipe: RecipeFile) -> Self {
        let (recipe_types, recipe_counts): (Vec<_>, Vec<_>) =
            recipe.units.into_iter().map(|u| (u.unit, u.count)).unzip();
        let (recipe_rewards, recipe_kills): (Vec<_>, Vec<_>) =
            recipe.rewards.into_iter().map(|r| (r.tech, r.kills)).unzip();

        let units_from_args = !args.unit_to_generate.is_empty() || !args.unit_count.is_empty();
        let rewards_from_args =
            !args.tech_reward.is_empty() || !args.tech_reward_kill_amount.is_empty();

        Self {
            base_map: args.base_map.clone().or(recipe.base_map),
            out_file: args.out_file.clone().or(recipe.out_file),
            map_size: args.map_size.or(recipe.map_size),
            player_count: args.player_count.or(recipe.player_count),
            storm_seconds: args.storm_seconds.or(recipe.storm_seconds),
            damage_frequency_seconds: args
                .damage_frequency_in_seconds
                .or(recipe.damage_frequency_in_seconds),
            damage_amount: args.damage_amount.or(recipe.damage_amount),
            block_size: args.block_size.or(recipe.block_size),
            marker: recipe.marker,
            unit_types: if units_from_args {
                args.unit_to_generate.clone()
            } else {
                recipe_types
            },
            unit_counts: if units_from_args {
                args.unit_count.clone()
            } else {
                recipe_counts
            },
            initial_techs: if args.tech_to_provide.is_empty() {
                recipe.techs
            } else {
                args.tech_to_provide.clone()
            },
            reward_techs: if rewards_from_args {
                args.tech_reward.clone()
            } else {
                recipe_rewards
            },
            reward_kills: if rewards_from_args {
                args.tech_reward_kill_amount.clone()
            } else {
                recipe_kills
            },
            dry_run: args.dry_run,
        }
    }
}

/// Validated generator input. Building one checks every setting, so the
/// stages downstream cannot fail on bad input.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub base_map: PathBuf,
    /// Absent only for dry runs.
    pub out_file: Option<PathBuf>,
    pub grid: MapGrid,
    pub player_count: u8,
    pub storm_seconds: u32,
    pub damage_frequency_seconds: u32,
    pub damage_amount: u32,
    pub marker: CatalogEntry,
    pub army: Vec<UnitGroup>,
    pub initial_techs: Vec<CatalogEntry>,
    pub rewards: Vec<RewardSpec>,
    pub dry_run: bool,
}

fn positive_geometry(name: &str, value: i64) -> Result<u32, GeneratorError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            GeneratorError::invalid_geometry(format!(
                "{} must be a positive integer, got {}",
                name, value
            ))
        })
}

fn positive(name: &str, value: i64) -> Result<u32, GeneratorError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| {
            GeneratorError::invalid_parameters(format!(
                "{} must be a positive integer, got {}",
                name, value
            ))
        })
}

fn required<T>(name: &str, value: Option<T>) -> Result<T, GeneratorError> {
    value.ok_or_else(|| GeneratorError::invalid_parameters(format!("missing required {}", name)))
}

fn positive_list(name: &str, values: &[i64]) -> Result<Vec<u32>, GeneratorError> {
    values.iter().map(|&v| positive(name, v)).collect()
}

impl GeneratorConfig {
    /// Validate `settings`. `scenario_map_size` is the base scenario's size,
    /// used when no map size was given.
    pub fn resolve(
        settings: &Settings,
        catalog: &Catalog,
        scenario_map_size: u32,
    ) -> Result<Self, GeneratorError> {
        let map_size = match settings.map_size {
            Some(size) => positive_geometry("map size", size)?,
            None if scenario_map_size > 0 => scenario_map_size,
            None => {
                return Err(GeneratorError::invalid_geometry(
                    "no map size given and the base scenario has none",
                ));
            }
        };
        let block_size = match settings.block_size {
            Some(size) => positive_geometry("block size", size)?,
            None => DEFAULT_BLOCK_SIZE,
        };
        let grid = MapGrid::new(map_size, block_size)?;

        let player_count = match settings.player_count {
            Some(count) => positive("player count", count)?,
            None => DEFAULT_PLAYER_COUNT,
        };
        if player_count > MAX_PLAYERS {
            return Err(GeneratorError::invalid_parameters(format!(
                "player count must be at most {}, got {}",
                MAX_PLAYERS, player_count
            )));
        }

        let storm_seconds = positive(
            "storm seconds",
            required("storm seconds", settings.storm_seconds)?,
        )?;
        let damage_frequency_seconds = match settings.damage_frequency_seconds {
            Some(seconds) => positive("damage frequency", seconds)?,
            None => DEFAULT_DAMAGE_FREQUENCY_SECONDS,
        };
        let damage_amount = match settings.damage_amount {
            Some(amount) => positive("damage amount", amount)?,
            None => DEFAULT_DAMAGE_AMOUNT,
        };

        // list lengths are checked before any key is looked up
        if settings.unit_types.len() != settings.unit_counts.len() {
            return Err(GeneratorError::invalid_parameters(format!(
                "{} unit types but {} unit counts",
                settings.unit_types.len(),
                settings.unit_counts.len()
            )));
        }
        if settings.reward_techs.len() != settings.reward_kills.len() {
            return Err(GeneratorError::invalid_parameters(format!(
                "{} reward techs but {} kill thresholds",
                settings.reward_techs.len(),
                settings.reward_kills.len()
            )));
        }

        let unit_counts = positive_list("unit count", &settings.unit_counts)?;
        let army = pair_units(
            catalog.resolve_all(CatalogKind::Unit, &settings.unit_types)?,
            &unit_counts,
        )?;
        let initial_techs = catalog.resolve_all(CatalogKind::Tech, &settings.initial_techs)?;
        let kill_thresholds = positive_list("tech reward kill amount", &settings.reward_kills)?;
        let rewards = pair_rewards(
            catalog.resolve_all(CatalogKind::Tech, &settings.reward_techs)?,
            &kill_thresholds,
        )?;
        let marker = catalog.resolve(
            CatalogKind::Object,
            settings.marker.as_deref().unwrap_or(STORM_MARKER_KEY),
        )?;

        Ok(Self {
            base_map: required("base map", settings.base_map.clone())?,
            out_file: if settings.dry_run {
                settings.out_file.clone()
            } else {
                Some(required("out file", settings.out_file.clone())?)
            },
            grid,
            player_count: player_count as u8,
            storm_seconds,
            damage_frequency_seconds,
            damage_amount,
            marker,
            army,
            initial_techs,
            rewards,
            dry_run: settings.dry_run,
        })
    }
}
