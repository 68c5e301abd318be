//! Scenario domain: lowering the trigger graph and spawn plans into store commands.

use crate::core::GeneratorError;
use crate::scenario::store::Scenario;
use crate::scenario::vocabulary::{Attribute, Condition, Effect, PlayerId, TriggerId};
use crate::spawns::SpawnPlan;
use crate::triggers::{DamageEvent, DamageState, StormEvent, TechEvent, TriggerGraph};

/// Counts of what an export added to a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportCounts {
    pub triggers: usize,
    pub units: usize,
}

fn damage_effects(damage: &DamageEvent) -> Vec<Effect> {
    damage
        .targets
        .iter()
        .map(|&player| Effect::DamageArea {
            player,
            x1: damage.area.x0,
            y1: damage.area.y0,
            x2: damage.area.x1(),
            y2: damage.area.y1(),
            amount: damage.quantity,
        })
        .collect()
}

/// The damage trigger goes in first so the storm trigger can name its id.
fn export_storm_event<S: Scenario>(
    scenario: &mut S,
    event: &StormEvent,
) -> Result<TriggerId, GeneratorError> {
    let damage = &event.damage;
    let damage_id = scenario.add_looping_trigger(
        &damage.name,
        Condition::Timer {
            seconds: damage.period_seconds,
        },
        damage_effects(damage),
        damage.initial_state == DamageState::Active,
    )?;

    let mut effects: Vec<Effect> = event
        .marker_cells
        .iter()
        .map(|cell| Effect::PlaceObject {
            kind: event.marker,
            player: PlayerId::GAIA,
            x: cell.x,
            y: cell.y,
        })
        .collect();
    effects.push(Effect::EnableTrigger { trigger: damage_id });

    scenario.add_one_shot_trigger(
        &event.name,
        Condition::Timer {
            seconds: event.arm_time,
        },
        effects,
    )
}

fn export_tech_event<S: Scenario>(
    scenario: &mut S,
    event: &TechEvent,
) -> Result<TriggerId, GeneratorError> {
    match event {
        TechEvent::Initial {
            name,
            player,
            techs,
        } => {
            let effects = techs
                .iter()
                .map(|tech| Effect::ResearchTech {
                    player: *player,
                    tech: tech.id,
                    force: true,
                })
                .collect();
            scenario.add_one_shot_trigger(name, Condition::Always, effects)
        }
        TechEvent::Reward {
            name,
            player,
            reward,
            notify,
        } => {
            let text = TechEvent::announcement(*player, &reward.tech);
            let mut effects = vec![Effect::ResearchTech {
                player: *player,
                tech: reward.tech.id,
                force: true,
            }];
            effects.extend(notify.iter().map(|&to| Effect::BroadcastMessage {
                player: to,
                text: text.clone(),
            }));
            scenario.add_one_shot_trigger(
                name,
                Condition::AccumulateAttribute {
                    player: *player,
                    attribute: Attribute::UnitsKilled,
                    quantity: reward.kill_threshold,
                },
                effects,
            )
        }
    }
}

/// Write every event and unit into `scenario`. Stops at the first trigger
/// the scenario refuses.
pub fn export_generation<S: Scenario>(
    scenario: &mut S,
    map_size: u32,
    player_count: u8,
    graph: &TriggerGraph,
    plans: &[SpawnPlan],
) -> Result<ExportCounts, GeneratorError> {
    scenario.set_active_players(player_count);
    scenario.set_map_size(map_size);

    let mut counts = ExportCounts::default();
    for event in &graph.tech_events {
        export_tech_event(scenario, event)?;
        counts.triggers += 1;
    }
    for event in &graph.storm_events {
        export_storm_event(scenario, event)?;
        counts.triggers += 2;
    }

    for plan in plans {
        for unit in &plan.units {
            scenario.add_unit(
                plan.player,
                unit.unit.id,
                unit.position.x,
                unit.position.y,
                unit.rotation_degrees,
            );
            counts.units += 1;
        }
    }
    Ok(counts)
}
