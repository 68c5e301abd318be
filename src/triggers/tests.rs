//! Triggers domain: tests for storm pairs and tech events.

use std::collections::HashSet;

use super::{
    DamageState, RewardSpec, StormParams, TechEvent, TriggerGraph, build_storm_events,
    build_tech_events, pair_rewards,
};
use crate::content::{CatalogEntry, CatalogId};
use crate::core::GeneratorError;
use crate::scenario::PlayerId;
use crate::storm::{MapGrid, StormLayout};

fn entry(key: &str, id: u32) -> CatalogEntry {
    CatalogEntry {
        key: key.to_string(),
        id: CatalogId(id),
    }
}

fn params(player_count: u8) -> StormParams {
    StormParams {
        marker: CatalogId(304),
        damage_amount: 3,
        damage_frequency_seconds: 2,
        player_count,
    }
}

fn graph_for(map_size: u32, block_size: u32, storm_seconds: u32) -> TriggerGraph {
    let grid = MapGrid::new(map_size, block_size).unwrap();
    let layout = StormLayout::build(grid, storm_seconds).unwrap();
    TriggerGraph {
        tech_events: build_tech_events(
            2,
            &[entry("FLETCHING", 199)],
            &[RewardSpec {
                tech: entry("BRACER", 201),
                kill_threshold: 5,
            }],
        ),
        storm_events: build_storm_events(&layout.blocks, &params(2)),
    }
}

// -----------------------------------------------------------------------------
// Storm events
// -----------------------------------------------------------------------------

#[test]
fn test_one_storm_event_per_block() {
    let layout = StormLayout::build(MapGrid::new(10, 3).unwrap(), 120).unwrap();
    let events = build_storm_events(&layout.blocks, &params(4));
    assert_eq!(events.len(), layout.blocks.len());

    for (event, timed) in events.iter().zip(&layout.blocks) {
        assert_eq!(event.arm_time, timed.arm_time);
        assert_eq!(event.damage.area, timed.block.rect);
        assert_eq!(event.marker_cells.len() as u64, timed.block.rect.area());
        assert!(event.marker_cells.iter().all(|c| timed.block.rect.contains(*c)));
    }
}

#[test]
fn test_storm_event_names() {
    let layout = StormLayout::build(MapGrid::new(6, 3).unwrap(), 60).unwrap();
    let events = build_storm_events(&layout.blocks, &params(2));
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "0_0_storm_trigger",
            "0_3_storm_trigger",
            "3_0_storm_trigger",
            "3_3_storm_trigger"
        ]
    );
    assert_eq!(events[2].damage.name, "3_0_storm_damage_trigger");
}

#[test]
fn test_damage_starts_dormant_and_has_single_owner() {
    let graph = graph_for(12, 2, 200);
    let mut damage_names = HashSet::new();
    for event in &graph.storm_events {
        assert_eq!(event.damage.initial_state, DamageState::Dormant);
        assert!(damage_names.insert(event.damage.name.clone()));
    }
    assert_eq!(damage_names.len(), graph.storm_events.len());
}

#[test]
fn test_damage_targets_every_active_player() {
    let layout = StormLayout::build(MapGrid::new(4, 2).unwrap(), 10).unwrap();
    let events = build_storm_events(&layout.blocks, &params(3));
    for event in &events {
        assert_eq!(
            event.damage.targets,
            vec![PlayerId(1), PlayerId(2), PlayerId(3)]
        );
        assert_eq!(event.damage.quantity, 3);
        assert_eq!(event.damage.period_seconds, 2);
    }
}

#[test]
fn test_parallel_build_matches_sequential_order() {
    // 80x80 with block size 1 crosses the parallel threshold
    let layout = StormLayout::build(MapGrid::new(80, 1).unwrap(), 900).unwrap();
    let events = build_storm_events(&layout.blocks, &params(2));
    assert_eq!(events.len(), 6400);

    let sequential: Vec<String> = layout
        .blocks
        .iter()
        .map(|b| format!("{}_storm_trigger", b.block.rect.key()))
        .collect();
    let built: Vec<String> = events.iter().map(|e| e.name.clone()).collect();
    assert_eq!(built, sequential);
}

#[test]
fn test_graph_is_deterministic() {
    assert_eq!(graph_for(17, 4, 333), graph_for(17, 4, 333));
}

// -----------------------------------------------------------------------------
// Tech events
// -----------------------------------------------------------------------------

#[test]
fn test_no_initial_event_without_initial_techs() {
    let events = build_tech_events(3, &[], &[]);
    assert!(events.is_empty());
}

#[test]
fn test_initial_tech_event_per_player() {
    let techs = [entry("FLETCHING", 199), entry("BODKIN_ARROW", 200)];
    let events = build_tech_events(3, &techs, &[]);
    assert_eq!(events.len(), 3);
    for (p, event) in events.iter().enumerate() {
        match event {
            TechEvent::Initial {
                name,
                player,
                techs: granted,
            } => {
                assert_eq!(name, &format!("{}_init_trigger", p));
                assert_eq!(*player, PlayerId(p as u8 + 1));
                assert_eq!(granted.len(), 2);
            }
            other => panic!("expected initial tech event, got {:?}", other),
        }
    }
}

#[test]
fn test_reward_events_per_player_and_tech() {
    let rewards = vec![
        RewardSpec {
            tech: entry("FLETCHING", 199),
            kill_threshold: 3,
        },
        RewardSpec {
            tech: entry("BRACER", 201),
            kill_threshold: 10,
        },
    ];
    let events = build_tech_events(2, &[], &rewards);
    let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec![
            "0_0_reward_trigger",
            "0_1_reward_trigger",
            "1_0_reward_trigger",
            "1_1_reward_trigger"
        ]
    );

    match &events[3] {
        TechEvent::Reward {
            player,
            reward,
            notify,
            ..
        } => {
            assert_eq!(*player, PlayerId(2));
            assert_eq!(reward.kill_threshold, 10);
            assert_eq!(notify, &vec![PlayerId(1), PlayerId(2)]);
        }
        other => panic!("expected reward event, got {:?}", other),
    }
}

#[test]
fn test_reward_announcement_names_player_and_tech() {
    let text = TechEvent::announcement(PlayerId(3), &entry("FLETCHING", 199));
    assert_eq!(text, "Player 3 has researched FLETCHING");
}

#[test]
fn test_pair_rewards_length_mismatch() {
    let err = pair_rewards(vec![entry("FLETCHING", 199)], &[1, 2]).unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidParameters(_)));

    let paired = pair_rewards(vec![entry("FLETCHING", 199)], &[7]).unwrap();
    assert_eq!(paired[0].kill_threshold, 7);
}

#[test]
fn test_graph_summary_counts() {
    let graph = graph_for(4, 2, 10);
    // 4 storm events, 2 initial, 2 rewards
    assert_eq!(graph.trigger_count(), 4 * 2 + 2 + 2);
    let summary = graph.summary();
    assert!(summary.contains("4 storm events"));
    assert!(summary.contains("2 reward events"));
}
