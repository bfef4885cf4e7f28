//! End-to-end tests for the `learning_packet_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Adaptation over time | Consistent success climbs to the ceiling; consistent failure settles at the floor |
//! | Freshness | No packet repeats an id that was in the recency window when it was built |
//! | Relaxed recency | Repeats are served and reported only when allowed |
//! | Persistence | Profiles and packets survive across engine instances on disk |
//! | Configuration | TOML roster and composition drive `generate_all`; roster ids are case-insensitive |
//! | Themes | A week of packets cycles through seven themes |

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Days, NaiveDate};

use crate::packet_engine::{
    helpers::template, ActivityType, ChildConfig, ChildId, Composition, ContentBank, CycleStage,
    EngineConfig, ErrorKind, JsonFileStore, MemoryStore, Outcome, PacketEngine, ProfileStore,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn start() -> NaiveDate {
    // A Monday.
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

fn nth_day(n: u64) -> NaiveDate {
    start().checked_add_days(Days::new(n)).unwrap()
}

fn roster(ids: &[&str]) -> EngineConfig {
    EngineConfig {
        children: ids
            .iter()
            .map(|id| ChildConfig { id: ChildId::new(id), name: id.to_string(), starting_levels: Default::default(), age: None })
            .collect(),
        ..EngineConfig::default()
    }
}

fn builtin_engine(config: EngineConfig, store: Arc<dyn ProfileStore>) -> PacketEngine {
    PacketEngine::new(config, Arc::new(ContentBank::builtin().unwrap()), store).unwrap()
}

/// Generate for `days` days, answering every activity with `outcome`.
fn simulate(engine: &PacketEngine, child: &ChildId, days: u64, outcome: Outcome) {
    for d in 0..days {
        let packet = engine.generate(child, nth_day(d)).unwrap();
        for id in packet.activity_ids() {
            engine.record(child, id, outcome, nth_day(d)).unwrap();
        }
    }
}

// ── adaptation over time ─────────────────────────────────────────────────────

#[test]
fn steady_success_climbs_every_type_to_the_ceiling() {
    let engine = builtin_engine(roster(&["kid"]), Arc::new(MemoryStore::new()));
    let kid = ChildId::new("kid");
    simulate(&engine, &kid, 20, Outcome::Correct);
    let profile = engine.profile(&kid).unwrap();
    for t in ActivityType::ALL {
        assert_eq!(profile.level(t), Some(5), "{t} did not reach the ceiling");
    }
}

#[test]
fn steady_failure_settles_at_the_floor() {
    let engine = builtin_engine(roster(&["kid"]), Arc::new(MemoryStore::new()));
    let kid = ChildId::new("kid");
    simulate(&engine, &kid, 12, Outcome::Incorrect);
    let profile = engine.profile(&kid).unwrap();
    for t in ActivityType::ALL {
        assert_eq!(profile.level(t), Some(1), "{t} did not reach the floor");
    }
}

#[test]
fn levels_move_at_most_one_step_per_packet() {
    let engine = builtin_engine(roster(&["kid"]), Arc::new(MemoryStore::new()));
    let kid = ChildId::new("kid");
    for d in 0..15 {
        let packet = engine.generate(&kid, nth_day(d)).unwrap();
        for (t, diff) in &packet.difficulty {
            assert!(diff.level.abs_diff(diff.previous_level) <= 1, "{t} jumped on day {d}");
        }
        for id in packet.activity_ids() {
            engine.record(&kid, id, Outcome::Correct, nth_day(d)).unwrap();
        }
    }
}

// ── freshness ────────────────────────────────────────────────────────────────

#[test]
fn packets_never_contain_ids_from_the_recency_window() {
    let engine = builtin_engine(roster(&["kid"]), Arc::new(MemoryStore::new()));
    let kid = ChildId::new("kid");
    for d in 0..14 {
        let window: HashSet<String> = engine.profile(&kid).unwrap().recent().iter().map(str::to_string).collect();
        let packet = engine.generate(&kid, nth_day(d)).unwrap();
        let ids: Vec<&str> = packet.activity_ids().collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate id on day {d}");
        for id in ids {
            assert!(!window.contains(id), "{id} repeated on day {d}");
        }
    }
}

// ── relaxed recency ──────────────────────────────────────────────────────────

fn single_riddle_engine(allow_recent_repeats: bool) -> PacketEngine {
    let bank = ContentBank::from_templates([template("r-only", ActivityType::Riddle, 2, "Riddle", "Q?")]).unwrap();
    let mut config = roster(&["kid"]);
    config.composition = Composition::from_counts([(ActivityType::Riddle, 1)]);
    config.selection.allow_recent_repeats = allow_recent_repeats;
    PacketEngine::new(config, Arc::new(bank), Arc::new(MemoryStore::new())).unwrap()
}

#[test]
fn strict_recency_exhausts_instead_of_repeating() {
    let engine = single_riddle_engine(false);
    let kid = ChildId::new("kid");
    engine.generate(&kid, nth_day(0)).unwrap();
    let failure = engine.generate(&kid, nth_day(1)).unwrap_err();
    assert_eq!(failure.kind(), ErrorKind::ContentExhaustion);
    assert_eq!(failure.stage, CycleStage::Selecting);
    assert!(failure.to_string().contains("riddle"), "{failure}");
}

#[test]
fn relaxed_recency_repeats_and_reports_it() {
    let engine = single_riddle_engine(true);
    let kid = ChildId::new("kid");
    engine.generate(&kid, nth_day(0)).unwrap();
    let packet = engine.generate(&kid, nth_day(1)).unwrap();
    assert_eq!(packet.activity_ids().collect::<Vec<_>>(), vec!["r-only"]);
    assert_eq!(packet.difficulty[&ActivityType::Riddle].repeated, vec!["r-only".to_string()]);
    assert!(packet.parent_notes().contains("repeated"));
}

// ── persistence ──────────────────────────────────────────────────────────────

#[test]
fn profiles_survive_engine_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let store = || -> Arc<dyn ProfileStore> {
        Arc::new(JsonFileStore::new(dir.path().join("profiles"), dir.path().join("packets")))
    };
    let kid = ChildId::new("kid");

    let first = builtin_engine(roster(&["kid"]), store());
    let packet = first.generate(&kid, start()).unwrap();
    let answered = packet.activities[0].id.clone();
    first.record(&kid, &answered, Outcome::Correct, start()).unwrap();
    drop(first);

    let second = builtin_engine(roster(&["kid"]), store());
    let profile = second.profile(&kid).unwrap();
    assert_eq!(profile.history().len(), 1);
    assert_eq!(profile.history()[0].activity_id, answered);
    assert!(profile.recent().contains(&answered));
    assert!(dir.path().join(format!("packets/kid-{}.json", start())).exists());
}

#[test]
fn archived_packet_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("profiles"), dir.path().join("packets")));
    let engine = builtin_engine(roster(&["kid"]), store.clone());
    let packet = engine.generate(&ChildId::new("kid"), start()).unwrap();

    let raw = std::fs::read_to_string(store.packet_path(&packet).unwrap()).unwrap();
    let back: crate::Packet = serde_json::from_str(&raw).unwrap();
    assert_eq!(back.activity_ids().collect::<Vec<_>>(), packet.activity_ids().collect::<Vec<_>>());
    assert_eq!(back.tomorrow_teaser, packet.tomorrow_teaser);
}

// ── configuration ────────────────────────────────────────────────────────────

#[test]
fn toml_roster_drives_generate_all() {
    let config = EngineConfig::from_toml_str(
        r#"
        [composition]
        logic-puzzle = 1
        riddle = 3

        [[children]]
        id = "dahlia"
        name = "Dahlia"
        starting_levels = { riddle = 4 }

        [[children]]
        id = "xander"
        name = "Xander"
        "#,
    )
    .unwrap();
    let engine = builtin_engine(config, Arc::new(MemoryStore::new()));
    let report = engine.generate_all(start());
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert_eq!(report.packets.len(), 2);
    for packet in &report.packets {
        assert_eq!(packet.activities.len(), 4);
    }
    let dahlia = report.packets.iter().find(|p| p.child_name == "Dahlia").unwrap();
    assert_eq!(dahlia.difficulty[&ActivityType::Riddle].level, 4);
}

#[test]
fn mixed_case_roster_id_reaches_the_same_child_everywhere() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::from_toml_str(
        r#"
        [[children]]
        id = "Dahlia"
        name = "Dahlia"
        age = 8

        [[children]]
        id = "Xander"
        name = "Xander"
        "#,
    )
    .unwrap();
    let store = Arc::new(JsonFileStore::new(dir.path().join("profiles"), dir.path().join("packets")));
    let engine = builtin_engine(config, store);

    let report = engine.generate_all(start());
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert!(report.packets.iter().any(|p| p.child_id.as_str() == "dahlia"));
    assert!(dir.path().join("profiles/dahlia.json").exists());

    let dahlia = "Dahlia".parse::<ChildId>().unwrap();
    let packet = engine.generate(&dahlia, nth_day(1)).unwrap();
    engine.record(&ChildId::new("dahlia"), &packet.activities[0].id, Outcome::Correct, nth_day(1)).unwrap();
    let profile = engine.profile(&dahlia).unwrap();
    assert_eq!(profile.history().len(), 1);
    assert!(profile.recent().contains(&packet.activities[0].id));
}

// ── themes ───────────────────────────────────────────────────────────────────

#[test]
fn a_week_cycles_through_seven_themes() {
    let engine = builtin_engine(roster(&["kid"]), Arc::new(MemoryStore::new()));
    let themes: HashSet<String> = (0..7)
        .map(|d| engine.preview(&ChildId::new("kid"), nth_day(d)).unwrap().theme)
        .collect();
    assert_eq!(themes.len(), 7);
    let monday = engine.preview(&ChildId::new("kid"), start()).unwrap();
    assert_eq!(monday.theme, "adventure");
}
