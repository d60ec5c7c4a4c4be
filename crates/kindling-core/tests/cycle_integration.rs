//! Integration tests for multi-cycle play.
//!
//! These walk the orchestrator across several cycles with a fixed clock and
//! check streak growth, lapses, tier progression and persistence.

use chrono::NaiveDate;
use kindling_core::clock::add_days;
use kindling_core::storage::APP_STATE_KEY;
use kindling_core::{
    AppState, Catalog, CompletionReport, CycleOrchestrator, CycleStatus, Database, Difficulty,
    FixedClock, LocalGateway, LossOutcome, MemoryGateway, PcgRandom, PersistenceGateway,
    ScriptedRandom, CYCLE_LENGTH_DAYS,
};

fn day(offset: i64) -> NaiveDate {
    add_days(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(), offset)
}

fn report(game_id: &str) -> CompletionReport {
    CompletionReport {
        game_id: game_id.to_string(),
        metric: "score".to_string(),
        value: 100.0,
        attempts: None,
        time_secs: None,
    }
}

/// Load then win on `offset`, returning the game played.
fn play_cycle<G: PersistenceGateway>(orch: &mut CycleOrchestrator<G>, offset: i64) -> String {
    orch.set_clock(FixedClock::new(day(offset)));
    let bundle = orch.load();
    let game_id = bundle.game.expect("builtin catalog has games").id;
    let outcome = orch.complete(report(&game_id));
    assert!(outcome.result.advanced(), "cycle on day {offset} should advance");
    game_id
}

#[test]
fn test_streak_grows_one_per_cycle() {
    let gateway = MemoryGateway::new();
    let mut orch = CycleOrchestrator::new(&gateway, Catalog::builtin().unwrap())
        .with_rng(PcgRandom::seeded(11));

    for cycle in 0..5 {
        play_cycle(&mut orch, cycle * CYCLE_LENGTH_DAYS);
    }

    let state = gateway.load();
    assert_eq!(state.streak, 5);
    assert_eq!(state.longest_streak, 5);
    assert_eq!(state.played_games.len(), 5);
    assert_eq!(state.total_visits, 5);
    assert_eq!(state.last_streak_update_date, Some(day(12)));
    assert_eq!(state.next_available_date, Some(day(15)));
}

#[test]
fn test_lapse_without_freeze_resets_but_keeps_longest() {
    let gateway = MemoryGateway::new();
    // 0.9 never earns a freeze; the rest of the draws do not matter.
    let mut orch = CycleOrchestrator::new(&gateway, Catalog::builtin().unwrap())
        .with_rng(ScriptedRandom::new(Vec::<f64>::new()).with_fallback(0.9));

    play_cycle(&mut orch, 0);
    play_cycle(&mut orch, 3);
    assert_eq!(gateway.load().streak_freezes, 0);

    orch.set_clock(FixedClock::new(day(8)));
    let bundle = orch.load();
    assert_eq!(
        bundle.loss,
        LossOutcome::StreakLost {
            days_since_update: 5,
            previous: 2
        }
    );
    assert_eq!(bundle.summary.streak, 0);
    assert_eq!(bundle.summary.longest_streak, 2);
    assert!(bundle.refreshed);

    let outcome = orch.complete(report(&bundle.game.unwrap().id));
    assert_eq!(outcome.result.new_streak, 1);
    assert_eq!(gateway.load().longest_streak, 2);
}

#[test]
fn test_freeze_bridges_a_missed_cycle() {
    let gateway = MemoryGateway::new();
    // The first completion rolls 0.0 and earns a freeze.
    let mut orch = CycleOrchestrator::new(&gateway, Catalog::builtin().unwrap())
        .with_rng(ScriptedRandom::new(Vec::<f64>::new()).with_fallback(0.0));

    play_cycle(&mut orch, 0);
    assert_eq!(gateway.load().streak_freezes, 1);

    orch.set_clock(FixedClock::new(day(6)));
    let bundle = orch.load();
    assert!(matches!(bundle.loss, LossOutcome::FreezeConsumed { .. }));
    assert_eq!(bundle.summary.streak, 1);
    assert_eq!(
        bundle.status,
        CycleStatus::AtRisk {
            days_since_update: 6
        }
    );

    // Reloading the same day must not drain another freeze.
    let again = orch.load();
    assert_eq!(again.loss, LossOutcome::AlreadyChecked);
    assert!(!again.refreshed);

    let outcome = orch.complete(report(&bundle.game.unwrap().id));
    assert_eq!(outcome.result.new_streak, 2);
}

#[test]
fn test_tier_opens_medium_games_at_ten() {
    let state = AppState {
        streak: 9,
        longest_streak: 9,
        last_streak_update_date: Some(day(0)),
        next_available_date: Some(day(3)),
        ..Default::default()
    };
    let gateway = MemoryGateway::with_state(&state);
    let mut orch = CycleOrchestrator::new(&gateway, Catalog::builtin().unwrap())
        .with_rng(PcgRandom::seeded(3));

    play_cycle(&mut orch, 3);
    assert_eq!(gateway.load().streak, 10);

    for cycle in 2..8 {
        orch.set_clock(FixedClock::new(day(cycle * CYCLE_LENGTH_DAYS)));
        let game = orch.load().game.unwrap();
        assert_eq!(game.difficulty, Difficulty::Medium);
        orch.complete(report(&game.id));
    }
}

#[test]
fn test_photo_rotation_covers_catalog_before_repeating() {
    let gateway = MemoryGateway::new();
    let catalog = Catalog::builtin().unwrap();
    let photo_count = catalog.photos.len();
    let mut orch = CycleOrchestrator::new(&gateway, catalog).with_rng(PcgRandom::seeded(99));

    let mut seen = Vec::new();
    for cycle in 0..photo_count as i64 {
        orch.set_clock(FixedClock::new(day(cycle * CYCLE_LENGTH_DAYS)));
        let bundle = orch.load();
        seen.push(bundle.photo.unwrap().id);
        orch.complete(report(&bundle.game.unwrap().id));
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), photo_count);
}

#[test]
fn test_local_gateway_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("kindling.db");

    let game_id = {
        let gateway = LocalGateway::new(Database::open_at(&db_path).unwrap());
        let mut orch = CycleOrchestrator::new(gateway, Catalog::builtin().unwrap())
            .with_clock(FixedClock::new(day(0)))
            .with_rng(PcgRandom::seeded(5));
        let game_id = orch.load().game.unwrap().id;
        orch.complete(report(&game_id));
        game_id
    };

    let reopened = LocalGateway::new(Database::open_at(&db_path).unwrap());
    let stored = reopened
        .database()
        .kv_get(APP_STATE_KEY)
        .unwrap()
        .expect("snapshot written");
    assert!(stored.contains(&game_id));

    let mut orch = CycleOrchestrator::new(reopened, Catalog::builtin().unwrap())
        .with_clock(FixedClock::new(day(1)));
    let bundle = orch.load();
    assert!(!bundle.refreshed);
    assert_eq!(bundle.game.unwrap().id, game_id);
    assert_eq!(bundle.summary.streak, 1);
    assert_eq!(bundle.status, CycleStatus::Locked { until: day(3) });
}
