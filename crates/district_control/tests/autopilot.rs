//! Long headless runs.
//!
//! These tests drive the full command + background tick loop with the
//! autopilot for each role and check that the session stays within bounds,
//! never issues a rejected command, and actually progresses.

use chrono::Duration;
use district_control::{AutopilotController, CommandSource};
use district_core::test_fixtures::{base_content, base_state, epoch};
use district_core::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

struct RunSummary {
    state: GameState,
    rejections: Vec<String>,
    events: usize,
}

fn run_autopilot(role: Role, ticks: u64, seed: u64) -> RunSummary {
    let content = base_content();
    let state = base_state(&content);
    run_session(&content, state, role, ticks, seed)
}

fn run_session(
    content: &GameContent,
    mut state: GameState,
    role: Role,
    ticks: u64,
    seed: u64,
) -> RunSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut autopilot = AutopilotController::new(role);
    let mut rejections = Vec::new();
    let mut events = 0;
    let step = Duration::seconds(content.constants.background_tick_secs as i64);

    for i in 0..ticks {
        let now = epoch() + step * i as i32;
        for command in autopilot.generate_commands(&state, content) {
            match apply_command(&mut state, content, &command, &mut rng, now) {
                Ok(report) => events += report.events.len(),
                Err(err) => rejections.push(format!("tick {i}: {command:?}: {err}")),
            }
        }
        events += tick(&mut state, content, &mut rng, now).len();
        assert_bounds(&state);
    }
    RunSummary {
        state,
        rejections,
        events,
    }
}

fn assert_bounds(state: &GameState) {
    let p = &state.player;
    assert!(p.health <= p.max_health, "health {} > {}", p.health, p.max_health);
    assert!(p.energy <= p.max_energy, "energy {} > {}", p.energy, p.max_energy);
    for district in &state.districts {
        assert!(district.crime <= 100 && district.prosperity <= 100);
    }
}

#[test]
fn every_role_progresses_without_rejections() {
    for role in Role::ALL {
        let summary = run_autopilot(role, 600, 42);
        assert!(
            summary.rejections.is_empty(),
            "{role:?} autopilot issued rejected commands: {:#?}",
            &summary.rejections[..summary.rejections.len().min(5)]
        );
        assert_eq!(summary.state.player.role, Some(role));
        assert!(
            summary.state.player.max_xp > 100,
            "{role:?} never levelled or trained in 600 ticks"
        );
        assert!(summary.events > 600, "{role:?} produced only {} events", summary.events);
        assert_eq!(summary.state.meta.tick, 600);
    }
}

#[test]
fn gangster_pushes_crime_up_detective_pushes_it_down() {
    let gangster = run_autopilot(Role::Gangster, 300, 7);
    let detective = run_autopilot(Role::Detective, 300, 7);
    let start = base_state(&base_content()).districts[0].crime;

    assert!(gangster.state.districts[0].crime > start);
    assert!(detective.state.districts[0].crime < start);
}

#[test]
fn same_seed_same_session() {
    let a = run_autopilot(Role::Civilian, 200, 99);
    let b = run_autopilot(Role::Civilian, 200, 99);
    assert_eq!(a.state, b.state);
}

#[test]
fn shipped_content_supports_a_long_run() {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let content = district_world::load_content(&format!("{manifest}/../../content"))
        .expect("shipped content should load");
    let state = district_world::build_initial_state(&content, 5, epoch());

    let summary = run_session(&content, state, Role::Gangster, 600, 5);

    assert!(
        summary.rejections.is_empty(),
        "autopilot issued rejected commands on shipped content: {:#?}",
        &summary.rejections[..summary.rejections.len().min(5)]
    );
    assert_eq!(summary.state.meta.tick, 600);
    assert!(summary.state.player.max_xp > 100);
}
