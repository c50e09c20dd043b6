use super::*;
use crate::test_fixtures::{
    base_content, base_state, epoch, half_rng, high_rng, low_rng, make_rng, state_with_role,
};

mod tick;

// --- Shared test helpers ------------------------------------------------

fn building_cmd(action: BuildingAction) -> Command {
    Command::Building { action }
}

fn role_action(name: &str) -> Command {
    Command::RoleAction {
        action: name.to_string(),
    }
}

/// Run a command at the fixture epoch.
fn run(
    state: &mut GameState,
    content: &GameContent,
    command: &Command,
    rng: &mut impl rand::Rng,
) -> Result<CommandReport, GameError> {
    apply_command(state, content, command, rng, epoch())
}

/// Assert that a rejected command left everything but the log untouched.
fn assert_unchanged_except_log(before: &GameState, after: &GameState) {
    assert_eq!(before.player, after.player);
    assert_eq!(before.districts, after.districts);
    assert_eq!(before.seasonal_reward_pool, after.seasonal_reward_pool);
    assert_eq!(before.counters, after.counters);
    assert_eq!(
        after.log.latest().map(|e| e.severity),
        Some(Severity::Danger),
        "rejection should log a danger line"
    );
}

fn downtown(state: &GameState) -> &District {
    state.district(DistrictId(1)).unwrap()
}

fn event_kinds(report: &CommandReport) -> Vec<&Event> {
    report.events.iter().map(|e| &e.event).collect()
}
