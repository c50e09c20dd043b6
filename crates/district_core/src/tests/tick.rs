use super::*;
use chrono::Duration;

fn seed_board(state: &mut GameState, roles: &[Role]) {
    let board = &mut state.districts[0].leaderboard;
    board.clear();
    for (i, role) in roles.iter().enumerate() {
        board.push(LeaderboardEntry {
            name: format!("rival_{i}"),
            score: 100 * (i as u64 + 1),
            rank: 0,
            role: *role,
        });
    }
    rank_entries(board);
}

#[test]
fn tick_counter_advances_without_role() {
    let content = base_content();
    let mut state = base_state(&content);
    let before = state.districts.clone();

    let events = tick(&mut state, &content, &mut low_rng(), epoch());

    assert!(events.is_empty());
    assert_eq!(state.meta.tick, 1);
    assert_eq!(state.districts, before, "no drift before a role is chosen");
}

#[test]
fn low_draw_drifts_both_indices_down() {
    let content = base_content();
    let mut state = state_with_role(&content, Role::Civilian);

    let events = tick(&mut state, &content, &mut low_rng(), epoch());

    assert_eq!(downtown(&state).crime, 44);
    assert_eq!(downtown(&state).prosperity, 59);
    assert_eq!(
        events[0].event,
        Event::DistrictDrifted {
            district: DistrictId(1),
            crime_delta: -1,
            prosperity_delta: -1
        }
    );
    assert_eq!(events[0].tick, 0);
}

#[test]
fn high_draw_changes_nothing() {
    let content = base_content();
    let mut state = state_with_role(&content, Role::Civilian);
    state.player.district_id = DistrictId(2);
    state.player.energy = 10;
    let before = state.clone();

    let events = tick(&mut state, &content, &mut high_rng(), epoch());

    assert!(events.is_empty());
    assert_eq!(state.player, before.player);
    assert_eq!(state.districts, before.districts);
}

#[test]
fn prosperous_district_regenerates_energy() {
    let content = base_content();
    let mut state = state_with_role(&content, Role::Civilian);
    state.player.district_id = DistrictId(5);
    state.player.energy = 10;

    let events = tick(&mut state, &content, &mut low_rng(), epoch());

    // Suburbs drop from 85 to 84, still above the threshold.
    assert_eq!(state.district(DistrictId(5)).unwrap().prosperity, 84);
    assert_eq!(state.player.energy, 11);
    assert!(events
        .iter()
        .any(|e| e.event == Event::EnergyRegenerated { energy: 11 }));
}

#[test]
fn regeneration_respects_max_energy() {
    let content = base_content();
    let mut state = state_with_role(&content, Role::Civilian);
    state.player.district_id = DistrictId(5);

    let events = tick(&mut state, &content, &mut low_rng(), epoch());

    assert_eq!(state.player.energy, 50);
    assert!(!events
        .iter()
        .any(|e| matches!(e.event, Event::EnergyRegenerated { .. })));
}

#[test]
fn drift_clamps_at_zero() {
    let content = base_content();
    let mut state = state_with_role(&content, Role::Civilian);
    state.districts[0].crime = 0;
    state.districts[0].prosperity = 0;

    tick(&mut state, &content, &mut low_rng(), epoch());

    assert_eq!(downtown(&state).crime, 0);
    assert_eq!(downtown(&state).prosperity, 0);
}

#[test]
fn reclassification_waits_for_period() {
    let content = base_content();
    let mut state = base_state(&content);
    seed_board(&mut state, &[Role::Gangster, Role::Gangster, Role::Civilian]);

    tick(&mut state, &content, &mut high_rng(), epoch() + Duration::hours(23));
    assert_eq!(state.world_state, WorldState::Neutral);

    let events = tick(&mut state, &content, &mut high_rng(), epoch() + Duration::hours(24));
    assert_eq!(state.world_state, WorldState::CrimeHub);
    assert!(state
        .districts
        .iter()
        .all(|d| d.world_state == WorldState::CrimeHub));
    assert_eq!(
        events[0].event,
        Event::WorldStateChanged {
            from: WorldState::Neutral,
            to: WorldState::CrimeHub
        }
    );
    assert_eq!(state.world_state_updated_at, epoch() + Duration::hours(24));
}

#[test]
fn posting_scores_does_not_reclassify() {
    let content = base_content();
    let mut state = base_state(&content);

    for i in 0..6 {
        run(
            &mut state,
            &content,
            &Command::PostScore {
                district: DistrictId(3),
                name: format!("boss_{i}"),
                score: 500 + i,
                role: Role::Gangster,
            },
            &mut half_rng(),
        )
        .unwrap();
    }

    assert_eq!(state.world_state, WorldState::Neutral);
    assert_eq!(state.districts[2].world_state, WorldState::Neutral);
    assert_eq!(
        classify_world_state(&state.districts, content.constants.leaderboard_top_n),
        WorldState::CrimeHub
    );
}

#[test]
fn event_ids_are_sequential_across_ticks() {
    let content = base_content();
    let mut state = state_with_role(&content, Role::Civilian);

    let first = tick(&mut state, &content, &mut low_rng(), epoch());
    let second = tick(&mut state, &content, &mut low_rng(), epoch());

    assert_eq!(first[0].id, EventId("evt_000000".to_string()));
    assert_eq!(second[0].id, EventId("evt_000001".to_string()));
    assert_eq!(second[0].tick, 1);
}

#[test]
fn seeded_rng_drift_stays_in_bounds() {
    let content = base_content();
    let mut state = state_with_role(&content, Role::Civilian);
    let mut rng = make_rng();

    for _ in 0..5_000 {
        tick(&mut state, &content, &mut rng, epoch());
    }

    let district = downtown(&state);
    assert!(district.crime <= 100);
    assert!(district.prosperity <= 100);
    assert!(state.player.energy <= state.player.max_energy);
    assert_eq!(state.meta.tick, 5_000);
}
