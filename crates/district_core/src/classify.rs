//! World-state classification from leaderboard role shares.

use chrono::{DateTime, Duration, Utc};

use crate::{District, Event, GameContent, GameState, LeaderboardEntry, Role, WorldState};

/// Count roles among the top `top_n` ranks of every district and label the
/// world by majority. Ties and empty boards are neutral.
pub fn classify_world_state(districts: &[District], top_n: usize) -> WorldState {
    let mut total = 0usize;
    let mut gangsters = 0usize;
    let mut detectives = 0usize;

    for district in districts {
        let mut top: Vec<&LeaderboardEntry> = district.leaderboard.iter().collect();
        top.sort_by_key(|e| e.rank);
        for entry in top.into_iter().take(top_n) {
            total += 1;
            match entry.role {
                Role::Gangster => gangsters += 1,
                Role::Detective => detectives += 1,
                Role::Civilian => {}
            }
        }
    }

    if gangsters * 2 > total {
        WorldState::CrimeHub
    } else if detectives * 2 > total {
        WorldState::LawfulCity
    } else {
        WorldState::Neutral
    }
}

/// Recompute the label once the reclassification period has elapsed and copy
/// it into every district.
pub(crate) fn reclassify(
    state: &mut GameState,
    content: &GameContent,
    now: DateTime<Utc>,
) -> Option<Event> {
    let period = Duration::hours(content.constants.world_state_period_hours);
    if now - state.world_state_updated_at < period {
        return None;
    }
    let from = state.world_state;
    let to = classify_world_state(&state.districts, content.constants.leaderboard_top_n);
    state.world_state = to;
    state.world_state_updated_at = now;
    for district in &mut state.districts {
        district.world_state = to;
    }
    (from != to).then_some(Event::WorldStateChanged { from, to })
}
