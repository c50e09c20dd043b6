//! `district_core`: game state transitions for District Wars.
//!
//! No IO, no network. All randomness via the passed-in Rng; the current
//! time is always supplied by the caller.

mod actions;
pub mod bounds;
mod background;
mod buildings;
mod classify;
pub mod dice;
mod engine;
mod error;
mod event_log;
mod leaderboard;
mod movement;
mod progression;
mod season;
mod state;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use buildings::{hotel_price, hospital_price, shop_price};
pub use classify::classify_world_state;
pub use engine::{apply_command, tick, CommandReport};
pub use error::GameError;
pub use leaderboard::rank_entries;
pub use progression::level_up;
pub use types::*;

pub(crate) fn emit(counters: &mut Counters, tick: u64, event: Event) -> EventEnvelope {
    let id = EventId(format!("evt_{:06}", counters.next_event_id));
    counters.next_event_id += 1;
    EventEnvelope { id, tick, event }
}

/// What a resolver produced: raw events plus the player-facing lines to log.
#[derive(Debug, Default)]
pub(crate) struct Outcome {
    pub events: Vec<Event>,
    pub messages: Vec<(String, Severity)>,
}

impl Outcome {
    pub fn event(&mut self, event: Event) -> &mut Self {
        self.events.push(event);
        self
    }

    pub fn say(&mut self, message: impl Into<String>, severity: Severity) -> &mut Self {
        self.messages.push((message.into(), severity));
        self
    }
}

#[cfg(test)]
mod tests;
