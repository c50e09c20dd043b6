use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::background::background_step;
use crate::buildings::{fly, interact, resolve_building};
use crate::{
    actions, classify, emit, leaderboard, movement, season, Command, Event, EventEnvelope,
    GameContent, GameError, GameState, LogEntry, Outcome, Severity,
};

/// Result of a successful command: stamped events plus the lines that were
/// written to the event log, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReport {
    pub events: Vec<EventEnvelope>,
    pub messages: Vec<LogEntry>,
}

impl CommandReport {
    /// The line to show the player, if the command produced one.
    pub fn headline(&self) -> Option<&str> {
        self.messages.first().map(|m| m.message.as_str())
    }
}

/// Apply one player command.
///
/// On rejection the game state is left as it was, apart from a `Danger` line
/// in the event log carrying the error message.
pub fn apply_command(
    state: &mut GameState,
    content: &GameContent,
    command: &Command,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<CommandReport, GameError> {
    let result = match command {
        Command::SelectRole { role } => select_role(state, *role),
        Command::Move { target } => movement::move_player(state, content, *target),
        Command::Interact { action } => interact(state, content, action, rng),
        Command::RoleAction { action } => actions::resolve_action(state, content, action, rng),
        Command::Building { action } => resolve_building(state, content, action, rng),
        Command::Travel { destination } => fly(state, content, *destination),
        Command::PurchaseSeasonPass => season::purchase(state, content, now),
        Command::PostScore {
            district,
            name,
            score,
            role,
        } => leaderboard::post_score(state, *district, name, *score, *role),
    };

    match result {
        Ok(outcome) => Ok(record(state, outcome)),
        Err(err) => {
            state.log.push(err.to_string(), Severity::Danger);
            Err(err)
        }
    }
}

/// Advance the session by one background tick.
///
/// Order of operations:
/// 1. District drift and energy regeneration (only once a role is chosen).
/// 2. Season pass expiry.
/// 3. World-state reclassification, if the period has elapsed.
/// 4. Increment tick counter.
pub fn tick(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Vec<EventEnvelope> {
    let mut outcome = Outcome {
        events: background_step(state, &content.constants, rng),
        ..Outcome::default()
    };

    if let Some(event) = season::expire(state, now) {
        outcome
            .event(event)
            .say("Your Season Pass has expired.", Severity::Warning);
    }
    if let Some(event) = classify::reclassify(state, content, now) {
        if let Event::WorldStateChanged { to, .. } = &event {
            outcome.say(format!("The city is now classed as {to}."), Severity::Info);
        }
        outcome.event(event);
    }

    let report = record(state, outcome);
    state.meta.tick += 1;
    report.events
}

fn select_role(state: &mut GameState, role: crate::Role) -> Result<Outcome, GameError> {
    let district = state.current_district()?.name.clone();
    state.player.role = Some(role);

    let mut outcome = Outcome::default();
    outcome.event(Event::RoleSelected { role }).say(
        format!(
            "Welcome, {}! Your journey begins in {district}.",
            role.badge()
        ),
        Severity::Success,
    );
    Ok(outcome)
}

fn record(state: &mut GameState, outcome: Outcome) -> CommandReport {
    let tick = state.meta.tick;
    let events = outcome
        .events
        .into_iter()
        .map(|event| emit(&mut state.counters, tick, event))
        .collect();
    let messages = outcome
        .messages
        .into_iter()
        .map(|(message, severity)| {
            state.log.push(message.clone(), severity);
            LogEntry { message, severity }
        })
        .collect();
    CommandReport { events, messages }
}
