use crate::state::{EventTx, SharedSim, SimState};
use chrono::Utc;
use district_control::CommandSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Drive background ticks on a fixed period until `max_ticks` is reached.
/// Ticks are skipped, not queued, while paused.
pub async fn run_tick_loop(
    sim: SharedSim,
    event_tx: EventTx,
    tick_secs: f64,
    max_ticks: Option<u64>,
    paused: Arc<AtomicBool>,
) {
    let mut interval = tokio::time::interval(Duration::from_secs_f64(tick_secs.max(0.001)));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first tick of a tokio interval fires immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        if paused.load(Ordering::Relaxed) {
            continue;
        }

        let (events, done) = {
            let mut guard = sim.lock();
            let SimState {
                ref mut game_state,
                ref content,
                ref mut rng,
                ref mut autopilot,
            } = *guard;
            let now = Utc::now();
            let mut events = Vec::new();

            if let Some(autopilot) = autopilot {
                for command in autopilot.generate_commands(game_state, content) {
                    match district_core::apply_command(game_state, content, &command, rng, now) {
                        Ok(report) => events.extend(report.events),
                        Err(err) => tracing::debug!(?command, %err, "autopilot command rejected"),
                    }
                }
            }
            events.extend(district_core::tick(game_state, content, rng, now));

            let tick = game_state.meta.tick;
            tracing::trace!(tick, events = events.len(), "background tick");
            (events, max_ticks.is_some_and(|max| tick >= max))
        };

        if !events.is_empty() {
            let _ = event_tx.send(events);
        }
        if done {
            tracing::info!("max ticks reached, stopping tick loop");
            break;
        }
    }
}
