use district_control::AutopilotController;
use district_core::{EventEnvelope, GameContent, GameState};
use parking_lot::Mutex;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::broadcast;

/// The one session the daemon serves. Handlers and the tick loop both lock it
/// and run each resolver to completion while holding the lock.
pub struct SimState {
    pub game_state: GameState,
    pub content: GameContent,
    pub rng: ChaCha8Rng,
    /// When set, the tick loop plays the session itself.
    pub autopilot: Option<AutopilotController>,
}

pub type SharedSim = Arc<Mutex<SimState>>;
pub type EventTx = broadcast::Sender<Vec<EventEnvelope>>;

#[derive(Clone)]
pub struct AppState {
    pub sim: SharedSim,
    pub event_tx: EventTx,
    pub paused: Arc<AtomicBool>,
    pub tick_secs: f64,
}
