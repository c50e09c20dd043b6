mod routes;
mod state;
mod tick_loop;

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use chrono::Utc;
use clap::Parser;
use district_control::AutopilotController;
use district_core::Role;
use district_world::{build_initial_state, load_content};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use state::{AppState, SimState};
use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "district_daemon", about = "District Wars HTTP session server")]
struct Args {
    #[arg(long, default_value = "127.0.0.1:3001")]
    bind: SocketAddr,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "./content")]
    content_dir: String,
    /// Seconds between background ticks. Defaults to the content's constant.
    #[arg(long)]
    tick_secs: Option<f64>,
    /// Stop ticking after this many background ticks; the server keeps serving.
    #[arg(long)]
    max_ticks: Option<u64>,
    #[arg(long, default_value = "http://localhost:5173")]
    cors_origin: String,
    /// Let the autopilot play the session as this role.
    #[arg(long)]
    autopilot: Option<Role>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// The tick period: the override if given, else the content's constant.
/// Must be a finite, positive number of seconds.
fn resolve_tick_secs(requested: Option<f64>, content_default: u64) -> Result<f64> {
    let secs = requested.unwrap_or(content_default as f64);
    if secs <= 0.0 || std::time::Duration::try_from_secs_f64(secs).is_err() {
        bail!("tick period must be a finite number of seconds above zero, got {secs}");
    }
    Ok(secs)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let content = load_content(&args.content_dir)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let game_state = build_initial_state(&content, seed, Utc::now());
    let tick_secs = resolve_tick_secs(args.tick_secs, content.constants.background_tick_secs)?;
    let cors_origin = HeaderValue::from_str(&args.cors_origin)
        .with_context(|| format!("invalid --cors-origin {:?}", args.cors_origin))?;

    tracing::info!(
        seed,
        content_version = %content.content_version,
        tick_secs,
        "session created"
    );

    let sim = Arc::new(Mutex::new(SimState {
        game_state,
        content,
        rng: ChaCha8Rng::seed_from_u64(seed),
        autopilot: args
            .autopilot
            .map(AutopilotController::new),
    }));
    let (event_tx, _) = tokio::sync::broadcast::channel(256);
    let paused = Arc::new(AtomicBool::new(false));

    tokio::spawn(tick_loop::run_tick_loop(
        sim.clone(),
        event_tx.clone(),
        tick_secs,
        args.max_ticks,
        paused.clone(),
    ));

    let app = routes::make_router_with_cors(
        AppState {
            sim,
            event_tx,
            paused,
            tick_secs,
        },
        cors_origin,
    );

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    tracing::info!("listening on http://{}", args.bind);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_secs_defaults_to_content() {
        let secs = resolve_tick_secs(None, 5).unwrap();
        assert!((secs - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_secs_override_wins() {
        let secs = resolve_tick_secs(Some(0.25), 5).unwrap();
        assert!((secs - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_secs_rejects_non_finite_and_non_positive() {
        for bad in [f64::INFINITY, f64::NAN, 1e300, 0.0, -1.0] {
            assert!(resolve_tick_secs(Some(bad), 5).is_err(), "{bad} accepted");
        }
        assert!(resolve_tick_secs(None, 0).is_err());
    }
}
