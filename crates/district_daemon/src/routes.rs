use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{
        sse::{Event, Sse},
        Json,
    },
    routing::{get, post},
    Router,
};
use chrono::Utc;
use district_core::{Command, EventEnvelope};
use std::convert::Infallible;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[cfg(test)]
pub fn make_router(state: AppState) -> Router {
    make_router_with_cors(state, HeaderValue::from_static("http://localhost:5173"))
}

pub fn make_router_with_cors(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/meta", get(meta_handler))
        .route("/api/v1/snapshot", get(snapshot_handler))
        .route("/api/v1/log", get(log_handler))
        .route("/api/v1/districts", get(districts_handler))
        .route("/api/v1/command", post(command_handler))
        .route("/api/v1/stream", get(stream_handler))
        .route("/api/v1/pause", post(pause_handler))
        .route("/api/v1/resume", post(resume_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn meta_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    let sim = app_state.sim.lock();
    let paused = app_state.paused.load(Ordering::Relaxed);
    Json(serde_json::json!({
        "tick": sim.game_state.meta.tick,
        "seed": sim.game_state.meta.seed,
        "content_version": sim.game_state.meta.content_version,
        "tick_secs": app_state.tick_secs,
        "paused": paused,
    }))
}

pub async fn snapshot_handler(
    State(app_state): State<AppState>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let sim = app_state.sim.lock();
    match serde_json::to_string(&sim.game_state) {
        Ok(json) => {
            drop(sim);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                json,
            )
        }
        Err(err) => {
            tracing::error!("snapshot serialization failed: {err}");
            drop(sim);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"error":"serialization failed"}"#.to_string(),
            )
        }
    }
}

pub async fn log_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    let sim = app_state.sim.lock();
    let entries: Vec<_> = sim.game_state.log.entries().cloned().collect();
    Json(serde_json::json!({ "entries": entries }))
}

pub async fn districts_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    let sim = app_state.sim.lock();
    let current = sim.game_state.player.district_id;
    let districts: Vec<serde_json::Value> = sim
        .game_state
        .districts
        .iter()
        .map(|d| {
            serde_json::json!({
                "id": d.id,
                "name": d.name,
                "crime": d.crime,
                "prosperity": d.prosperity,
                "world_state": d.world_state,
                "current": d.id == current,
            })
        })
        .collect();
    Json(serde_json::json!({
        "world_state": sim.game_state.world_state,
        "districts": districts,
    }))
}

/// Apply one player command. Rejections come back as 422 with the message the
/// player would see.
pub async fn command_handler(
    State(app_state): State<AppState>,
    Json(command): Json<Command>,
) -> (StatusCode, Json<serde_json::Value>) {
    let result = {
        let mut guard = app_state.sim.lock();
        let sim = &mut *guard;
        district_core::apply_command(
            &mut sim.game_state,
            &sim.content,
            &command,
            &mut sim.rng,
            Utc::now(),
        )
    };

    match result {
        Ok(report) => {
            tracing::info!(?command, events = report.events.len(), "command applied");
            if !report.events.is_empty() {
                let _ = app_state.event_tx.send(report.events.clone());
            }
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "ok": true,
                    "message": report.headline(),
                    "messages": report.messages,
                    "events": report.events,
                })),
            )
        }
        Err(err) => {
            tracing::warn!(?command, %err, "command rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "ok": false,
                    "error": err.kind(),
                    "message": err.to_string(),
                })),
            )
        }
    }
}

pub async fn pause_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    app_state.paused.store(true, Ordering::Relaxed);
    tracing::info!("tick loop paused");
    Json(serde_json::json!({"paused": true}))
}

pub async fn resume_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    app_state.paused.store(false, Ordering::Relaxed);
    tracing::info!("tick loop resumed");
    Json(serde_json::json!({"paused": false}))
}

pub async fn stream_handler(
    State(app_state): State<AppState>,
) -> Sse<impl futures_core::Stream<Item = Result<Event, Infallible>>> {
    let mut rx = app_state.event_tx.subscribe();
    let sim = app_state.sim.clone();

    let stream = async_stream::stream! {
        let mut heartbeat = tokio::time::interval(Duration::from_secs(5));
        heartbeat.tick().await; // discard the immediate first tick
        let mut flush = tokio::time::interval(Duration::from_millis(100));
        flush.tick().await; // discard the immediate first tick
        let mut pending: Vec<EventEnvelope> = Vec::new();
        loop {
            tokio::select! {
                result = rx.recv() => {
                    match result {
                        Ok(events) => pending.extend(events),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "event stream lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
                _ = flush.tick() => {
                    if !pending.is_empty() {
                        let data = serde_json::to_string(&pending).unwrap_or_default();
                        pending.clear();
                        yield Ok(Event::default().data(data));
                    }
                }
                _ = heartbeat.tick() => {
                    let tick = sim.lock().game_state.meta.tick;
                    let hb = serde_json::json!({"heartbeat": true, "tick": tick});
                    yield Ok(Event::default().data(hb.to_string()));
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SimState;
    use axum::{body::Body, http::Request};
    use district_core::test_fixtures::{base_content, base_state};
    use http_body_util::BodyExt;
    use parking_lot::Mutex;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn make_test_state() -> AppState {
        let content = base_content();
        let game_state = base_state(&content);
        let (event_tx, _) = tokio::sync::broadcast::channel(64);
        AppState {
            sim: Arc::new(Mutex::new(SimState {
                game_state,
                content,
                rng: ChaCha8Rng::seed_from_u64(0),
                autopilot: None,
            })),
            event_tx,
            paused: Arc::new(AtomicBool::new(false)),
            tick_secs: 5.0,
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_meta_contains_tick() {
        let (status, json) = get_json(make_router(make_test_state()), "/api/v1/meta").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tick"], 0);
        assert_eq!(json["paused"], false);
    }

    #[tokio::test]
    async fn test_snapshot_is_valid_json() {
        let (status, json) = get_json(make_router(make_test_state()), "/api/v1/snapshot").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["player"]["crown"], 1000);
        assert_eq!(json["districts"].as_array().map(Vec::len), Some(9));
    }

    #[tokio::test]
    async fn test_districts_marks_current() {
        let (_, json) = get_json(make_router(make_test_state()), "/api/v1/districts").await;
        assert_eq!(json["world_state"], "Neutral");
        assert_eq!(json["districts"][0]["name"], "Downtown");
        assert_eq!(json["districts"][0]["current"], true);
        assert_eq!(json["districts"][1]["current"], false);
    }

    #[tokio::test]
    async fn test_command_applies_and_broadcasts() {
        let state = make_test_state();
        let mut rx = state.event_tx.subscribe();
        let app = make_router(state.clone());

        let (status, json) = post_json(
            app,
            "/api/v1/command",
            r#"{"type":"select_role","role":"detective"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["message"],
            "Welcome, 👮 Detective! Your journey begins in Downtown."
        );
        let events = rx.try_recv().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(
            state.sim.lock().game_state.player.role,
            Some(district_core::Role::Detective)
        );
    }

    #[tokio::test]
    async fn test_rejected_command_is_422() {
        let state = make_test_state();
        let app = make_router(state.clone());

        let (status, json) = post_json(
            app,
            "/api/v1/command",
            r#"{"type":"role_action","action":"patrol"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "role_not_selected");
        assert_eq!(json["message"], "Select a role first!");

        let (_, log) = get_json(make_router(state), "/api/v1/log").await;
        assert_eq!(log["entries"][0]["message"], "Select a role first!");
        assert_eq!(log["entries"][0]["severity"], "danger");
    }

    #[tokio::test]
    async fn test_malformed_command_is_client_error() {
        let (status, _) = post_json(
            make_router(make_test_state()),
            "/api/v1/command",
            r#"{"type":"teleport"}"#,
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_pause_and_resume_toggle_flag() {
        let state = make_test_state();

        let (_, json) = post_json(make_router(state.clone()), "/api/v1/pause", "").await;
        assert_eq!(json["paused"], true);
        assert!(state.paused.load(Ordering::Relaxed));

        let (_, json) = post_json(make_router(state.clone()), "/api/v1/resume", "").await;
        assert_eq!(json["paused"], false);
        assert!(!state.paused.load(Ordering::Relaxed));
    }
}
