//! HTTP + WebSocket API for browser clients
//!
//! The browser runs the camera and face detector and renders what it is
//! told; the game runs here.
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session status
//! - POST /session/{id}/start | stop | reset - Buttons
//! - POST /session/{id}/event - Deliver one detector event
//! - WS /ws/{id} - Display updates out, detector events in
//! - GET /health - Health check

use axum::{
    extract::{Path, State, WebSocketUpgrade, ws::{Message, WebSocket}},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::core::{ChannelDisplay, ClientUpdate, RemoteDetector, SessionController};
use crate::types::{DetectorEvent, EmojiCode, FrameOutput};
use crate::GameConfig;

/// Capacity of each session's update channel
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Session state
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub controller: SessionController<RemoteDetector, ChannelDisplay>,
    pub update_tx: broadcast::Sender<ClientUpdate>,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
    pub config: GameConfig,
    next_id: AtomicU64,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    pub seed: Option<u64>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub state: String,
    pub correct: u32,
    pub attempts: u32,
    pub target: Option<EmojiCode>,
    pub frame: u64,
    pub running: bool,
    pub subscribed: bool,
}

/// Detector event response
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub state: String,
    pub correct: u32,
    pub attempts: u32,
    /// Present when the event was a processed frame
    pub output: Option<FrameOutput>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router(config: GameConfig) -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
        config,
        next_id: AtomicU64::new(1),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/start", post(start_session))
        .route("/session/:id/stop", post(stop_session))
        .route("/session/:id/reset", post(reset_session))
        .route("/session/:id/event", post(post_event))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let mut config = state.config;
    if let Some(seed) = req.seed {
        config.seed = Some(seed);
    }
    config.validate().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let session_id = generate_session_id(state.next_id.fetch_add(1, Ordering::Relaxed));
    let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

    let controller = SessionController::new(
        RemoteDetector::new(tx.clone()),
        ChannelDisplay::new(tx.clone()),
        config,
    );
    let session = Session {
        id: session_id.clone(),
        controller,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);
    info!(session = %session_id, "session created");

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(status_of(session)))
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    with_session(&state, &id, |controller| controller.start()).await
}

async fn stop_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    with_session(&state, &id, |controller| controller.stop()).await
}

async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    with_session(&state, &id, |controller| controller.reset()).await
}

/// Deliver one detector event
async fn post_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(event): Json<DetectorEvent>,
) -> Result<Json<EventResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    let output = session.controller.handle_event(event);
    let score = session.controller.score();

    Ok(Json(EventResponse {
        state: session.controller.state().to_string(),
        correct: score.correct,
        attempts: score.attempts,
        output,
    }))
}

/// Run a button action under the write lock and report the new status
async fn with_session<F>(
    state: &AppState,
    id: &str,
    action: F,
) -> Result<Json<SessionStatusResponse>, StatusCode>
where
    F: FnOnce(&mut SessionController<RemoteDetector, ChannelDisplay>),
{
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(id).ok_or(StatusCode::NOT_FOUND)?;
    action(&mut session.controller);
    Ok(Json(status_of(session)))
}

fn status_of(session: &Session) -> SessionStatusResponse {
    let controller = &session.controller;
    let score = controller.score();
    SessionStatusResponse {
        session_id: session.id.clone(),
        state: controller.state().to_string(),
        correct: score.correct,
        attempts: score.attempts,
        target: controller.engine().target(),
        frame: controller.frame(),
        running: controller.is_running(),
        subscribed: controller.is_subscribed(),
    }
}

/// WebSocket handler for live play
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, state, id, rx).await;
    }))
}

/// Pump display updates out and detector events in until either side closes
async fn handle_websocket(
    socket: WebSocket,
    state: Arc<AppState>,
    id: String,
    mut rx: broadcast::Receiver<ClientUpdate>,
) {
    let (mut sender, mut receiver) = socket.split();

    let mut outbound = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(update) => {
                    let json = serde_json::to_string(&update).unwrap_or_default();
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket client lagging, updates dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let inbound_state = state.clone();
    let inbound_id = id.clone();
    let mut inbound = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            let text = match message {
                Message::Text(text) => text,
                Message::Close(_) => break,
                _ => continue,
            };
            let event: DetectorEvent = match serde_json::from_str(&text) {
                Ok(event) => event,
                Err(e) => {
                    debug!(error = %e, "ignoring malformed websocket message");
                    continue;
                }
            };
            let mut sessions = inbound_state.sessions.write().await;
            match sessions.get_mut(&inbound_id) {
                Some(session) => {
                    session.controller.handle_event(event);
                }
                None => break,
            }
        }
    });

    tokio::select! {
        _ = &mut outbound => inbound.abort(),
        _ = &mut inbound => outbound.abort(),
    }
    debug!(session = %id, "websocket closed");
}

/// Generate session ID
fn generate_session_id(sequence: u64) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("session_{:x}_{}", nanos as u64, sequence)
}

/// Run the API server
pub async fn run_server(addr: &str, config: GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Mimic Me! API listening");
    println!("🎭 Mimic Me! API running on {}", addr);
    println!("  POST /session/new         - Create session");
    println!("  GET  /session/:id         - Get status");
    println!("  POST /session/:id/start   - Start detection");
    println!("  POST /session/:id/stop    - Stop detection");
    println!("  POST /session/:id/reset   - Reset game");
    println!("  POST /session/:id/event   - Detector event");
    println!("  WS   /ws/:id              - Live play");
    println!("  GET  /health              - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
