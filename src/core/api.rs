//! HTTP + WebSocket API for Innerverse
//!
//! Endpoints:
//! - GET /health - Health check with heat and lexicon version
//! - POST /process - Classify one journal entry
//! - POST /reset - Heat back to 0.0
//! - GET /history?count=N - Recent entries and summary
//! - POST /screening/gad7 - Score a GAD-7
//! - POST /screening/phq9 - Score a PHQ-9
//! - WS /ws - Live atmosphere updates

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::engine::AffectEngine;
use crate::core::screening;
use crate::types::{
    AtmosphereState, HistoryRecord, HistorySummary, Instrument, ProcessOutcome, ScreeningResult,
};

/// Default number of entries for GET /history
pub const DEFAULT_HISTORY_COUNT: usize = 10;

/// Live update message
#[derive(Debug, Clone, Serialize)]
pub struct TurnUpdate {
    pub atmosphere: AtmosphereState,
    pub is_crisis: bool,
    pub heat_level: f64,
}

/// App state
pub struct AppState {
    pub engine: Arc<AffectEngine>,
    pub update_tx: broadcast::Sender<TurnUpdate>,
}

/// Process request; a missing `text` is treated as empty
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub text: String,
}

/// Reset response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub heat_level: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub lexicon_version: String,
    pub heat_level: f64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub count: Option<usize>,
}

/// History response
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryRecord>,
    pub summary: HistorySummary,
}

/// Screening request
#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    pub answers: Vec<u8>,
}

/// Item wording for a screening, shown before answers are collected
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub instrument: Instrument,
    pub items: Vec<String>,
    pub scale: Vec<String>,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// Create the API router
pub fn create_router(engine: Arc<AffectEngine>) -> Router {
    let (update_tx, _) = broadcast::channel(100);
    let state = Arc::new(AppState { engine, update_tx });

    Router::new()
        .route("/health", get(health))
        .route("/process", post(process))
        .route("/reset", post(reset))
        .route("/history", get(history))
        .route("/screening/gad7", get(gad7_items).post(screening_gad7))
        .route("/screening/phq9", get(phq9_items).post(screening_phq9))
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        lexicon_version: state.engine.lexicon_version().to_string(),
        heat_level: crate::round2(state.engine.heat()),
    })
}

/// Classify one entry
async fn process(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessOutcome>, ApiError> {
    let engine = state.engine.clone();
    let outcome = tokio::task::spawn_blocking(move || engine.process(&req.text))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let update = TurnUpdate {
        atmosphere: outcome.atmosphere(),
        is_crisis: outcome.is_crisis(),
        heat_level: outcome
            .report()
            .map(|r| r.heat_level)
            .unwrap_or_else(|| crate::round2(state.engine.heat())),
    };
    // no subscribers is fine
    let _ = state.update_tx.send(update);

    Ok(Json(outcome))
}

/// Reset heat
async fn reset(State(state): State<Arc<AppState>>) -> Json<ResetResponse> {
    let warnings: Vec<String> = state.engine.reset().into_iter().collect();
    Json(ResetResponse {
        message: "House reset successfully".to_string(),
        heat_level: 0.0,
        warnings,
    })
}

/// Recent entries and summary
async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let count = query.count.unwrap_or(DEFAULT_HISTORY_COUNT);
    let entries = state
        .engine
        .history(count)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    let summary = state
        .engine
        .history_summary()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;
    Ok(Json(HistoryResponse { entries, summary }))
}

async fn gad7_items() -> Json<QuestionnaireResponse> {
    Json(questionnaire(Instrument::Gad7))
}

async fn phq9_items() -> Json<QuestionnaireResponse> {
    Json(questionnaire(Instrument::Phq9))
}

fn questionnaire(instrument: Instrument) -> QuestionnaireResponse {
    QuestionnaireResponse {
        instrument,
        items: screening::items(instrument).iter().map(|s| s.to_string()).collect(),
        scale: screening::ANSWER_SCALE.iter().map(|s| s.to_string()).collect(),
    }
}

async fn screening_gad7(Json(req): Json<ScreeningRequest>) -> Result<Json<ScreeningResult>, ApiError> {
    score_screening(Instrument::Gad7, &req.answers)
}

async fn screening_phq9(Json(req): Json<ScreeningRequest>) -> Result<Json<ScreeningResult>, ApiError> {
    score_screening(Instrument::Phq9, &req.answers)
}

fn score_screening(instrument: Instrument, answers: &[u8]) -> Result<Json<ScreeningResult>, ApiError> {
    screening::score(instrument, answers)
        .map(Json)
        .map_err(|e| {
            debug!(instrument = %instrument, error = %e, "screening rejected");
            api_error(StatusCode::UNPROCESSABLE_ENTITY, e)
        })
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.update_tx.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward updates until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<TurnUpdate>) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            update = rx.recv() => {
                let update = match update {
                    Ok(u) => u,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "websocket client lagging");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let json = match serde_json::to_string(&update) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }
    debug!("websocket closed");
}

/// Run the API server
pub async fn run_server(config: &EngineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Arc::new(AffectEngine::from_config(config));
    let router = create_router(engine);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(addr = %config.addr, "innerverse api listening");
    println!("🏠 Innerverse API running on {}", config.addr);
    println!("  POST /process          - Classify an entry");
    println!("  POST /reset            - Reset heat");
    println!("  GET  /history?count=N  - Recent entries");
    println!("  POST /screening/gad7   - GAD-7 screening");
    println!("  POST /screening/phq9   - PHQ-9 screening");
    println!("  WS   /ws               - Live updates");
    println!("  GET  /health           - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
