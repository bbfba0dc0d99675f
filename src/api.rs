use crate::error::MoodError;
use crate::mood_entry::{MoodEntry, NewMood};
use crate::mood_store::MoodStore;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use color_eyre::Result;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

// The store is shared without a lock: append is a whole-file
// read-modify-write and concurrent requests keep that semantics.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MoodStore>,
}

impl AppState {
    pub fn new(store: MoodStore) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/moods", get(list_moods).post(add_mood))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Team Mood Tracker API is running",
        "status": "ok",
    }))
}

async fn list_moods(State(state): State<AppState>) -> Result<Json<Vec<MoodEntry>>, ApiError> {
    let entries = state.store.load()?;
    Ok(Json(entries))
}

async fn add_mood(
    State(state): State<AppState>,
    Json(payload): Json<NewMood>,
) -> Result<Json<MoodEntry>, ApiError> {
    let stored = state.store.append(payload)?;
    info!(name = %stored.name, mood = %stored.mood, "mood recorded");
    Ok(Json(stored))
}

struct ApiError(MoodError);

impl From<MoodError> for ApiError {
    fn from(err: MoodError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            MoodError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn serve(port: u16, state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
