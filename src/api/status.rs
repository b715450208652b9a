use crate::services::InstrumentStatus;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};

/// Per-instrument watcher status.
async fn status(State(state): State<AppState>) -> Json<Vec<InstrumentStatus>> {
    Json(state.status.snapshot())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/status", get(status))
}
