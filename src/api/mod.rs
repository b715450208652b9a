pub mod health;
pub mod status;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(health::router()).merge(status::router())
}
