use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{schedule, status};
use crate::types::AppState;

mod endpoints;
mod types;

pub use endpoints::schedule::{ImportedClass, ParseScheduleRequest, ParseScheduleResponse};
pub use types::ApiErrorType;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // JSON escaping can grow text up to 6x, so the raw body limit sits above
    // `max_input_bytes` and the exact check happens in the handler.
    let body_limit = app_state
        .config
        .max_input_bytes
        .saturating_mul(6)
        .saturating_add(1024);

    Router::new()
        .route("/health", get(status::get_health))
        .route("/schedule/parse", post(schedule::post_parse_schedule))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(app_state)
}
