use axum::{extract::State, response::Json, routing::post, Router};
use shared::{LogEntry, SuccessResponse};
use tracing::{debug, error, info, warn};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Forward a browser log line into the server log
async fn log_message(
    State(_app_state): State<AppState>,
    Json(entry): Json<LogEntry>,
) -> Json<SuccessResponse> {
    let component = entry.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, entry.message);

    match entry.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Json(SuccessResponse {
        success_message: "Logged".to_string(),
    })
}
