use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use shared::{PantryCategoryGroup, PantryItem, PantryItemRequest, SuccessResponse};
use tracing::info;

use super::extractors::AuthenticatedUser;
use crate::error::AppError;
use crate::AppState;

const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Deserialize)]
pub struct ExpiringQuery {
    pub days: Option<i64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(add_item))
        .route("/by-category", get(items_by_category))
        .route("/expiring", get(expiring_items))
        .route("/:id", put(update_item).delete(remove_item))
}

async fn list_items(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<PantryItem>>, AppError> {
    info!("GET /api/pantry");
    Ok(Json(state.pantry_service.list_items(user_id)?))
}

async fn add_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<PantryItemRequest>,
) -> Result<(StatusCode, Json<PantryItem>), AppError> {
    info!("POST /api/pantry - name: {}", request.name);
    let item = state.pantry_service.add_item(user_id, request)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<PantryItemRequest>,
) -> Result<Json<PantryItem>, AppError> {
    info!("PUT /api/pantry/{}", id);
    Ok(Json(state.pantry_service.update_item(user_id, &id, request)?))
}

async fn remove_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    info!("DELETE /api/pantry/{}", id);
    state.pantry_service.remove_item(user_id, &id)?;
    Ok(Json(SuccessResponse {
        success_message: "Pantry item removed".to_string(),
    }))
}

async fn items_by_category(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<PantryCategoryGroup>>, AppError> {
    info!("GET /api/pantry/by-category");
    Ok(Json(state.pantry_service.group_by_category(user_id)?))
}

async fn expiring_items(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(query): Query<ExpiringQuery>,
) -> Result<Json<Vec<PantryItem>>, AppError> {
    info!("GET /api/pantry/expiring - query: {:?}", query);
    let days = query.days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS);
    if days < 0 {
        return Err(AppError::validation("days must not be negative"));
    }
    let today = state.calendar_service.today();
    Ok(Json(state.pantry_service.expiring_within(user_id, today, days)?))
}
