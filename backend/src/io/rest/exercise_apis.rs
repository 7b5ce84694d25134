use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use shared::{BodyPartExercises, CreateRoutineRequest, MaxLift, RecordMaxLiftRequest, Routine, SuccessResponse};
use tracing::info;

use super::extractors::AuthenticatedUser;
use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/body-parts", get(list_body_parts))
        .route("/routines", get(list_routines).post(create_routine))
        .route("/routines/:id", delete(delete_routine))
        .route("/max-lifts/:body_part", get(list_max_lifts).post(record_max_lift))
        .route("/max-lifts/:body_part/:exercise", delete(delete_max_lift))
}

async fn list_body_parts(State(state): State<AppState>) -> Json<Vec<BodyPartExercises>> {
    info!("GET /api/exercise/body-parts");
    Json(state.exercise_service.body_parts())
}

async fn list_routines(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<Routine>>, AppError> {
    info!("GET /api/exercise/routines");
    Ok(Json(state.exercise_service.list_routines(user_id)?))
}

async fn create_routine(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<CreateRoutineRequest>,
) -> Result<(StatusCode, Json<Routine>), AppError> {
    info!("POST /api/exercise/routines - name: {}", request.name);
    let routine = state.exercise_service.create_routine(user_id, request)?;
    Ok((StatusCode::CREATED, Json(routine)))
}

async fn delete_routine(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    info!("DELETE /api/exercise/routines/{}", id);
    state.exercise_service.delete_routine(user_id, &id)?;
    Ok(Json(SuccessResponse {
        success_message: "Routine deleted".to_string(),
    }))
}

async fn list_max_lifts(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(body_part): Path<String>,
) -> Result<Json<Vec<MaxLift>>, AppError> {
    info!("GET /api/exercise/max-lifts/{}", body_part);
    Ok(Json(state.exercise_service.lifts_for_body_part(user_id, &body_part)?))
}

async fn record_max_lift(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(body_part): Path<String>,
    Json(request): Json<RecordMaxLiftRequest>,
) -> Result<Json<MaxLift>, AppError> {
    info!("POST /api/exercise/max-lifts/{} - exercise: {}", body_part, request.exercise);
    Ok(Json(state.exercise_service.record_max_lift(user_id, &body_part, request)?))
}

async fn delete_max_lift(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path((body_part, exercise)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    info!("DELETE /api/exercise/max-lifts/{}/{}", body_part, exercise);
    state.exercise_service.delete_max_lift(user_id, &body_part, &exercise)?;
    Ok(Json(SuccessResponse {
        success_message: "Max lift deleted".to_string(),
    }))
}
