use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use shared::{CalendarMonth, CalendarSyncStatus, CreateTaskRequest, SuccessResponse, Task, TaskListResponse};
use tracing::info;

use super::extractors::{path_date, AuthenticatedUser, CalendarQuery};
use crate::domain::CalendarService;
use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar", get(get_task_calendar))
        .route("/:date", get(list_tasks).post(add_task))
        .route("/:date/:id", delete(delete_task))
        .route("/:date/:id/toggle", post(toggle_task))
}

pub fn calendar_sync_router() -> Router<AppState> {
    Router::new().route("/status", get(calendar_sync_status))
}

async fn list_tasks(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(date): Path<String>,
) -> Result<Json<TaskListResponse>, AppError> {
    info!("GET /api/tasks/{}", date);
    let day = path_date(&date)?;
    let tasks = state.task_service.tasks_for_date(user_id, day)?;
    Ok(Json(TaskListResponse {
        date: CalendarService::format_date_key(day),
        tasks,
    }))
}

async fn add_task(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(date): Path<String>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    info!("POST /api/tasks/{}", date);
    let day = path_date(&date)?;
    let task = state.task_service.add_task(user_id, day, &request.text).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn toggle_task(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path((date, id)): Path<(String, String)>,
) -> Result<Json<Task>, AppError> {
    info!("POST /api/tasks/{}/{}/toggle", date, id);
    let day = path_date(&date)?;
    Ok(Json(state.task_service.toggle_task(user_id, day, &id).await?))
}

async fn delete_task(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path((date, id)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    info!("DELETE /api/tasks/{}/{}", date, id);
    let day = path_date(&date)?;
    state.task_service.delete_task(user_id, day, &id).await?;
    Ok(Json(SuccessResponse {
        success_message: "Task deleted".to_string(),
    }))
}

async fn get_task_calendar(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    info!("GET /api/tasks/calendar - query: {:?}", query);
    let (month, year, selected) = query.resolve(state.calendar_service.today())?;
    Ok(Json(state.task_service.calendar(user_id, month, year, selected)?))
}

async fn calendar_sync_status(State(state): State<AppState>) -> Json<CalendarSyncStatus> {
    info!("GET /api/calendar-sync/status");
    Json(CalendarSyncStatus {
        available: state.calendar_sync.is_available(),
        signed_in: state.calendar_sync.is_signed_in(),
    })
}
