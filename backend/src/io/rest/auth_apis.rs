use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use shared::{
    AuthResponse, SessionResponse, SignInRequest, SignUpRequest, SuccessResponse, UserListResponse,
};
use tracing::info;

use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/session", get(current_session))
}

pub fn users_router() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, AppError> {
    info!("GET /api/users");
    let users = state.auth_service.list_users()?;
    Ok(Json(UserListResponse { users }))
}

async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    info!("POST /api/auth/sign-up - username: {}", request.username);
    let response = state.auth_service.sign_up(request)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /api/auth/sign-in - email: {}", request.email);
    Ok(Json(state.auth_service.sign_in(request)?))
}

async fn sign_out(State(state): State<AppState>) -> Result<Json<SuccessResponse>, AppError> {
    info!("POST /api/auth/sign-out");
    state.auth_service.sign_out()?;
    Ok(Json(SuccessResponse {
        success_message: "Signed out".to_string(),
    }))
}

async fn current_session(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    info!("GET /api/auth/session");
    Ok(Json(state.auth_service.current_session()?))
}
