use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use shared::{
    CalendarMonth, CategoryLists, CategoryTotal, CreateFinanceTransactionRequest,
    CreateRecurringRequest, FinanceSummary, FinanceTransaction, MonthlyProjection,
    RecurringTransaction, SuccessResponse,
};
use tracing::info;

use super::extractors::{path_date, AuthenticatedUser, CalendarQuery};
use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(add_transaction))
        .route("/transactions/:id", delete(delete_transaction))
        .route("/summary", get(get_summary))
        .route("/categories", get(get_categories))
        .route("/spending-by-category", get(get_spending_by_category))
        .route("/recurring/:date", get(list_recurring).post(add_recurring))
        .route("/recurring/:date/:id", delete(delete_recurring))
        .route("/projection", get(get_projection))
        .route("/calendar", get(get_finance_calendar))
}

async fn list_transactions(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<FinanceTransaction>>, AppError> {
    info!("GET /api/finance/transactions");
    Ok(Json(state.finance_service.list_transactions(user_id)?))
}

async fn add_transaction(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<CreateFinanceTransactionRequest>,
) -> Result<(StatusCode, Json<FinanceTransaction>), AppError> {
    info!("POST /api/finance/transactions - request: {:?}", request);
    let transaction = state.finance_service.add_transaction(user_id, request)?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn delete_transaction(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    info!("DELETE /api/finance/transactions/{}", id);
    state.finance_service.delete_transaction(user_id, &id)?;
    Ok(Json(SuccessResponse {
        success_message: "Transaction deleted".to_string(),
    }))
}

async fn get_summary(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<FinanceSummary>, AppError> {
    info!("GET /api/finance/summary");
    Ok(Json(state.finance_service.summary(user_id)?))
}

async fn get_categories(State(state): State<AppState>) -> Json<CategoryLists> {
    info!("GET /api/finance/categories");
    Json(state.finance_service.categories())
}

async fn get_spending_by_category(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<CategoryTotal>>, AppError> {
    info!("GET /api/finance/spending-by-category");
    Ok(Json(state.finance_service.spending_by_category(user_id)?))
}

async fn list_recurring(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(date): Path<String>,
) -> Result<Json<Vec<RecurringTransaction>>, AppError> {
    info!("GET /api/finance/recurring/{}", date);
    let day = path_date(&date)?;
    Ok(Json(state.finance_service.recurring_for_date(user_id, day)?))
}

async fn add_recurring(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(date): Path<String>,
    Json(request): Json<CreateRecurringRequest>,
) -> Result<(StatusCode, Json<RecurringTransaction>), AppError> {
    info!("POST /api/finance/recurring/{} - request: {:?}", date, request);
    let day = path_date(&date)?;
    let entry = state.finance_service.add_recurring(user_id, day, request)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn delete_recurring(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path((date, id)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    info!("DELETE /api/finance/recurring/{}/{}", date, id);
    let day = path_date(&date)?;
    state.finance_service.delete_recurring(user_id, day, &id)?;
    Ok(Json(SuccessResponse {
        success_message: "Recurring transaction deleted".to_string(),
    }))
}

async fn get_projection(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<MonthlyProjection>, AppError> {
    info!("GET /api/finance/projection");
    Ok(Json(state.finance_service.monthly_projection(user_id)?))
}

async fn get_finance_calendar(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    info!("GET /api/finance/calendar - query: {:?}", query);
    let (month, year, selected) = query.resolve(state.calendar_service.today())?;
    Ok(Json(state.finance_service.calendar(user_id, month, year, selected)?))
}
