use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use shared::{AddFoodItemRequest, CalendarMonth, DayMealsResponse, FoodItem, MealType, SuccessResponse};
use tracing::info;

use super::extractors::{path_date, AuthenticatedUser, CalendarQuery};
use crate::error::{AppError, AppResult};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar", get(get_meal_calendar))
        .route("/:date", get(get_day_meals))
        .route("/:date/:meal_type", post(add_food_item))
        .route("/:date/:meal_type/:id", delete(remove_food_item))
}

fn parse_meal_type(value: &str) -> AppResult<MealType> {
    value.parse().map_err(AppError::Validation)
}

async fn get_day_meals(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(date): Path<String>,
) -> Result<Json<DayMealsResponse>, AppError> {
    info!("GET /api/meals/{}", date);
    let day = path_date(&date)?;
    Ok(Json(state.meal_service.day_summary(user_id, day)?))
}

async fn add_food_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path((date, meal_type)): Path<(String, String)>,
    Json(request): Json<AddFoodItemRequest>,
) -> Result<(StatusCode, Json<FoodItem>), AppError> {
    info!("POST /api/meals/{}/{}", date, meal_type);
    let day = path_date(&date)?;
    let meal_type = parse_meal_type(&meal_type)?;

    let item = state
        .meal_service
        .add_food_item(user_id, day, meal_type, &request.name, &request.calories)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn remove_food_item(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path((date, meal_type, id)): Path<(String, String, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    info!("DELETE /api/meals/{}/{}/{}", date, meal_type, id);
    let day = path_date(&date)?;
    let meal_type = parse_meal_type(&meal_type)?;

    state.meal_service.remove_food_item(user_id, day, meal_type, &id)?;
    Ok(Json(SuccessResponse {
        success_message: "Food item removed".to_string(),
    }))
}

async fn get_meal_calendar(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    info!("GET /api/meals/calendar - query: {:?}", query);
    let (month, year, selected) = query.resolve(state.calendar_service.today())?;
    Ok(Json(state.meal_service.calendar(user_id, month, year, selected)?))
}
