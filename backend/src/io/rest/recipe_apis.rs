use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use shared::{
    CreateRecipeRequest, DetailedRecipe, DetailedRecipeRequest, Recipe, RecipeSuggestion,
    RecipeSuggestionsRequest, RecipeSuggestionsResponse, SuccessResponse,
};
use tracing::info;

use super::extractors::AuthenticatedUser;
use crate::domain::validation;
use crate::error::AppError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route("/suggestions", post(suggest_recipes))
        .route("/detailed", post(detailed_recipe))
        .route("/from-suggestion", post(save_suggestion))
        .route("/:id", delete(delete_recipe))
}

async fn list_recipes(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> Result<Json<Vec<Recipe>>, AppError> {
    info!("GET /api/recipes");
    Ok(Json(state.recipe_service.list_recipes(user_id)?))
}

async fn create_recipe(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), AppError> {
    info!("POST /api/recipes - name: {}", request.name);
    let recipe = state.recipe_service.create_recipe(user_id, request)?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

async fn delete_recipe(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    info!("DELETE /api/recipes/{}", id);
    state.recipe_service.delete_recipe(user_id, &id)?;
    Ok(Json(SuccessResponse {
        success_message: "Recipe deleted".to_string(),
    }))
}

async fn suggest_recipes(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<RecipeSuggestionsRequest>,
) -> Result<Json<RecipeSuggestionsResponse>, AppError> {
    info!("POST /api/recipes/suggestions - {} ingredients", request.ingredients.len());
    let recipes = state.recipe_ai_service.suggest_recipes(user_id, request)?;
    Ok(Json(RecipeSuggestionsResponse { recipes }))
}

async fn detailed_recipe(
    State(state): State<AppState>,
    AuthenticatedUser(_user_id): AuthenticatedUser,
    Json(request): Json<DetailedRecipeRequest>,
) -> Result<Json<DetailedRecipe>, AppError> {
    info!("POST /api/recipes/detailed - name: {}", request.name);
    let name = validation::required(&request.name, "Recipe name is required")?;
    Ok(Json(
        state
            .recipe_ai_service
            .generate_detailed_recipe(&name, &request.ingredients),
    ))
}

async fn save_suggestion(
    State(state): State<AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(suggestion): Json<RecipeSuggestion>,
) -> Result<(StatusCode, Json<Recipe>), AppError> {
    info!("POST /api/recipes/from-suggestion - name: {}", suggestion.name);
    let recipe = state.recipe_service.save_suggestion(user_id, suggestion)?;
    Ok((StatusCode::CREATED, Json(recipe)))
}
