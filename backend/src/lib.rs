//! # DailyLife Backend
//!
//! Contains all non-UI logic for the DailyLife personal productivity app:
//! to-do lists, meal and recipe tracking, pantry, exercise and finance.
//!
//! This crate is the orchestration layer that brings together:
//! - **Domain**: business rules for every page
//! - **Storage**: key-value persistence of per-user JSON documents
//! - **IO**: the REST API the browser frontend talks to
//!
//! ## Architecture
//!
//! ```text
//! Browser frontend
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services)
//!     ↓
//! Storage Layer (JsonStore over a KeyValueStorage backend)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::domain::{
    AuthService, CalendarService, CalendarSync, ExerciseService, FinanceService, MealService,
    MockCalendarSync, PantryService, RecipeAiService, RecipeService, TaskService,
};
use crate::storage::{FileStore, JsonStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub calendar_service: CalendarService,
    pub calendar_sync: Arc<dyn CalendarSync>,
    pub task_service: TaskService,
    pub meal_service: MealService,
    pub recipe_service: RecipeService,
    pub pantry_service: PantryService,
    pub recipe_ai_service: RecipeAiService,
    pub exercise_service: ExerciseService,
    pub finance_service: FinanceService,
}

/// Wire every service onto `store`
pub fn build_app_state(store: JsonStore, config: &Config) -> AppState {
    let calendar_service = CalendarService::new();
    let calendar_sync: Arc<dyn CalendarSync> = Arc::new(MockCalendarSync::new(
        config.google_client_id.clone(),
        config.google_api_key.clone(),
        config.public_host.clone(),
    ));
    let pantry_service = PantryService::new(store.clone());

    AppState {
        auth_service: AuthService::new(store.clone()),
        task_service: TaskService::new(store.clone(), calendar_service.clone(), calendar_sync.clone()),
        meal_service: MealService::new(store.clone(), calendar_service.clone()),
        recipe_service: RecipeService::new(store.clone()),
        recipe_ai_service: RecipeAiService::new(config.openai_api_key.clone(), pantry_service.clone()),
        exercise_service: ExerciseService::new(store.clone()),
        finance_service: FinanceService::new(store, calendar_service.clone()),
        pantry_service,
        calendar_service,
        calendar_sync,
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up storage in {}", config.data_dir.display());
    let file_store = FileStore::new(&config.data_dir)?;
    let store = JsonStore::new(Arc::new(file_store));

    info!("Setting up domain services");
    let app_state = build_app_state(store, config);

    if app_state.recipe_ai_service.is_service_available() {
        info!("Recipe completion API key configured");
    }
    if app_state.calendar_sync.is_available() {
        info!("Calendar sync credentials configured");
    }

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Result<Router> {
    let origin: HeaderValue = config
        .allowed_origin
        .parse()
        .with_context(|| format!("Invalid allowed origin: {}", config.allowed_origin))?;

    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let mut router = Router::new().nest("/api", io::rest::api_router());

    if let Some(static_dir) = &config.static_dir {
        info!("Serving frontend from {}", static_dir.display());
        router = router.fallback_service(ServeDir::new(static_dir));
    }

    Ok(router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
