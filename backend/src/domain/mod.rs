//! # Domain Module
//!
//! Business logic for every DailyLife page.
//!
//! ## Module Organization
//!
//! - **auth_service**: user accounts, sign-in/sign-up, session token
//! - **calendar**: month grids, date keys and month navigation shared by all pages
//! - **calendar_sync**: external calendar integration (mock client)
//! - **task_service**: per-day to-do lists
//! - **meal_service**: per-day food log with calorie totals
//! - **recipe_service**: the user's saved recipe collection
//! - **pantry_service**: ingredient inventory, grouping and expiry checks
//! - **recipe_ai**: template-based recipe suggestions
//! - **exercise_service**: workout routines and max lifts
//! - **finance_service**: transactions, balance, recurring entries
//! - **validation**: form input parsing shared by the services
//!
//! ## Business Rules
//!
//! - Every record belongs to exactly one user and lives under that user's key
//! - Form input is validated before anything is stored
//! - Totals (calories, balance, projections) are always derived, never stored

pub mod auth_service;
pub mod calendar;
pub mod calendar_sync;
pub mod exercise_service;
pub mod finance_service;
pub mod meal_service;
pub mod models;
pub mod pantry_service;
pub mod recipe_ai;
pub mod recipe_service;
pub mod task_service;
pub mod validation;

pub use auth_service::AuthService;
pub use calendar::CalendarService;
pub use calendar_sync::{CalendarSync, MockCalendarSync};
pub use exercise_service::ExerciseService;
pub use finance_service::FinanceService;
pub use meal_service::MealService;
pub use pantry_service::PantryService;
pub use recipe_ai::RecipeAiService;
pub use recipe_service::RecipeService;
pub use task_service::TaskService;

/// Record IDs look like `task::<uuid>`
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{}::{}", prefix, uuid::Uuid::new_v4())
}
