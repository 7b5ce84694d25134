use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

/// Public view of a user account. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: u64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Whether the Terms and Conditions box was ticked
    #[serde(default)]
    pub agreed_to_terms: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Returned by sign-in and sign-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

/// Type of calendar cell for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Empty padding cell before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// Per-day figures a page shows inside a calendar cell
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DaySummary {
    /// Number of entries recorded on the day (tasks, recurring transactions)
    pub item_count: usize,
    /// Total calories logged on the day
    pub total_calories: i64,
    /// Income minus expenses scheduled on the day
    pub net_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    /// Day of month, 0 for padding cells
    pub day: u32,
    /// `YYYY-MM-DD`, absent for padding cells
    pub date_key: Option<String>,
    pub day_type: CalendarDayType,
    pub is_today: bool,
    pub is_selected: bool,
    pub summary: DaySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    /// e.g. "March 2025"
    pub month_label: String,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u32,
    pub day_names: Vec<String>,
    pub days: Vec<CalendarDay>,
}

// ---------------------------------------------------------------------------
// To-do
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Event mirrored to an external calendar, when sync is available
    #[serde(default)]
    pub calendar_event_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub date: String,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSyncStatus {
    pub available: bool,
    pub signed_in: bool,
}

// ---------------------------------------------------------------------------
// Meals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(format!("Unknown meal type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub calories: i64,
    pub added_at: DateTime<Utc>,
}

/// Everything eaten on one day, split by meal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    #[serde(default)]
    pub breakfast: Vec<FoodItem>,
    #[serde(default)]
    pub lunch: Vec<FoodItem>,
    #[serde(default)]
    pub dinner: Vec<FoodItem>,
    #[serde(default)]
    pub snack: Vec<FoodItem>,
}

impl DayMeals {
    pub fn items(&self, meal_type: MealType) -> &Vec<FoodItem> {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snack => &self.snack,
        }
    }

    pub fn items_mut(&mut self, meal_type: MealType) -> &mut Vec<FoodItem> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snack => &mut self.snack,
        }
    }

    pub fn is_empty(&self) -> bool {
        MealType::ALL.iter().all(|m| self.items(*m).is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFoodItemRequest {
    pub name: String,
    /// Raw form input, parsed with the leading-integer rule
    pub calories: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealCalories {
    pub breakfast: i64,
    pub lunch: i64,
    pub dinner: i64,
    pub snack: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMealsResponse {
    pub date: String,
    pub meals: DayMeals,
    pub calories_by_meal: MealCalories,
    pub total_calories: i64,
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: String,
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    pub amount: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<IngredientInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    pub name: String,
    pub description: String,
    pub cooking_time: String,
    pub difficulty: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub servings: u32,
    pub used_ingredients: Vec<String>,
    pub additional_ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSuggestionsRequest {
    /// Falls back to the pantry contents when empty
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// "breakfast", "dessert", ... or "any"
    #[serde(default)]
    pub meal_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSuggestionsResponse {
    pub recipes: Vec<RecipeSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedIngredient {
    pub item: String,
    pub amount: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub step: u32,
    pub instruction: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: u32,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedRecipe {
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub difficulty: String,
    pub servings: u32,
    pub ingredients: Vec<DetailedIngredient>,
    pub instructions: Vec<RecipeStep>,
    pub tips: Vec<String>,
    pub nutrition: NutritionInfo,
}

// ---------------------------------------------------------------------------
// Pantry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    #[default]
    Pantry,
    Fridge,
    Freezer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: String,
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: StorageLocation,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItemRequest {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub category: String,
    /// `YYYY-MM-DD`; blank means no expiration
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub location: StorageLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryCategoryGroup {
    pub category: String,
    pub items: Vec<PantryItem>,
}

// ---------------------------------------------------------------------------
// Exercise
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPartExercises {
    pub body_part: String,
    pub exercises: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub exercises: Vec<RoutineExercise>,
    pub created_at: DateTime<Utc>,
}

/// Form input for one exercise line; numbers arrive as typed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExerciseInput {
    pub name: String,
    pub sets: String,
    pub reps: String,
    #[serde(default)]
    pub weight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoutineRequest {
    pub name: String,
    pub exercises: Vec<RoutineExerciseInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxLift {
    pub id: String,
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMaxLiftRequest {
    pub exercise: String,
    pub weight: String,
    pub reps: String,
}

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceTransaction {
    pub id: String,
    pub description: String,
    /// Always positive; `kind` carries the sign
    pub amount: f64,
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFinanceTransactionRequest {
    pub description: String,
    /// Raw form input such as "$1,250.00"
    pub amount: String,
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    /// Defaults to today
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    pub balance: f64,
    pub total_income: f64,
    pub total_expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLists {
    pub income: Vec<String>,
    pub expense: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub frequency: Frequency,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecurringRequest {
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub projected_income: f64,
    pub projected_expenses: f64,
    pub net: f64,
}

// ---------------------------------------------------------------------------
// Misc
// ---------------------------------------------------------------------------

/// Generic acknowledgement for deletes and sign-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success_message: String,
}

/// Body of every non-2xx API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log line forwarded from the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!("Breakfast".parse::<MealType>(), Ok(MealType::Breakfast));
        assert_eq!(" snack ".parse::<MealType>(), Ok(MealType::Snack));
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_day_meals_missing_lists_default_to_empty() {
        let meals: DayMeals = serde_json::from_str(r#"{"lunch": []}"#).unwrap();
        assert!(meals.is_empty());
        assert!(meals.items(MealType::Dinner).is_empty());
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionKind::Income).unwrap(), "\"income\"");
        assert_eq!(serde_json::to_string(&Frequency::Monthly).unwrap(), "\"monthly\"");
        assert_eq!(serde_json::to_string(&StorageLocation::Freezer).unwrap(), "\"freezer\"");
    }
}
