//! Food log for the cooking page.
//!
//! Each day holds four meal lists stored under `meals_<userId>` keyed by date.
//! Calorie totals are always recomputed from the logged items.

use chrono::{NaiveDate, Utc};
use shared::{CalendarMonth, DayMeals, DayMealsResponse, DaySummary, FoodItem, MealCalories, MealType};
use std::collections::BTreeMap;
use tracing::info;

use crate::domain::calendar::CalendarService;
use crate::domain::{new_id, validation};
use crate::error::{AppError, AppResult};
use crate::storage::{JsonStore, StorageKey};

type MealMap = BTreeMap<String, DayMeals>;

/// Upper bound for a single food item's calories
pub const MAX_ITEM_CALORIES: i64 = 100_000;

#[derive(Clone)]
pub struct MealService {
    store: JsonStore,
    calendar_service: CalendarService,
}

impl MealService {
    pub fn new(store: JsonStore, calendar_service: CalendarService) -> Self {
        Self {
            store,
            calendar_service,
        }
    }

    fn load(&self, user_id: u64) -> AppResult<MealMap> {
        Ok(self.store.load(&StorageKey::meals(user_id))?)
    }

    fn save(&self, user_id: u64, mut meals: MealMap) -> AppResult<()> {
        meals.retain(|_, day| !day.is_empty());
        Ok(self.store.save(&StorageKey::meals(user_id), &meals)?)
    }

    pub fn add_food_item(
        &self,
        user_id: u64,
        date: NaiveDate,
        meal_type: MealType,
        name: &str,
        calories_input: &str,
    ) -> AppResult<FoodItem> {
        if name.trim().is_empty() || calories_input.trim().is_empty() {
            return Err(AppError::validation("Please enter both food name and calories"));
        }
        let calories = validation::parse_leading_int(calories_input)
            .ok_or_else(|| AppError::validation("Calories must be a number"))?;
        if !(0..=MAX_ITEM_CALORIES).contains(&calories) {
            return Err(AppError::validation(format!(
                "Calories must be between 0 and {}",
                MAX_ITEM_CALORIES
            )));
        }

        let item = FoodItem {
            id: new_id("food"),
            name: name.trim().to_string(),
            calories,
            added_at: Utc::now(),
        };

        let key = CalendarService::format_date_key(date);
        let mut meals = self.load(user_id)?;
        meals
            .entry(key.clone())
            .or_default()
            .items_mut(meal_type)
            .push(item.clone());
        self.save(user_id, meals)?;

        info!(
            "Logged {} ({} kcal) for {} on {}",
            item.name, item.calories, meal_type, key
        );
        Ok(item)
    }

    pub fn remove_food_item(
        &self,
        user_id: u64,
        date: NaiveDate,
        meal_type: MealType,
        item_id: &str,
    ) -> AppResult<()> {
        let key = CalendarService::format_date_key(date);
        let mut meals = self.load(user_id)?;

        let items = meals
            .get_mut(&key)
            .map(|day| day.items_mut(meal_type))
            .ok_or_else(|| AppError::not_found(format!("No {} logged on {}", meal_type, key)))?;
        let before = items.len();
        items.retain(|item| item.id != item_id);
        if items.len() == before {
            return Err(AppError::not_found(format!("Food item {} not found", item_id)));
        }

        self.save(user_id, meals)
    }

    pub fn day_meals(&self, user_id: u64, date: NaiveDate) -> AppResult<DayMeals> {
        let key = CalendarService::format_date_key(date);
        Ok(self.load(user_id)?.remove(&key).unwrap_or_default())
    }

    pub fn meal_type_calories(&self, user_id: u64, date: NaiveDate, meal_type: MealType) -> AppResult<i64> {
        Ok(sum_calories(self.day_meals(user_id, date)?.items(meal_type)))
    }

    pub fn day_total_calories(&self, user_id: u64, date: NaiveDate) -> AppResult<i64> {
        Ok(day_total(&self.day_meals(user_id, date)?))
    }

    /// The day's meals with per-meal and overall calorie totals
    pub fn day_summary(&self, user_id: u64, date: NaiveDate) -> AppResult<DayMealsResponse> {
        let meals = self.day_meals(user_id, date)?;
        let calories_by_meal = MealCalories {
            breakfast: sum_calories(&meals.breakfast),
            lunch: sum_calories(&meals.lunch),
            dinner: sum_calories(&meals.dinner),
            snack: sum_calories(&meals.snack),
        };

        Ok(DayMealsResponse {
            date: CalendarService::format_date_key(date),
            total_calories: day_total(&meals),
            calories_by_meal,
            meals,
        })
    }

    /// Month grid carrying each day's calorie total
    pub fn calendar(
        &self,
        user_id: u64,
        month: u32,
        year: i32,
        selected: NaiveDate,
    ) -> AppResult<CalendarMonth> {
        let meals = self.load(user_id)?;
        let today = self.calendar_service.today();

        self.calendar_service
            .generate_calendar_month(month, year, today, selected, |date| {
                match meals.get(&CalendarService::format_date_key(date)) {
                    Some(day) => DaySummary {
                        item_count: MealType::ALL.iter().map(|m| day.items(*m).len()).sum(),
                        total_calories: day_total(day),
                        ..DaySummary::default()
                    },
                    None => DaySummary::default(),
                }
            })
    }
}

fn sum_calories(items: &[FoodItem]) -> i64 {
    items.iter().map(|item| item.calories).sum()
}

fn day_total(day: &DayMeals) -> i64 {
    MealType::ALL.iter().map(|m| sum_calories(day.items(*m))).sum()
}
