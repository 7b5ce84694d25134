//! Ingredient inventory.
//!
//! Items live under `pantry_<userId>` in insertion order. Grouping and the
//! expiry view are computed on read.

use chrono::{Duration, NaiveDate, Utc};
use shared::{PantryCategoryGroup, PantryItem, PantryItemRequest};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::domain::calendar::CalendarService;
use crate::domain::{new_id, validation};
use crate::error::{AppError, AppResult};
use crate::storage::{JsonStore, StorageKey};

pub const UNCATEGORIZED: &str = "Other";

#[derive(Clone)]
pub struct PantryService {
    store: JsonStore,
}

/// Validated fields shared by add and update
struct ValidItem {
    name: String,
    quantity: f64,
    unit: String,
    category: String,
    expiration_date: Option<NaiveDate>,
}

fn validate(request: &PantryItemRequest) -> AppResult<ValidItem> {
    let name = validation::required(&request.name, "Item name is required")?;
    if !request.quantity.is_finite() || request.quantity <= 0.0 {
        return Err(AppError::validation("Quantity must be greater than 0"));
    }

    let expiration_date = match request.expiration_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => Some(CalendarService::parse_date_key(date)?),
        _ => None,
    };

    Ok(ValidItem {
        name,
        quantity: request.quantity,
        unit: request.unit.trim().to_string(),
        category: request.category.trim().to_string(),
        expiration_date,
    })
}

impl PantryService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub fn list_items(&self, user_id: u64) -> AppResult<Vec<PantryItem>> {
        Ok(self.store.load(&StorageKey::pantry(user_id))?)
    }

    fn save(&self, user_id: u64, items: &[PantryItem]) -> AppResult<()> {
        Ok(self.store.save(&StorageKey::pantry(user_id), items)?)
    }

    pub fn add_item(&self, user_id: u64, request: PantryItemRequest) -> AppResult<PantryItem> {
        let valid = validate(&request)?;
        let item = PantryItem {
            id: new_id("pantry"),
            name: valid.name,
            quantity: valid.quantity,
            unit: valid.unit,
            category: valid.category,
            expiration_date: valid.expiration_date,
            location: request.location,
            added_at: Utc::now(),
        };

        let mut items = self.list_items(user_id)?;
        items.push(item.clone());
        self.save(user_id, &items)?;

        info!("Added pantry item '{}' for user {}", item.name, user_id);
        Ok(item)
    }

    pub fn update_item(
        &self,
        user_id: u64,
        item_id: &str,
        request: PantryItemRequest,
    ) -> AppResult<PantryItem> {
        let valid = validate(&request)?;
        let mut items = self.list_items(user_id)?;

        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| AppError::not_found(format!("Pantry item {} not found", item_id)))?;
        item.name = valid.name;
        item.quantity = valid.quantity;
        item.unit = valid.unit;
        item.category = valid.category;
        item.expiration_date = valid.expiration_date;
        item.location = request.location;
        let updated = item.clone();

        self.save(user_id, &items)?;
        info!("Updated pantry item {} for user {}", item_id, user_id);
        Ok(updated)
    }

    pub fn remove_item(&self, user_id: u64, item_id: &str) -> AppResult<()> {
        let mut items = self.list_items(user_id)?;
        let before = items.len();
        items.retain(|item| item.id != item_id);

        if items.len() == before {
            return Err(AppError::not_found(format!("Pantry item {} not found", item_id)));
        }
        self.save(user_id, &items)
    }

    /// Items grouped by category name; uncategorized items go under "Other"
    pub fn group_by_category(&self, user_id: u64) -> AppResult<Vec<PantryCategoryGroup>> {
        let mut groups: BTreeMap<String, Vec<PantryItem>> = BTreeMap::new();

        for item in self.list_items(user_id)? {
            let category = if item.category.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                item.category.clone()
            };
            groups.entry(category).or_default().push(item);
        }

        Ok(groups
            .into_iter()
            .map(|(category, items)| PantryCategoryGroup { category, items })
            .collect())
    }

    /// Items expiring on or before `today + days`, soonest first.
    /// Already expired items are included.
    pub fn expiring_within(&self, user_id: u64, today: NaiveDate, days: i64) -> AppResult<Vec<PantryItem>> {
        let cutoff = Duration::try_days(days.max(0))
            .and_then(|window| today.checked_add_signed(window))
            .ok_or_else(|| AppError::validation("Expiry window is too large"))?;
        debug!("Checking pantry expiry up to {}", cutoff);

        let mut expiring: Vec<PantryItem> = self
            .list_items(user_id)?
            .into_iter()
            .filter(|item| item.expiration_date.is_some_and(|date| date <= cutoff))
            .collect();
        expiring.sort_by_key(|item| item.expiration_date);
        Ok(expiring)
    }

    /// Names of everything in the pantry, used as recipe ingredients
    pub fn ingredient_names(&self, user_id: u64) -> AppResult<Vec<String>> {
        Ok(self
            .list_items(user_id)?
            .into_iter()
            .map(|item| item.name)
            .collect())
    }
}
