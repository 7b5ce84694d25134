use chrono::Utc;
use shared::{CreateRecipeRequest, Recipe, RecipeIngredient, RecipeSuggestion};
use tracing::info;

use crate::domain::{new_id, validation};
use crate::error::{AppError, AppResult};
use crate::storage::{JsonStore, StorageKey};

const PANTRY_AMOUNT: &str = "1";
const ADDITIONAL_AMOUNT: &str = "to taste";

/// The user's saved recipe collection, kept in creation order
#[derive(Clone)]
pub struct RecipeService {
    store: JsonStore,
}

impl RecipeService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub fn list_recipes(&self, user_id: u64) -> AppResult<Vec<Recipe>> {
        Ok(self.store.load(&StorageKey::recipes(user_id))?)
    }

    fn append(&self, user_id: u64, recipe: Recipe) -> AppResult<Recipe> {
        let mut recipes = self.list_recipes(user_id)?;
        recipes.push(recipe.clone());
        self.store.save(&StorageKey::recipes(user_id), &recipes)?;

        info!(
            "Saved recipe '{}' with {} ingredients for user {}",
            recipe.name,
            recipe.ingredients.len(),
            user_id
        );
        Ok(recipe)
    }

    pub fn create_recipe(&self, user_id: u64, request: CreateRecipeRequest) -> AppResult<Recipe> {
        let name = validation::required(&request.name, "Recipe name is required")?;
        if request.ingredients.is_empty() {
            return Err(AppError::validation("A recipe needs at least one ingredient"));
        }

        let ingredients = request
            .ingredients
            .iter()
            .map(|input| {
                if input.name.trim().is_empty() || input.amount.trim().is_empty() {
                    return Err(AppError::validation(
                        "Each ingredient needs a name and an amount",
                    ));
                }
                Ok(RecipeIngredient {
                    id: new_id("ingredient"),
                    name: input.name.trim().to_string(),
                    amount: input.amount.trim().to_string(),
                    unit: input.unit.trim().to_string(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        self.append(
            user_id,
            Recipe {
                id: new_id("recipe"),
                name,
                description: request.description.trim().to_string(),
                ingredients,
                created_at: Utc::now(),
            },
        )
    }

    /// Keep a generated suggestion in the collection
    pub fn save_suggestion(&self, user_id: u64, suggestion: RecipeSuggestion) -> AppResult<Recipe> {
        let name = validation::required(&suggestion.name, "Recipe name is required")?;

        let ingredient = |name: &String, amount: &str| RecipeIngredient {
            id: new_id("ingredient"),
            name: name.clone(),
            amount: amount.to_string(),
            unit: String::new(),
        };
        let ingredients: Vec<RecipeIngredient> = suggestion
            .used_ingredients
            .iter()
            .map(|name| ingredient(name, PANTRY_AMOUNT))
            .chain(
                suggestion
                    .additional_ingredients
                    .iter()
                    .map(|name| ingredient(name, ADDITIONAL_AMOUNT)),
            )
            .collect();

        if ingredients.is_empty() {
            return Err(AppError::validation("A recipe needs at least one ingredient"));
        }

        self.append(
            user_id,
            Recipe {
                id: new_id("recipe"),
                name,
                description: suggestion.description,
                ingredients,
                created_at: Utc::now(),
            },
        )
    }

    pub fn delete_recipe(&self, user_id: u64, recipe_id: &str) -> AppResult<()> {
        let mut recipes = self.list_recipes(user_id)?;
        let before = recipes.len();
        recipes.retain(|r| r.id != recipe_id);

        if recipes.len() == before {
            return Err(AppError::not_found(format!("Recipe {} not found", recipe_id)));
        }

        self.store.save(&StorageKey::recipes(user_id), &recipes)?;
        info!("Deleted recipe {} for user {}", recipe_id, user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;
    use shared::IngredientInput;

    fn setup() -> (RecipeService, TestEnvironment) {
        let env = TestEnvironment::new();
        (RecipeService::new(env.store.clone()), env)
    }

    fn ingredient(name: &str, amount: &str, unit: &str) -> IngredientInput {
        IngredientInput {
            name: name.to_string(),
            amount: amount.to_string(),
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_create_and_list_recipes() {
        let (service, _env) = setup();

        let recipe = service
            .create_recipe(
                1,
                CreateRecipeRequest {
                    name: " Pancakes ".to_string(),
                    description: "Sunday breakfast".to_string(),
                    ingredients: vec![ingredient("Flour", "2", "cups"), ingredient("Egg", "1", "")],
                },
            )
            .unwrap();

        assert_eq!(recipe.name, "Pancakes");
        assert_eq!(recipe.ingredients.len(), 2);
        assert!(recipe.id.starts_with("recipe::"));

        let recipes = service.list_recipes(1).unwrap();
        assert_eq!(recipes, vec![recipe]);
        assert!(service.list_recipes(2).unwrap().is_empty());
    }

    #[test]
    fn test_create_recipe_validation() {
        let (service, _env) = setup();

        let no_ingredients = CreateRecipeRequest {
            name: "Toast".to_string(),
            description: String::new(),
            ingredients: vec![],
        };
        assert!(matches!(service.create_recipe(1, no_ingredients), Err(AppError::Validation(_))));

        let no_amount = CreateRecipeRequest {
            name: "Toast".to_string(),
            description: String::new(),
            ingredients: vec![ingredient("Bread", " ", "")],
        };
        assert!(matches!(service.create_recipe(1, no_amount), Err(AppError::Validation(_))));

        let no_name = CreateRecipeRequest {
            name: "".to_string(),
            description: String::new(),
            ingredients: vec![ingredient("Bread", "2", "slices")],
        };
        assert!(matches!(service.create_recipe(1, no_name), Err(AppError::Validation(_))));
        assert!(service.list_recipes(1).unwrap().is_empty());
    }

    #[test]
    fn test_save_suggestion_marks_additional_ingredients() {
        let (service, _env) = setup();
        let suggestion = RecipeSuggestion {
            name: "Chicken Skillet".to_string(),
            description: "One pan dinner".to_string(),
            cooking_time: "25 minutes".to_string(),
            difficulty: "Easy".to_string(),
            ingredients: vec![],
            instructions: vec![],
            servings: 4,
            used_ingredients: vec!["chicken".to_string()],
            additional_ingredients: vec!["salt".to_string(), "pepper".to_string()],
        };

        let recipe = service.save_suggestion(1, suggestion).unwrap();
        let amounts: Vec<_> = recipe.ingredients.iter().map(|i| i.amount.as_str()).collect();
        assert_eq!(amounts, vec!["1", "to taste", "to taste"]);
        assert_eq!(recipe.description, "One pan dinner");
    }

    #[test]
    fn test_delete_recipe() {
        let (service, _env) = setup();
        let recipe = service
            .create_recipe(
                1,
                CreateRecipeRequest {
                    name: "Soup".to_string(),
                    description: String::new(),
                    ingredients: vec![ingredient("Stock", "1", "l")],
                },
            )
            .unwrap();

        service.delete_recipe(1, &recipe.id).unwrap();
        assert!(service.list_recipes(1).unwrap().is_empty());
        assert!(matches!(service.delete_recipe(1, &recipe.id), Err(AppError::NotFound(_))));
    }
}
