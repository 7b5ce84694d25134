//! Recipe ideas for the cooking page.
//!
//! Suggestions come from fixed templates picked by keyword matching on the
//! ingredient names. A configured completion API key only changes what gets
//! logged: the prompt is built and recorded, and the template path answers.

use shared::{
    DetailedIngredient, DetailedRecipe, NutritionInfo, RecipeStep, RecipeSuggestion,
    RecipeSuggestionsRequest,
};
use tracing::{debug, info};

use crate::domain::pantry_service::PantryService;
use crate::error::{AppError, AppResult};

const PLACEHOLDER_API_KEY: &str = "your_openai_api_key_here";
const MAX_USED_INGREDIENTS: usize = 4;

const VEGETABLES: &[&str] = &[
    "tomato", "onion", "carrot", "potato", "bell pepper", "broccoli", "spinach", "lettuce",
    "cucumber", "zucchini", "mushroom", "garlic", "celery",
];
/// Vegetables that can headline a stir fry
const STIR_FRY_VEGETABLES: &[&str] = &[
    "tomato", "onion", "carrot", "potato", "bell pepper", "broccoli", "spinach", "zucchini",
    "mushroom",
];
const MEATS: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salmon", "turkey", "bacon", "ham", "sausage",
];
const MAIN_MEATS: &[&str] = &["chicken", "beef", "pork", "fish", "salmon", "turkey"];
const GRAINS: &[&str] = &["rice", "pasta", "bread", "quinoa", "oats", "flour", "noodles"];
const MAIN_GRAINS: &[&str] = &["rice", "pasta", "quinoa", "oats"];

const CREATIVE_ADJECTIVES: [&str; 6] = ["Fusion", "Harmony", "Medley", "Symphony", "Blend", "Surprise"];

fn matches_any(ingredient: &str, keywords: &[&str]) -> bool {
    let lower = ingredient.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

fn contains_any(ingredients: &[String], keywords: &[&str]) -> bool {
    ingredients.iter().any(|ing| matches_any(ing, keywords))
}

fn first_matching<'a>(ingredients: &'a [String], keywords: &[&str]) -> Option<&'a str> {
    ingredients
        .iter()
        .find(|ing| matches_any(ing, keywords))
        .map(String::as_str)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Used ingredients without the headline one
fn others(used: &[String], main: &str) -> String {
    used.iter()
        .filter(|ing| ing.as_str() != main)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

struct Template<'a> {
    name: String,
    description: String,
    cooking_time: &'a str,
    difficulty: &'a str,
    instructions: Vec<String>,
    servings: u32,
    additional: &'a [&'a str],
}

impl Template<'_> {
    fn build(self, used: &[String]) -> RecipeSuggestion {
        let additional = strings(self.additional);
        let mut ingredients = used.to_vec();
        ingredients.extend(additional.iter().cloned());

        RecipeSuggestion {
            name: self.name,
            description: self.description,
            cooking_time: self.cooking_time.to_string(),
            difficulty: self.difficulty.to_string(),
            ingredients,
            instructions: self.instructions,
            servings: self.servings,
            used_ingredients: used.to_vec(),
            additional_ingredients: additional,
        }
    }
}

#[derive(Clone)]
pub struct RecipeAiService {
    api_key: Option<String>,
    pantry_service: PantryService,
}

impl RecipeAiService {
    pub fn new(api_key: Option<String>, pantry_service: PantryService) -> Self {
        Self {
            api_key,
            pantry_service,
        }
    }

    pub fn is_service_available(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
    }

    /// Suggestions for the request, using the pantry contents when the
    /// request names no ingredients
    pub fn suggest_recipes(&self, user_id: u64, request: RecipeSuggestionsRequest) -> AppResult<Vec<RecipeSuggestion>> {
        let mut ingredients: Vec<String> = request
            .ingredients
            .iter()
            .map(|ing| ing.trim().to_string())
            .filter(|ing| !ing.is_empty())
            .collect();

        if ingredients.is_empty() {
            ingredients = self.pantry_service.ingredient_names(user_id)?;
            debug!("Using {} pantry items as ingredients", ingredients.len());
        }
        if ingredients.is_empty() {
            return Err(AppError::validation(
                "Add some ingredients to your pantry first",
            ));
        }

        let meal_type = request.meal_type.as_deref().unwrap_or("any");
        Ok(self.generate_recipe_suggestions(&ingredients, &request.dietary_restrictions, meal_type))
    }

    /// Exactly three suggestions: one by ingredient class, one by meal type,
    /// one creative
    pub fn generate_recipe_suggestions(
        &self,
        ingredients: &[String],
        dietary_restrictions: &[String],
        meal_type: &str,
    ) -> Vec<RecipeSuggestion> {
        if self.is_service_available() {
            info!(
                "Completion prompt prepared: {}",
                self.build_prompt(ingredients, dietary_restrictions, meal_type)
            );
        }
        info!("Generating template recipes for ingredients: {:?}", ingredients);

        let used: Vec<String> = ingredients.iter().take(MAX_USED_INGREDIENTS).cloned().collect();

        let primary = if contains_any(ingredients, VEGETABLES) {
            vegetable_recipe(ingredients, &used)
        } else if contains_any(ingredients, MEATS) {
            meat_recipe(ingredients, &used)
        } else if contains_any(ingredients, GRAINS) {
            grain_recipe(ingredients, &used)
        } else {
            generic_recipe(&used)
        };

        let by_meal_type = match meal_type {
            "breakfast" => breakfast_recipe(&used),
            "dessert" => dessert_recipe(&used),
            _ => quick_recipe(&used),
        };

        vec![primary, by_meal_type, creative_recipe(&used)]
    }

    pub fn build_prompt(&self, ingredients: &[String], dietary_restrictions: &[String], meal_type: &str) -> String {
        let restrictions = if dietary_restrictions.is_empty() {
            String::new()
        } else {
            format!("Dietary restrictions: {}. ", dietary_restrictions.join(", "))
        };
        let meal = if meal_type == "any" {
            String::new()
        } else {
            format!("Meal type: {}. ", meal_type)
        };

        format!(
            "Based on these available ingredients: {}, suggest 3 recipes. {}{}\n\n\
             Please respond with a JSON object in this exact format:\n\
             {{\n  \"recipes\": [\n    {{\n      \"name\": \"Recipe Name\",\n      \
             \"description\": \"Brief description\",\n      \"cookingTime\": \"30 minutes\",\n      \
             \"difficulty\": \"Easy\",\n      \"ingredients\": [\"ingredient 1\", \"ingredient 2\"],\n      \
             \"instructions\": [\"Step 1\", \"Step 2\", \"Step 3\"],\n      \"servings\": 4,\n      \
             \"usedIngredients\": [\"ingredients from pantry that are used\"],\n      \
             \"additionalIngredients\": [\"ingredients needed but not in pantry\"]\n    }}\n  ]\n}}",
            ingredients.join(", "),
            restrictions,
            meal
        )
    }

    pub fn generate_detailed_recipe(&self, name: &str, ingredients: &[String]) -> DetailedRecipe {
        let main = ingredients.first().map(String::as_str);
        let featured: Vec<&str> = ingredients.iter().take(3).map(String::as_str).collect();

        let mut detailed_ingredients: Vec<DetailedIngredient> = ingredients
            .iter()
            .take(MAX_USED_INGREDIENTS)
            .map(|ing| DetailedIngredient {
                item: ing.clone(),
                amount: "1 cup".to_string(),
                notes: "fresh if available".to_string(),
            })
            .collect();
        for (item, amount, notes) in [
            ("Olive oil", "2 tbsp", "extra virgin"),
            ("Salt", "1 tsp", "to taste"),
            ("Black pepper", "1/2 tsp", "freshly ground"),
        ] {
            detailed_ingredients.push(DetailedIngredient {
                item: item.to_string(),
                amount: amount.to_string(),
                notes: notes.to_string(),
            });
        }

        let steps = [
            ("Prepare all ingredients by washing, peeling, and chopping as needed".to_string(), "10 minutes"),
            ("Heat olive oil in a large pan over medium heat".to_string(), "2 minutes"),
            (
                format!("Add {} and cook until starting to soften", main.unwrap_or("main ingredient")),
                "8 minutes",
            ),
            ("Add remaining ingredients and seasonings".to_string(), "5 minutes"),
            (
                "Continue cooking until everything is tender and flavors are well combined".to_string(),
                "15 minutes",
            ),
            ("Taste and adjust seasoning as needed, then serve hot".to_string(), "3 minutes"),
        ];

        DetailedRecipe {
            name: name.to_string(),
            description: format!(
                "A delicious recipe featuring {} and other complementary ingredients",
                featured.join(", ")
            ),
            prep_time: "15 minutes".to_string(),
            cook_time: "30 minutes".to_string(),
            total_time: "45 minutes".to_string(),
            difficulty: "Medium".to_string(),
            servings: 4,
            ingredients: detailed_ingredients,
            instructions: steps
                .into_iter()
                .zip(1..)
                .map(|((instruction, time), step)| RecipeStep {
                    step,
                    instruction,
                    time: time.to_string(),
                })
                .collect(),
            tips: vec![
                format!("Make sure {} are fresh for the best flavor", main.unwrap_or("ingredients")),
                "Don't overcook the vegetables to maintain their texture and nutrients".to_string(),
                "This recipe can be made ahead and reheated gently".to_string(),
                "Feel free to adjust spices according to your taste preferences".to_string(),
            ],
            nutrition: NutritionInfo {
                calories: 285,
                protein: "12g".to_string(),
                carbs: "35g".to_string(),
                fat: "8g".to_string(),
            },
        }
    }
}

fn vegetable_recipe(ingredients: &[String], used: &[String]) -> RecipeSuggestion {
    let featured = used.join(", ");
    Template {
        name: format!(
            "Fresh {} Stir Fry",
            first_matching(ingredients, STIR_FRY_VEGETABLES).unwrap_or("Vegetable")
        ),
        description: format!("A healthy and colorful stir fry featuring {}", featured),
        cooking_time: "20 minutes",
        difficulty: "Easy",
        instructions: vec![
            format!("Wash and chop {}", featured),
            "Heat olive oil in a large pan or wok".to_string(),
            "Add garlic and ginger, stir for 30 seconds".to_string(),
            "Add vegetables starting with harder ones first".to_string(),
            "Stir fry for 8-10 minutes until tender-crisp".to_string(),
            "Season with soy sauce and serve hot".to_string(),
        ],
        servings: 3,
        additional: &["olive oil", "soy sauce", "garlic", "ginger"],
    }
    .build(used)
}

fn meat_recipe(ingredients: &[String], used: &[String]) -> RecipeSuggestion {
    let main = first_matching(ingredients, MAIN_MEATS).unwrap_or("chicken");
    Template {
        name: format!("Savory {} Skillet", capitalize(main)),
        description: format!("A protein-rich dish featuring {} with {}", main, others(used, main)),
        cooking_time: "35 minutes",
        difficulty: "Medium",
        instructions: vec![
            format!("Season {} with salt and pepper", main),
            "Heat olive oil in a large skillet over medium-high heat".to_string(),
            format!("Cook {} until golden brown and cooked through", main),
            "Remove meat and set aside".to_string(),
            "Add remaining ingredients to the same pan".to_string(),
            "Cook until tender, then return meat to pan".to_string(),
            "Simmer together for 5 minutes and serve".to_string(),
        ],
        servings: 4,
        additional: &["olive oil", "salt", "pepper", "herbs"],
    }
    .build(used)
}

fn grain_recipe(ingredients: &[String], used: &[String]) -> RecipeSuggestion {
    let main = first_matching(ingredients, MAIN_GRAINS).unwrap_or("rice");
    Template {
        name: format!("{} Bowl", capitalize(main)),
        description: format!("A hearty bowl featuring {} with {}", main, others(used, main)),
        cooking_time: "25 minutes",
        difficulty: "Easy",
        instructions: vec![
            format!("Cook {} according to package directions using vegetable broth", main),
            "While grain cooks, prepare other ingredients".to_string(),
            "Heat olive oil in a pan".to_string(),
            "Sauté remaining ingredients until tender".to_string(),
            "Combine cooked grain with sautéed ingredients".to_string(),
            "Season to taste and serve warm".to_string(),
        ],
        servings: 3,
        additional: &["vegetable broth", "olive oil", "seasonings"],
    }
    .build(used)
}

fn generic_recipe(used: &[String]) -> RecipeSuggestion {
    Template {
        name: format!("Simple {} Medley", used.join(" & ")),
        description: format!("A straightforward dish highlighting {}", used.join(", ")),
        cooking_time: "25 minutes",
        difficulty: "Easy",
        instructions: strings(&[
            "Prepare all ingredients by cleaning and chopping",
            "Heat oil in a suitable cooking vessel",
            "Add ingredients in order of cooking time needed",
            "Cook until all ingredients are tender",
            "Season with salt and pepper to taste",
            "Serve hot and enjoy",
        ]),
        servings: 3,
        additional: &["oil", "salt", "pepper"],
    }
    .build(used)
}

fn breakfast_recipe(used: &[String]) -> RecipeSuggestion {
    Template {
        name: format!(
            "Morning {} Scramble",
            used.first().map(String::as_str).unwrap_or("Ingredient")
        ),
        description: format!("A nutritious breakfast featuring {}", used.join(", ")),
        cooking_time: "15 minutes",
        difficulty: "Easy",
        instructions: strings(&[
            "Prepare and chop all ingredients",
            "Heat butter in a non-stick pan",
            "Add ingredients and cook until tender",
            "Beat eggs and pour into the pan",
            "Scramble everything together until eggs are set",
            "Season with salt and pepper, serve hot",
        ]),
        servings: 2,
        additional: &["eggs", "butter", "salt", "pepper"],
    }
    .build(used)
}

fn dessert_recipe(used: &[String]) -> RecipeSuggestion {
    Template {
        name: format!(
            "Sweet {} Delight",
            used.first().map(String::as_str).unwrap_or("Fruit")
        ),
        description: format!("A simple dessert showcasing {}", used.join(", ")),
        cooking_time: "20 minutes",
        difficulty: "Easy",
        instructions: strings(&[
            "Prepare main ingredients by washing and chopping",
            "Combine with sugar in a saucepan",
            "Cook over medium heat until tender",
            "Add vanilla and stir",
            "Serve warm or chilled with cream",
            "Garnish as desired",
        ]),
        servings: 4,
        additional: &["sugar", "vanilla", "cream"],
    }
    .build(used)
}

fn quick_recipe(used: &[String]) -> RecipeSuggestion {
    Template {
        name: format!(
            "Quick {} Sauté",
            used.first().map(String::as_str).unwrap_or("Ingredient")
        ),
        description: format!("A fast and easy dish with {}", used.join(", ")),
        cooking_time: "12 minutes",
        difficulty: "Very Easy",
        instructions: strings(&[
            "Heat olive oil in a large pan",
            "Add garlic and cook for 30 seconds",
            "Add main ingredients and sauté quickly",
            "Cook until just tender",
            "Finish with lemon juice",
            "Serve immediately while hot",
        ]),
        servings: 2,
        additional: &["olive oil", "garlic", "lemon"],
    }
    .build(used)
}

/// Adjective picked from the ingredient names so the same pantry always
/// yields the same name
pub fn creative_name(used: &[String]) -> String {
    let seed: usize = used.iter().flat_map(|ing| ing.bytes()).map(usize::from).sum();
    let adjective = CREATIVE_ADJECTIVES[seed % CREATIVE_ADJECTIVES.len()];
    let main = used.first().map(String::as_str).unwrap_or("Garden");
    format!("{} {} Creation", adjective, capitalize(main))
}

fn creative_recipe(used: &[String]) -> RecipeSuggestion {
    Template {
        name: creative_name(used),
        description: format!(
            "A creative fusion dish combining {} in an unexpected way",
            used.join(", ")
        ),
        cooking_time: "30 minutes",
        difficulty: "Medium",
        instructions: strings(&[
            "Prepare all ingredients with creative cuts and preparations",
            "Heat coconut oil in a large pan",
            "Layer ingredients based on cooking times",
            "Add spices and herbs for complex flavors",
            "Cook until everything is perfectly tender",
            "Plate creatively and serve with pride",
        ]),
        servings: 3,
        additional: &["coconut oil", "spices", "fresh herbs"],
    }
    .build(used)
}
