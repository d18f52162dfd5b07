//! Recipe Tools
//!
//! Read models for saved recipes and the ingredient draft, with food names
//! resolved from the catalog.

use serde::Serialize;

use crate::models::{Ingredient, Nutrition, Recipe};
use crate::nutrition::{calculate_nutrition, calculate_pfc_balance, PfcBalance};
use crate::stores::RecipeStore;

/// An ingredient line with its food resolved, when the food still exists
#[derive(Debug, Serialize)]
pub struct IngredientDetail {
    pub food_id: String,
    pub food_name: Option<String>,
    pub amount: f64,
    pub unit: Option<String>,
    /// Zero when the food is unknown
    pub nutrition: Nutrition,
}

/// Full recipe detail
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub servings: u32,
    pub ingredients: Vec<IngredientDetail>,
    pub total_nutrition: Nutrition,
    pub nutrition_per_serving: Nutrition,
    pub pfc_balance: PfcBalance,
    pub created_at: String,
    pub updated_at: String,
}

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub servings: u32,
    pub calories: f64,
    pub calories_per_serving: f64,
    pub protein: f64,
    pub ingredient_count: usize,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub total: usize,
}

/// The ingredient draft and its running total
#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub ingredients: Vec<IngredientDetail>,
    pub nutrition: Nutrition,
}

fn ingredient_detail(store: &RecipeStore, ingredient: &Ingredient) -> IngredientDetail {
    let food = store.get_food_by_id(&ingredient.food_id);
    IngredientDetail {
        food_id: ingredient.food_id.clone(),
        food_name: food.map(|f| f.name.clone()),
        amount: ingredient.amount,
        unit: food.map(|f| f.unit.clone()),
        nutrition: food
            .map(|f| calculate_nutrition(f, ingredient.amount))
            .unwrap_or_default(),
    }
}

fn summary(recipe: &Recipe) -> RecipeSummary {
    RecipeSummary {
        id: recipe.id.clone(),
        name: recipe.name.clone(),
        servings: recipe.servings,
        calories: recipe.total_nutrition().calories,
        calories_per_serving: recipe.nutrition_per_serving().calories,
        protein: recipe.total_nutrition().protein,
        ingredient_count: recipe.ingredients().len(),
    }
}

/// List saved recipes, optionally filtered by name
pub fn list_recipes(store: &RecipeStore, query: Option<&str>) -> ListRecipesResponse {
    let recipes: Vec<RecipeSummary> = store
        .search_recipes(query.unwrap_or(""))
        .into_iter()
        .map(summary)
        .collect();

    ListRecipesResponse {
        total: store.recipes().len(),
        recipes,
    }
}

/// Get a recipe by id with its ingredient lines resolved
pub fn get_recipe(store: &RecipeStore, id: &str) -> Option<RecipeDetail> {
    let recipe = store.get_recipe(id)?;

    Some(RecipeDetail {
        id: recipe.id.clone(),
        name: recipe.name.clone(),
        description: recipe.description.clone(),
        servings: recipe.servings,
        ingredients: recipe
            .ingredients()
            .iter()
            .map(|i| ingredient_detail(store, i))
            .collect(),
        total_nutrition: *recipe.total_nutrition(),
        nutrition_per_serving: recipe.nutrition_per_serving(),
        pfc_balance: calculate_pfc_balance(recipe.total_nutrition()),
        created_at: recipe.created_at.to_rfc3339(),
        updated_at: recipe.updated_at.to_rfc3339(),
    })
}

/// The current ingredient draft
pub fn current_draft(store: &RecipeStore) -> DraftResponse {
    DraftResponse {
        ingredients: store
            .current_ingredients()
            .iter()
            .map(|i| ingredient_detail(store, i))
            .collect(),
        nutrition: store.get_current_nutrition(),
    }
}
