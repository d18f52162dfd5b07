//! Recipe store
//!
//! Owns saved recipes, the food catalog and the in-progress ingredient
//! draft. Saved recipes are written through to the database after every
//! change; the draft and catalog are never persisted.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::FoodCatalog;
use crate::db::{Database, DbResult};
use crate::models::{Food, Ingredient, Nutrition, Recipe, RecipeCreate, RecipeUpdate};
use crate::nutrition::calculate_total_nutrition;

use super::RecipeLookup;

/// Recipes, foods and the ingredient draft
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    catalog: FoodCatalog,
    draft: Vec<Ingredient>,
    database: Option<Database>,
}

impl RecipeStore {
    /// In-memory store with no persistence
    pub fn new(catalog: FoodCatalog) -> Self {
        Self {
            recipes: Vec::new(),
            catalog,
            draft: Vec::new(),
            database: None,
        }
    }

    /// Store backed by `database`, starting from the recipes saved there
    pub fn open(catalog: FoodCatalog, database: Database) -> DbResult<Self> {
        let recipes = database.with_conn(Recipe::load_all)?;
        info!(recipes = recipes.len(), foods = catalog.len(), "Loaded recipe store");

        Ok(Self {
            recipes,
            catalog,
            draft: Vec::new(),
            database: Some(database),
        })
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    pub fn foods(&self) -> &[Food] {
        self.catalog.foods()
    }

    pub fn search_foods(&self, query: &str) -> Vec<&Food> {
        self.catalog.search_foods(query)
    }

    pub fn get_food_by_id(&self, id: &str) -> Option<&Food> {
        self.catalog.get_food_by_id(id)
    }

    /// Total nutrition of an arbitrary ingredient list against this catalog
    pub fn total_for(&self, ingredients: &[Ingredient]) -> Nutrition {
        calculate_total_nutrition(ingredients, |id| self.catalog.get_food_by_id(id))
    }

    // ------------------------------------------------------------------
    // Ingredient draft
    // ------------------------------------------------------------------

    /// The draft being assembled for the next recipe
    pub fn current_ingredients(&self) -> &[Ingredient] {
        &self.draft
    }

    /// Add to the draft, merging with an existing entry for the same food
    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        if !ingredient.is_valid() {
            debug!(food_id = %ingredient.food_id, amount = ingredient.amount, "Ignoring invalid ingredient");
            return;
        }

        match self.draft.iter_mut().find(|i| i.food_id == ingredient.food_id) {
            Some(existing) => existing.amount += ingredient.amount,
            None => self.draft.push(ingredient),
        }
    }

    /// Replace the amount for a drafted food; no-op if it is not drafted
    pub fn update_ingredient(&mut self, food_id: &str, amount: f64) {
        if !Ingredient::is_valid_amount(amount) {
            debug!(food_id, amount, "Ignoring invalid ingredient amount");
            return;
        }

        if let Some(existing) = self.draft.iter_mut().find(|i| i.food_id == food_id) {
            existing.amount = amount;
        }
    }

    /// Drop a food from the draft; no-op if it is not drafted
    pub fn remove_ingredient(&mut self, food_id: &str) {
        self.draft.retain(|i| i.food_id != food_id);
    }

    pub fn clear_ingredients(&mut self) {
        self.draft.clear();
    }

    /// Replace the draft with a saved recipe's ingredients
    /// Returns false (draft untouched) if the recipe does not exist
    pub fn load_ingredients(&mut self, recipe_id: &str) -> bool {
        match self.recipes.iter().find(|r| r.id == recipe_id) {
            Some(recipe) => {
                self.draft = recipe.ingredients.clone();
                true
            }
            None => false,
        }
    }

    /// Nutrition of the current draft, recomputed on every call
    pub fn get_current_nutrition(&self) -> Nutrition {
        self.total_for(&self.draft)
    }

    // ------------------------------------------------------------------
    // Recipes
    // ------------------------------------------------------------------

    /// All saved recipes, oldest first
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get_recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Case-insensitive name filter; a blank query returns everything
    pub fn search_recipes(&self, query: &str) -> Vec<&Recipe> {
        let needle = query.trim().to_lowercase();
        self.recipes
            .iter()
            .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Save the current draft as a new recipe and clear the draft
    ///
    /// Returns `None` without touching anything when the name is blank,
    /// servings is zero or the draft is empty.
    pub fn add_recipe(&mut self, data: RecipeCreate) -> Option<Recipe> {
        let name = data.name.trim();
        if name.is_empty() {
            debug!("Rejecting recipe with blank name");
            return None;
        }
        if data.servings == 0 {
            debug!(name, "Rejecting recipe with zero servings");
            return None;
        }
        if self.draft.is_empty() {
            debug!(name, "Rejecting recipe with no ingredients");
            return None;
        }

        let now = Utc::now();
        let recipe = Recipe {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: clean_description(data.description),
            ingredients: self.draft.clone(),
            total_nutrition: self.get_current_nutrition(),
            servings: data.servings,
            created_at: now,
            updated_at: now,
        };

        self.recipes.push(recipe.clone());
        self.draft.clear();
        self.persist_recipe(&recipe);

        debug!(id = %recipe.id, name = %recipe.name, "Saved recipe");
        Some(recipe)
    }

    /// Merge `update` into a saved recipe and bump `updated_at`
    ///
    /// When the update carries ingredients, the nutrition total is
    /// recomputed from them. Returns `None` if the recipe does not exist or
    /// the update is invalid (blank name, zero servings, empty or invalid
    /// ingredient list), in which case nothing changes.
    pub fn update_recipe(&mut self, id: &str, update: RecipeUpdate) -> Option<Recipe> {
        let idx = self.recipes.iter().position(|r| r.id == id)?;

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                debug!(id, "Rejecting recipe update with blank name");
                return None;
            }
        }
        if update.servings == Some(0) {
            debug!(id, "Rejecting recipe update with zero servings");
            return None;
        }
        if let Some(ingredients) = &update.ingredients {
            if ingredients.is_empty() || ingredients.iter().any(|i| !i.is_valid()) {
                debug!(id, "Rejecting recipe update with invalid ingredients");
                return None;
            }
        }

        let new_total = update.ingredients.as_deref().map(|i| self.total_for(i));
        let recipe = &mut self.recipes[idx];

        if let Some(name) = update.name {
            recipe.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            recipe.description = clean_description(Some(description));
        }
        if let Some(servings) = update.servings {
            recipe.servings = servings;
        }
        if let (Some(ingredients), Some(total)) = (update.ingredients, new_total) {
            recipe.ingredients = ingredients;
            recipe.total_nutrition = total;
        }
        recipe.updated_at = Utc::now().max(recipe.updated_at);

        let recipe = recipe.clone();
        self.persist_recipe(&recipe);
        Some(recipe)
    }

    /// Delete a recipe; returns whether it existed
    pub fn delete_recipe(&mut self, id: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        if self.recipes.len() == before {
            return false;
        }

        if let Some(database) = &self.database {
            if let Err(e) = database.with_conn(|conn| Recipe::delete(conn, id)) {
                warn!(id, error = %e, "Failed to delete persisted recipe");
            }
        }
        true
    }

    fn persist_recipe(&self, recipe: &Recipe) {
        if let Some(database) = &self.database {
            if let Err(e) = database.with_transaction(|tx| Recipe::upsert(tx, recipe)) {
                warn!(id = %recipe.id, error = %e, "Failed to persist recipe");
            }
        }
    }
}

impl RecipeLookup for RecipeStore {
    fn resolve(&self, id: &str) -> Option<&Recipe> {
        self.get_recipe(id)
    }

    fn all(&self) -> &[Recipe] {
        &self.recipes
    }
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodCategory;
    use tempfile::TempDir;

    fn food(id: &str, calories: f64, protein: f64, sodium: f64) -> Food {
        Food {
            id: id.to_string(),
            name: id.to_string(),
            category: FoodCategory::Other,
            unit: "g".to_string(),
            default_amount: 100.0,
            nutrition: Nutrition { calories, protein, sodium, ..Default::default() },
        }
    }

    fn store() -> RecipeStore {
        let catalog = FoodCatalog::new(vec![
            food("a", 200.0, 10.0, 0.5),
            food("b", 50.0, 1.0, 0.0),
            food("herb", 13.0, 0.0, 0.0),
        ])
        .unwrap();
        RecipeStore::new(catalog)
    }

    #[test]
    fn test_add_ingredient_merges_same_food() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 100.0));
        store.add_ingredient(Ingredient::new("b", 20.0));
        store.add_ingredient(Ingredient::new("a", 50.0));

        assert_eq!(
            store.current_ingredients(),
            &[Ingredient::new("a", 150.0), Ingredient::new("b", 20.0)]
        );
    }

    #[test]
    fn test_add_ingredient_merges_in_any_order() {
        let orders: [[(&str, f64); 3]; 3] = [
            [("a", 10.0), ("a", 20.0), ("b", 5.0)],
            [("b", 5.0), ("a", 10.0), ("a", 20.0)],
            [("a", 20.0), ("b", 5.0), ("a", 10.0)],
        ];

        for order in orders {
            let mut store = store();
            for (food_id, amount) in order {
                store.add_ingredient(Ingredient::new(food_id, amount));
            }
            let draft = store.current_ingredients();
            assert_eq!(draft.len(), 2);
            let a = draft.iter().find(|i| i.food_id == "a").unwrap();
            assert_eq!(a.amount, 30.0);
        }
    }

    #[test]
    fn test_add_ingredient_rejects_bad_amounts() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 0.0));
        store.add_ingredient(Ingredient::new("a", -10.0));
        store.add_ingredient(Ingredient::new("a", f64::INFINITY));
        assert!(store.current_ingredients().is_empty());
    }

    #[test]
    fn test_update_and_remove_ingredient() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 100.0));
        store.add_ingredient(Ingredient::new("b", 100.0));

        store.update_ingredient("a", 40.0);
        store.update_ingredient("missing", 40.0);
        store.update_ingredient("b", 0.0);
        assert_eq!(
            store.current_ingredients(),
            &[Ingredient::new("a", 40.0), Ingredient::new("b", 100.0)]
        );

        store.remove_ingredient("b");
        store.remove_ingredient("missing");
        assert_eq!(store.current_ingredients(), &[Ingredient::new("a", 40.0)]);

        store.clear_ingredients();
        assert!(store.current_ingredients().is_empty());
    }

    #[test]
    fn test_current_nutrition_tracks_draft() {
        let mut store = store();
        assert_eq!(store.get_current_nutrition(), Nutrition::zero());

        store.add_ingredient(Ingredient::new("a", 50.0));
        assert_eq!(store.get_current_nutrition().calories, 100.0);

        store.add_ingredient(Ingredient::new("ghost", 50.0));
        assert_eq!(store.get_current_nutrition().calories, 100.0);

        store.update_ingredient("a", 100.0);
        assert_eq!(store.get_current_nutrition().calories, 200.0);
    }

    #[test]
    fn test_add_recipe_snapshots_and_clears_draft() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 100.0));

        let recipe = store
            .add_recipe(RecipeCreate {
                name: "  Plain A  ".to_string(),
                description: Some("   ".to_string()),
                servings: 2,
            })
            .unwrap();

        assert_eq!(recipe.name, "Plain A");
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.total_nutrition().calories, 200.0);
        assert_eq!(recipe.ingredients(), &[Ingredient::new("a", 100.0)]);
        assert_eq!(recipe.created_at, recipe.updated_at);
        assert!(store.current_ingredients().is_empty());
        assert_eq!(store.get_recipe(&recipe.id), Some(&recipe));
    }

    #[test]
    fn test_add_recipe_guards() {
        let mut store = store();
        assert!(store.add_recipe(RecipeCreate::new("Nothing in it")).is_none());

        store.add_ingredient(Ingredient::new("a", 100.0));
        assert!(store.add_recipe(RecipeCreate::new("   ")).is_none());

        let mut zero = RecipeCreate::new("Zero");
        zero.servings = 0;
        assert!(store.add_recipe(zero).is_none());

        // Rejected saves keep the draft
        assert_eq!(store.current_ingredients().len(), 1);
        assert!(store.recipes().is_empty());
    }

    #[test]
    fn test_recipe_ids_are_unique() {
        let mut store = store();
        for name in ["one", "two"] {
            store.add_ingredient(Ingredient::new("a", 10.0));
            store.add_recipe(RecipeCreate::new(name)).unwrap();
        }
        assert_ne!(store.recipes()[0].id, store.recipes()[1].id);
    }

    #[test]
    fn test_update_recipe_recomputes_total_with_ingredients() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 100.0));
        let recipe = store.add_recipe(RecipeCreate::new("A")).unwrap();

        let updated = store
            .update_recipe(
                &recipe.id,
                RecipeUpdate {
                    ingredients: Some(vec![Ingredient::new("b", 200.0)]),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.total_nutrition().calories, 100.0);
        assert_eq!(updated.name, "A");
        assert!(updated.updated_at >= recipe.updated_at);
        assert_eq!(updated.created_at, recipe.created_at);
    }

    #[test]
    fn test_update_recipe_without_ingredients_keeps_total() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 100.0));
        let recipe = store.add_recipe(RecipeCreate::new("A")).unwrap();

        let updated = store
            .update_recipe(
                &recipe.id,
                RecipeUpdate {
                    name: Some("Renamed".to_string()),
                    description: Some("now with notes".to_string()),
                    servings: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.description.as_deref(), Some("now with notes"));
        assert_eq!(updated.servings, 3);
        assert_eq!(updated.total_nutrition(), recipe.total_nutrition());
    }

    #[test]
    fn test_update_recipe_rejects_invalid_patch() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 100.0));
        let recipe = store.add_recipe(RecipeCreate::new("A")).unwrap();

        let bad = [
            RecipeUpdate { name: Some(" ".to_string()), ..Default::default() },
            RecipeUpdate { servings: Some(0), ..Default::default() },
            RecipeUpdate { ingredients: Some(vec![]), ..Default::default() },
            RecipeUpdate {
                name: Some("Would rename".to_string()),
                ingredients: Some(vec![Ingredient::new("a", -1.0)]),
                ..Default::default()
            },
        ];
        for update in bad {
            assert!(store.update_recipe(&recipe.id, update).is_none());
        }

        assert_eq!(store.get_recipe(&recipe.id), Some(&recipe));
        assert!(store.update_recipe("missing", RecipeUpdate::default()).is_none());
    }

    #[test]
    fn test_delete_recipe_is_idempotent() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 100.0));
        let recipe = store.add_recipe(RecipeCreate::new("A")).unwrap();

        assert!(store.delete_recipe(&recipe.id));
        assert!(!store.delete_recipe(&recipe.id));
        assert!(store.get_recipe(&recipe.id).is_none());
    }

    #[test]
    fn test_load_ingredients_for_editing() {
        let mut store = store();
        store.add_ingredient(Ingredient::new("a", 100.0));
        store.add_ingredient(Ingredient::new("b", 30.0));
        let recipe = store.add_recipe(RecipeCreate::new("AB")).unwrap();

        assert!(store.load_ingredients(&recipe.id));
        assert_eq!(store.current_ingredients(), recipe.ingredients());
        assert!(!store.load_ingredients("missing"));
        assert_eq!(store.current_ingredients().len(), 2);
    }

    #[test]
    fn test_search_recipes() {
        let mut store = store();
        for name in ["Chicken curry", "Green salad", "Curry udon"] {
            store.add_ingredient(Ingredient::new("a", 10.0));
            store.add_recipe(RecipeCreate::new(name)).unwrap();
        }

        let names: Vec<&str> = store.search_recipes("CURRY").iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken curry", "Curry udon"]);
        assert_eq!(store.search_recipes("").len(), 3);
    }

    #[test]
    fn test_recipes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("recipes.db");

        let saved = {
            let db = Database::open(&path).unwrap();
            let mut store = RecipeStore::open(store().catalog().clone(), db).unwrap();
            store.add_ingredient(Ingredient::new("a", 100.0));
            let keep = store.add_recipe(RecipeCreate::new("Keep")).unwrap();
            store.add_ingredient(Ingredient::new("b", 100.0));
            let gone = store.add_recipe(RecipeCreate::new("Gone")).unwrap();
            store.delete_recipe(&gone.id);
            store
                .update_recipe(&keep.id, RecipeUpdate { servings: Some(4), ..Default::default() })
                .unwrap()
        };

        let db = Database::open(&path).unwrap();
        let mut reopened = RecipeStore::open(store().catalog().clone(), db).unwrap();
        assert_eq!(reopened.recipes(), &[saved]);

        // The draft is not persisted
        assert!(reopened.current_ingredients().is_empty());
        reopened.add_ingredient(Ingredient::new("a", 1.0));
        assert_eq!(reopened.current_ingredients().len(), 1);
    }
}
