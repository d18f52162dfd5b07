//! Recipe model
//!
//! Represents a saved recipe with a cached nutrition total.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::row::{timestamp_from_sql, timestamp_to_sql};
use super::{Ingredient, Nutrition};

/// A saved recipe
///
/// `ingredients` and `total_nutrition` have no public setters: the total is
/// only ever produced by the recipe store from the ingredient list it was
/// saved with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub(crate) ingredients: Vec<Ingredient>,
    pub(crate) total_nutrition: Nutrition,
    pub servings: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new recipe from the current ingredient draft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: u32,
}

fn default_servings() -> u32 {
    1
}

impl RecipeCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            servings: default_servings(),
        }
    }
}

/// Data for updating a recipe
///
/// Has no nutrition field: when `ingredients` is present
/// the store recomputes the total itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    /// An empty string clears the description
    pub description: Option<String>,
    pub servings: Option<u32>,
    pub ingredients: Option<Vec<Ingredient>>,
}

impl RecipeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.servings.is_none()
            && self.ingredients.is_none()
    }
}

impl Recipe {
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn total_nutrition(&self) -> &Nutrition {
        &self.total_nutrition
    }

    /// Total divided across servings
    pub fn nutrition_per_serving(&self) -> Nutrition {
        crate::nutrition::per_serving(&self.total_nutrition, self.servings)
    }

    /// Create a Recipe (without ingredients) from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let stmt = row.as_ref();
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            ingredients: Vec::new(),
            total_nutrition: Nutrition {
                calories: row.get("total_calories")?,
                protein: row.get("total_protein")?,
                fat: row.get("total_fat")?,
                carbs: row.get("total_carbs")?,
                fiber: row.get("total_fiber")?,
                sodium: row.get("total_sodium")?,
            },
            servings: row.get("servings")?,
            created_at: timestamp_from_sql(stmt.column_index("created_at")?, &created_at)?,
            updated_at: timestamp_from_sql(stmt.column_index("updated_at")?, &updated_at)?,
        })
    }

    /// Load every saved recipe, in the order they were first saved
    pub fn load_all(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM recipes ORDER BY rowid")?;
        let mut recipes = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut ingredient_stmt = conn.prepare(
            "SELECT food_id, amount FROM recipe_ingredients WHERE recipe_id = ?1 ORDER BY position",
        )?;

        for recipe in &mut recipes {
            recipe.ingredients = ingredient_stmt
                .query_map([&recipe.id], |row| {
                    Ok(Ingredient {
                        food_id: row.get("food_id")?,
                        amount: row.get("amount")?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
        }

        Ok(recipes)
    }

    /// Insert or replace a recipe and its ingredient snapshot
    ///
    /// Run inside a transaction so the ingredient rows never go missing.
    pub fn upsert(conn: &Connection, recipe: &Recipe) -> DbResult<()> {
        let n = &recipe.total_nutrition;
        conn.execute(
            r#"
            INSERT INTO recipes (
                id, name, description, servings,
                total_calories, total_protein, total_fat, total_carbs, total_fiber, total_sodium,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                servings = excluded.servings,
                total_calories = excluded.total_calories,
                total_protein = excluded.total_protein,
                total_fat = excluded.total_fat,
                total_carbs = excluded.total_carbs,
                total_fiber = excluded.total_fiber,
                total_sodium = excluded.total_sodium,
                updated_at = excluded.updated_at
            "#,
            params![
                recipe.id,
                recipe.name,
                recipe.description,
                recipe.servings,
                n.calories,
                n.protein,
                n.fat,
                n.carbs,
                n.fiber,
                n.sodium,
                timestamp_to_sql(&recipe.created_at),
                timestamp_to_sql(&recipe.updated_at),
            ],
        )?;

        conn.execute(
            "DELETE FROM recipe_ingredients WHERE recipe_id = ?1",
            [&recipe.id],
        )?;

        let mut stmt = conn.prepare(
            "INSERT INTO recipe_ingredients (recipe_id, position, food_id, amount) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (position, ingredient) in recipe.ingredients.iter().enumerate() {
            stmt.execute(params![
                recipe.id,
                position as i64,
                ingredient.food_id,
                ingredient.amount,
            ])?;
        }

        Ok(())
    }

    /// Delete a recipe and its ingredients
    /// Returns Ok(true) if deleted, Ok(false) if not found
    pub fn delete(conn: &Connection, id: &str) -> DbResult<bool> {
        conn.execute("DELETE FROM recipe_ingredients WHERE recipe_id = ?1", [id])?;
        let rows = conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Count saved recipes
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }
}
