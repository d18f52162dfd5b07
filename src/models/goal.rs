//! Goal and settings models
//!
//! Process-wide singletons owned by the plan store. Each has constructor
//! defaults and a partial `*Update` that is shallow-merged on top.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::Nutrition;

/// Daily nutrition targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionGoal {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub sodium: f64,
}

impl Default for NutritionGoal {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 60.0,
            fat: 55.0,
            carbs: 250.0,
            fiber: 20.0,
            sodium: 7.0,
        }
    }
}

/// Partial update for the nutrition goal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionGoalUpdate {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
}

impl NutritionGoal {
    /// The goal viewed as a nutrition vector
    pub fn as_nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            fiber: self.fiber,
            sodium: self.sodium,
        }
    }

    /// Shallow-merge `update` into this goal
    pub fn merge(&mut self, update: &NutritionGoalUpdate) {
        macro_rules! merge_field {
            ($field:ident) => {
                if let Some(val) = update.$field {
                    self.$field = val;
                }
            };
        }

        merge_field!(calories);
        merge_field!(protein);
        merge_field!(fat);
        merge_field!(carbs);
        merge_field!(fiber);
        merge_field!(sodium);
    }

    /// Load the stored goal, if one was ever saved
    pub fn load(conn: &Connection) -> DbResult<Option<Self>> {
        let goal = conn
            .query_row(
                "SELECT calories, protein, fat, carbs, fiber, sodium FROM nutrition_goal WHERE id = 1",
                [],
                |row| {
                    Ok(Self {
                        calories: row.get("calories")?,
                        protein: row.get("protein")?,
                        fat: row.get("fat")?,
                        carbs: row.get("carbs")?,
                        fiber: row.get("fiber")?,
                        sodium: row.get("sodium")?,
                    })
                },
            )
            .optional()?;
        Ok(goal)
    }

    pub fn save(&self, conn: &Connection) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT OR REPLACE INTO nutrition_goal (id, calories, protein, fat, carbs, fiber, sodium)
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![self.calories, self.protein, self.fat, self.carbs, self.fiber, self.sodium],
        )?;
        Ok(())
    }
}

/// Coarse targets and display preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub target_calories: f64,
    pub target_protein: f64,
    pub target_fat: f64,
    pub target_carbs: f64,
    pub dark_mode: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            target_calories: 2000.0,
            target_protein: 60.0,
            target_fat: 55.0,
            target_carbs: 250.0,
            dark_mode: false,
        }
    }
}

/// Partial update for user settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub target_calories: Option<f64>,
    pub target_protein: Option<f64>,
    pub target_fat: Option<f64>,
    pub target_carbs: Option<f64>,
    pub dark_mode: Option<bool>,
}

impl UserSettings {
    /// Shallow-merge `update` into these settings
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(val) = update.target_calories {
            self.target_calories = val;
        }
        if let Some(val) = update.target_protein {
            self.target_protein = val;
        }
        if let Some(val) = update.target_fat {
            self.target_fat = val;
        }
        if let Some(val) = update.target_carbs {
            self.target_carbs = val;
        }
        if let Some(val) = update.dark_mode {
            self.dark_mode = val;
        }
    }

    pub fn load(conn: &Connection) -> DbResult<Option<Self>> {
        let settings = conn
            .query_row(
                "SELECT target_calories, target_protein, target_fat, target_carbs, dark_mode FROM user_settings WHERE id = 1",
                [],
                |row| {
                    Ok(Self {
                        target_calories: row.get("target_calories")?,
                        target_protein: row.get("target_protein")?,
                        target_fat: row.get("target_fat")?,
                        target_carbs: row.get("target_carbs")?,
                        dark_mode: row.get::<_, i32>("dark_mode")? != 0,
                    })
                },
            )
            .optional()?;
        Ok(settings)
    }

    pub fn save(&self, conn: &Connection) -> DbResult<()> {
        conn.execute(
            r#"
            INSERT OR REPLACE INTO user_settings (id, target_calories, target_protein, target_fat, target_carbs, dark_mode)
            VALUES (1, ?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                self.target_calories,
                self.target_protein,
                self.target_fat,
                self.target_carbs,
                self.dark_mode as i32,
            ],
        )?;
        Ok(())
    }
}
