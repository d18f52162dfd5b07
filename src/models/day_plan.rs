//! Day plan model
//!
//! Recipe ids assigned to each meal slot for one calendar date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::row::{date_from_sql, date_to_sql};
use super::Nutrition;

/// Meal slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Slots in the order they are shown and summed
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

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

/// Recipe ids per slot. Duplicates are allowed: a recipe eaten twice
/// appears twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snack: Vec<String>,
}

impl Meals {
    pub fn slot(&self, meal_type: MealType) -> &[String] {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snack => &self.snack,
        }
    }

    pub fn slot_mut(&mut self, meal_type: MealType) -> &mut Vec<String> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
            MealType::Snack => &mut self.snack,
        }
    }

    /// Every recipe id, breakfast through snack
    pub fn all_recipe_ids(&self) -> impl Iterator<Item = &String> {
        MealType::ALL
            .into_iter()
            .flat_map(move |meal_type| self.slot(meal_type).iter())
    }

    pub fn len(&self) -> usize {
        MealType::ALL.iter().map(|m| self.slot(*m).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A day in the meal plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub meals: Meals,
    /// Calorie target captured when the plan was created
    pub target_calories: f64,
    pub actual_nutrition: Option<Nutrition>,
}

impl DayPlan {
    /// An empty plan for `date`
    pub fn empty(date: NaiveDate, target_calories: f64) -> Self {
        Self {
            date,
            meals: Meals::default(),
            target_calories,
            actual_nutrition: None,
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let date: String = row.get("date")?;
        let calories: Option<f64> = row.get("actual_calories")?;

        // The override columns are written together, so one NULL means unset
        let actual_nutrition = match calories {
            Some(calories) => Some(Nutrition {
                calories,
                protein: row.get::<_, Option<f64>>("actual_protein")?.unwrap_or_default(),
                fat: row.get::<_, Option<f64>>("actual_fat")?.unwrap_or_default(),
                carbs: row.get::<_, Option<f64>>("actual_carbs")?.unwrap_or_default(),
                fiber: row.get::<_, Option<f64>>("actual_fiber")?.unwrap_or_default(),
                sodium: row.get::<_, Option<f64>>("actual_sodium")?.unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Self {
            date: date_from_sql(row.as_ref().column_index("date")?, &date)?,
            meals: Meals::default(),
            target_calories: row.get("target_calories")?,
            actual_nutrition,
        })
    }

    /// Load every stored plan keyed by date
    pub fn load_all(conn: &Connection) -> DbResult<BTreeMap<NaiveDate, Self>> {
        let mut stmt = conn.prepare("SELECT * FROM day_plans ORDER BY date")?;
        let mut plans = stmt
            .query_map([], Self::from_row)?
            .map(|plan| plan.map(|p| (p.date, p)))
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        let mut meal_stmt = conn.prepare(
            "SELECT date, meal_type, recipe_id FROM day_plan_meals ORDER BY date, meal_type, position",
        )?;
        let rows = meal_stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>("date")?,
                    row.get::<_, String>("meal_type")?,
                    row.get::<_, String>("recipe_id")?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for (date, meal_type, recipe_id) in rows {
            let date = date_from_sql(0, &date)?;
            let meal_type = MealType::parse(&meal_type).ok_or_else(|| {
                DbError::InvalidData(format!("unknown meal type '{}'", meal_type))
            })?;
            let plan = plans.get_mut(&date).ok_or_else(|| {
                DbError::InvalidData(format!("meal row for missing plan {}", date))
            })?;
            plan.meals.slot_mut(meal_type).push(recipe_id);
        }

        Ok(plans)
    }

    /// Write this plan, replacing whatever was stored for its date
    ///
    /// Run inside a transaction so a plan never loses its meal rows.
    pub fn save(conn: &Connection, plan: &DayPlan) -> DbResult<()> {
        let date = date_to_sql(&plan.date);
        let actual = plan.actual_nutrition.as_ref();

        conn.execute(
            r#"
            INSERT INTO day_plans (
                date, target_calories,
                actual_calories, actual_protein, actual_fat, actual_carbs, actual_fiber, actual_sodium
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(date) DO UPDATE SET
                target_calories = excluded.target_calories,
                actual_calories = excluded.actual_calories,
                actual_protein = excluded.actual_protein,
                actual_fat = excluded.actual_fat,
                actual_carbs = excluded.actual_carbs,
                actual_fiber = excluded.actual_fiber,
                actual_sodium = excluded.actual_sodium
            "#,
            params![
                date,
                plan.target_calories,
                actual.map(|n| n.calories),
                actual.map(|n| n.protein),
                actual.map(|n| n.fat),
                actual.map(|n| n.carbs),
                actual.map(|n| n.fiber),
                actual.map(|n| n.sodium),
            ],
        )?;

        conn.execute("DELETE FROM day_plan_meals WHERE date = ?1", [&date])?;

        let mut stmt = conn.prepare(
            "INSERT INTO day_plan_meals (date, meal_type, position, recipe_id) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for meal_type in MealType::ALL {
            for (position, recipe_id) in plan.meals.slot(meal_type).iter().enumerate() {
                stmt.execute(params![date, meal_type.as_str(), position as i64, recipe_id])?;
            }
        }

        Ok(())
    }

    /// Delete the plan for a date
    pub fn delete(conn: &Connection, date: NaiveDate) -> DbResult<bool> {
        let date = date_to_sql(&date);
        conn.execute("DELETE FROM day_plan_meals WHERE date = ?1", [&date])?;
        let rows = conn.execute("DELETE FROM day_plans WHERE date = ?1", [&date])?;
        Ok(rows > 0)
    }
}
