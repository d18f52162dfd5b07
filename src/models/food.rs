//! Food model
//!
//! A catalog entry with nutrition per 100 units of its base unit (grams).

use serde::{Deserialize, Serialize};

use super::Nutrition;

/// Food category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Grains,
    Vegetables,
    Fruits,
    Meat,
    Seafood,
    EggsDairy,
    Legumes,
    Seasonings,
    Beverages,
    Other,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 10] = [
        FoodCategory::Grains,
        FoodCategory::Vegetables,
        FoodCategory::Fruits,
        FoodCategory::Meat,
        FoodCategory::Seafood,
        FoodCategory::EggsDairy,
        FoodCategory::Legumes,
        FoodCategory::Seasonings,
        FoodCategory::Beverages,
        FoodCategory::Other,
    ];

    /// Human readable label, also what category search matches against
    pub fn label(&self) -> &'static str {
        match self {
            FoodCategory::Grains => "grains",
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Fruits => "fruits",
            FoodCategory::Meat => "meat",
            FoodCategory::Seafood => "seafood",
            FoodCategory::EggsDairy => "eggs & dairy",
            FoodCategory::Legumes => "legumes",
            FoodCategory::Seasonings => "seasonings",
            FoodCategory::Beverages => "beverages",
            FoodCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A food with reference nutrition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub category: FoodCategory,
    /// Display unit, e.g. "g" or "ml"
    pub unit: String,
    /// Amount suggested when the food is first picked
    pub default_amount: f64,
    /// Nutrition per 100 units
    pub nutrition: Nutrition,
}
