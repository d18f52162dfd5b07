//! Food Tools
//!
//! Catalog search results shaped for display.

use serde::Serialize;

use crate::catalog::FoodCatalog;
use crate::models::{Food, Nutrition};

/// Default number of search results shown
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Summary of a food for search results
#[derive(Debug, Serialize)]
pub struct FoodSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub default_amount: f64,
    /// Per 100 units
    pub nutrition: Nutrition,
}

impl From<&Food> for FoodSummary {
    fn from(food: &Food) -> Self {
        Self {
            id: food.id.clone(),
            name: food.name.clone(),
            category: food.category.label().to_string(),
            unit: food.unit.clone(),
            default_amount: food.default_amount,
            nutrition: food.nutrition,
        }
    }
}

/// Response for search_foods
#[derive(Debug, Serialize)]
pub struct SearchFoodsResponse {
    pub query: String,
    pub foods: Vec<FoodSummary>,
    /// Matches before truncation
    pub total: usize,
}

/// Search the catalog and keep the first `limit` matches
pub fn search_foods(catalog: &FoodCatalog, query: &str, limit: usize) -> SearchFoodsResponse {
    let matches = catalog.search_foods(query);
    let total = matches.len();

    SearchFoodsResponse {
        query: query.trim().to_string(),
        foods: matches.into_iter().take(limit).map(FoodSummary::from).collect(),
        total,
    }
}
