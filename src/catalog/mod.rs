//! Food catalog
//!
//! Read-only lookup over the static food dataset. Loaded once at startup
//! and never mutated afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Food;

/// Dataset compiled into the binary, used when no dataset path is configured
const BUNDLED_FOODS: &str = include_str!("../../data/foods.json");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read food dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse food dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate food id: {0}")]
    DuplicateId(String),

    #[error("Invalid food '{id}': {reason}")]
    InvalidFood { id: String, reason: String },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// On-disk shape of the dataset
#[derive(Debug, Deserialize)]
struct FoodDataset {
    foods: Vec<Food>,
}

/// Indexed, immutable list of foods
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<Food>,
    by_id: HashMap<String, usize>,
}

impl FoodCatalog {
    /// Build a catalog, rejecting duplicate ids and impossible values
    pub fn new(foods: Vec<Food>) -> CatalogResult<Self> {
        let mut by_id = HashMap::with_capacity(foods.len());

        for (idx, food) in foods.iter().enumerate() {
            validate_food(food)?;
            if by_id.insert(food.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(food.id.clone()));
            }
        }

        Ok(Self { foods, by_id })
    }

    /// Parse a `{"foods": [...]}` document
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let dataset: FoodDataset = serde_json::from_str(json)?;
        Self::new(dataset.foods)
    }

    /// Load a dataset file
    pub fn from_path<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The dataset shipped with the crate
    pub fn bundled() -> CatalogResult<Self> {
        Self::from_json_str(BUNDLED_FOODS)
    }

    /// All foods in catalog order
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Look up a food by id
    pub fn get_food_by_id(&self, id: &str) -> Option<&Food> {
        self.by_id.get(id).map(|&idx| &self.foods[idx])
    }

    /// Case-insensitive substring search over name and category
    ///
    /// A blank query returns the whole catalog. Results keep catalog order;
    /// truncating for display is up to the caller.
    pub fn search_foods(&self, query: &str) -> Vec<&Food> {
        let query = query.trim();
        if query.is_empty() {
            return self.foods.iter().collect();
        }

        let needle = query.to_lowercase();
        self.foods
            .iter()
            .filter(|food| {
                food.name.to_lowercase().contains(&needle)
                    || food.category.label().contains(&needle)
            })
            .collect()
    }
}

fn validate_food(food: &Food) -> CatalogResult<()> {
    let invalid = |reason: &str| CatalogError::InvalidFood {
        id: food.id.clone(),
        reason: reason.to_string(),
    };

    if food.id.trim().is_empty() {
        return Err(invalid("empty id"));
    }

    let n = &food.nutrition;
    let fields = [n.calories, n.protein, n.fat, n.carbs, n.fiber, n.sodium];
    if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(invalid("nutrition values must be finite and non-negative"));
    }

    if !food.default_amount.is_finite() || food.default_amount < 0.0 {
        return Err(invalid("default amount must be non-negative"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodCategory, Nutrition};

    fn food(id: &str, name: &str, category: FoodCategory) -> Food {
        Food {
            id: id.to_string(),
            name: name.to_string(),
            category,
            unit: "g".to_string(),
            default_amount: 100.0,
            nutrition: Nutrition { calories: 100.0, ..Default::default() },
        }
    }

    fn catalog() -> FoodCatalog {
        FoodCatalog::new(vec![
            food("rice", "White Rice", FoodCategory::Grains),
            food("salmon", "Salmon", FoodCategory::Seafood),
            food("egg", "Egg", FoodCategory::EggsDairy),
            food("brown-rice", "Brown rice", FoodCategory::Grains),
        ])
        .unwrap()
    }

    #[test]
    fn test_blank_query_returns_everything_in_order() {
        let catalog = catalog();
        for query in ["", "   ", "\t"] {
            let ids: Vec<&str> = catalog.search_foods(query).iter().map(|f| f.id.as_str()).collect();
            assert_eq!(ids, vec!["rice", "salmon", "egg", "brown-rice"]);
        }
    }

    #[test]
    fn test_search_by_name_is_case_insensitive() {
        let catalog = catalog();
        let ids: Vec<&str> = catalog.search_foods("RICE").iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["rice", "brown-rice"]);
    }

    #[test]
    fn test_search_by_category() {
        let catalog = catalog();
        let ids: Vec<&str> = catalog.search_foods("dairy").iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["egg"]);

        let ids: Vec<&str> = catalog.search_foods("grain").iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["rice", "brown-rice"]);
    }

    #[test]
    fn test_search_no_match() {
        assert!(catalog().search_foods("chocolate").is_empty());
    }

    #[test]
    fn test_get_food_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.get_food_by_id("salmon").map(|f| f.name.as_str()), Some("Salmon"));
        assert!(catalog.get_food_by_id("tuna").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = FoodCatalog::new(vec![
            food("rice", "Rice", FoodCategory::Grains),
            food("rice", "Rice again", FoodCategory::Grains),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "rice"));
    }

    #[test]
    fn test_negative_nutrition_rejected() {
        let mut bad = food("x", "X", FoodCategory::Other);
        bad.nutrition.sodium = -1.0;
        assert!(matches!(
            FoodCatalog::new(vec![bad]),
            Err(CatalogError::InvalidFood { .. })
        ));
    }

    #[test]
    fn test_bundled_dataset_loads() {
        let catalog = FoodCatalog::bundled().unwrap();
        assert!(catalog.len() > 20);
        assert!(catalog.get_food_by_id("chicken-breast").is_some());
        assert!(!catalog.search_foods("seafood").is_empty());
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = FoodCatalog::from_path("/definitely/not/here/foods.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
