//! Data models
//!
//! Rust structs for foods, recipes, plans and goals, plus their row mappers.

mod day_plan;
mod food;
mod goal;
mod ingredient;
mod nutrition;
mod recipe;
pub(crate) mod row;

pub use day_plan::{DayPlan, MealType, Meals};
pub use food::{Food, FoodCategory};
pub use goal::{NutritionGoal, NutritionGoalUpdate, SettingsUpdate, UserSettings};
pub use ingredient::Ingredient;
pub use nutrition::Nutrition;
pub use recipe::{Recipe, RecipeCreate, RecipeUpdate};
