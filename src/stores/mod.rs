//! State stores
//!
//! The recipe store owns recipes, foods and the ingredient draft; the plan
//! store owns day plans, settings and the nutrition goal. Plans refer to
//! recipes by id only and resolve them through [`RecipeLookup`] at read time.

pub mod plans;
pub mod recipes;
pub mod suggest;
pub mod week;

pub use plans::PlanStore;
pub use recipes::RecipeStore;
pub use suggest::{suggest_meals, MealSuggestion, SuggestionAdvice};
pub use week::{format_date, parse_date, today, week_dates, week_start, weekday_label};

use crate::models::Recipe;

/// Read-only recipe resolution across the store boundary
///
/// An id that no longer resolves is not an error: the caller treats it as
/// "no nutrition data" for that slot.
pub trait RecipeLookup {
    fn resolve(&self, id: &str) -> Option<&Recipe>;

    /// Every saved recipe, in list order
    fn all(&self) -> &[Recipe];
}

impl RecipeLookup for [Recipe] {
    fn resolve(&self, id: &str) -> Option<&Recipe> {
        self.iter().find(|r| r.id == id)
    }

    fn all(&self) -> &[Recipe] {
        self
    }
}
