//! Meal suggestions for the rest of a day

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Nutrition, Recipe};

use super::{PlanStore, RecipeLookup};

/// Lower bound of a suggestion, as a share of the calories left
const MIN_SHARE: f64 = 0.3;
/// Upper bound of a suggestion, as a share of the calories left
const MAX_SHARE: f64 = 0.8;
const MAX_SUGGESTIONS: usize = 3;

/// One-line nudge shown next to the suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionAdvice {
    NoRecipes,
    GoalReached,
    LowProtein,
    PlentyLeft,
    AlmostThere,
}

impl SuggestionAdvice {
    pub fn message(&self) -> &'static str {
        match self {
            SuggestionAdvice::NoRecipes => "Create a recipe first",
            SuggestionAdvice::GoalReached => "Today's calorie goal is already reached",
            SuggestionAdvice::LowProtein => "Protein is running low: meat, fish or egg dishes are a good pick",
            SuggestionAdvice::PlentyLeft => "Plenty of room left today, go for a balanced meal",
            SuggestionAdvice::AlmostThere => "Almost at the goal, something light will do",
        }
    }
}

/// What is left for a day and which recipes fit into it
#[derive(Debug, Clone, Serialize)]
pub struct MealSuggestion {
    pub date: NaiveDate,
    pub remaining: Nutrition,
    pub recipes: Vec<Recipe>,
    pub advice: SuggestionAdvice,
    pub message: &'static str,
}

/// Suggest up to three saved recipes for the calories left on `date`
///
/// Candidates fall between 30% and 80% of the remaining calories and are
/// ranked by protein, highest first; ties keep recipe list order.
pub fn suggest_meals<L>(date: NaiveDate, plans: &PlanStore, lookup: &L) -> MealSuggestion
where
    L: RecipeLookup + ?Sized,
{
    let goal = plans.nutrition_goal();
    let all = lookup.all();

    if all.is_empty() {
        return MealSuggestion::new(date, goal.as_nutrition(), Vec::new(), SuggestionAdvice::NoRecipes);
    }

    let remaining = plans.remaining_nutrition(date, lookup);
    let low = remaining.calories * MIN_SHARE;
    let high = remaining.calories * MAX_SHARE;

    let mut candidates: Vec<&Recipe> = all
        .iter()
        .filter(|r| {
            let calories = r.total_nutrition().calories;
            calories >= low && calories <= high
        })
        .collect();
    candidates.sort_by(|a, b| {
        b.total_nutrition()
            .protein
            .total_cmp(&a.total_nutrition().protein)
    });
    let recipes = candidates.into_iter().take(MAX_SUGGESTIONS).cloned().collect();

    let advice = if remaining.calories <= 0.0 {
        SuggestionAdvice::GoalReached
    } else if remaining.protein > goal.protein * 0.5 {
        SuggestionAdvice::LowProtein
    } else if remaining.calories > goal.calories * 0.7 {
        SuggestionAdvice::PlentyLeft
    } else {
        SuggestionAdvice::AlmostThere
    };

    MealSuggestion::new(date, remaining, recipes, advice)
}

impl MealSuggestion {
    fn new(date: NaiveDate, remaining: Nutrition, recipes: Vec<Recipe>, advice: SuggestionAdvice) -> Self {
        Self {
            date,
            remaining,
            recipes,
            advice,
            message: advice.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, MealType, NutritionGoalUpdate};
    use chrono::Utc;

    fn recipe(id: &str, calories: f64, protein: f64) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            ingredients: vec![Ingredient::new("food", 100.0)],
            total_nutrition: Nutrition { calories, protein, ..Default::default() },
            servings: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn ids(suggestion: &MealSuggestion) -> Vec<&str> {
        suggestion.recipes.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_no_recipes() {
        let plans = PlanStore::new();
        let recipes: Vec<Recipe> = Vec::new();

        let suggestion = suggest_meals(day(), &plans, recipes.as_slice());
        assert_eq!(suggestion.advice, SuggestionAdvice::NoRecipes);
        assert_eq!(suggestion.remaining, plans.nutrition_goal().as_nutrition());
        assert!(suggestion.recipes.is_empty());
    }

    #[test]
    fn test_window_and_protein_order() {
        let plans = PlanStore::new();
        // Remaining 2000 kcal: window is 600..=1600
        let recipes = vec![
            recipe("too-small", 599.0, 90.0),
            recipe("edge-low", 600.0, 10.0),
            recipe("lean", 900.0, 50.0),
            recipe("tie", 1000.0, 50.0),
            recipe("edge-high", 1600.0, 20.0),
            recipe("too-big", 1601.0, 99.0),
        ];

        let suggestion = suggest_meals(day(), &plans, recipes.as_slice());
        assert_eq!(ids(&suggestion), vec!["lean", "tie", "edge-high"]);
        assert_eq!(suggestion.advice, SuggestionAdvice::LowProtein);
    }

    #[test]
    fn test_remaining_counts_planned_meals() {
        let mut plans = PlanStore::new();
        let recipes = vec![recipe("meal", 1000.0, 40.0), recipe("snack", 300.0, 5.0)];
        plans.add_meal(day(), MealType::Lunch, "meal");

        // 1000 kcal left: window is 300..=800
        let suggestion = suggest_meals(day(), &plans, recipes.as_slice());
        assert_eq!(suggestion.remaining.calories, 1000.0);
        assert_eq!(ids(&suggestion), vec!["snack"]);
        assert_eq!(suggestion.advice, SuggestionAdvice::AlmostThere);
    }

    #[test]
    fn test_advice_ladder() {
        let mut plans = PlanStore::new();
        let recipes = vec![recipe("light", 400.0, 40.0), recipe("huge", 2100.0, 10.0)];

        plans.add_meal(day(), MealType::Breakfast, "light");
        assert_eq!(suggest_meals(day(), &plans, recipes.as_slice()).advice, SuggestionAdvice::PlentyLeft);

        plans.add_meal(day(), MealType::Dinner, "huge");
        let reached = suggest_meals(day(), &plans, recipes.as_slice());
        assert_eq!(reached.advice, SuggestionAdvice::GoalReached);
        assert_eq!(reached.remaining.calories, 0.0);
        assert_eq!(reached.message, SuggestionAdvice::GoalReached.message());
    }

    #[test]
    fn test_goal_changes_window() {
        let mut plans = PlanStore::new();
        plans.update_nutrition_goal(&NutritionGoalUpdate {
            calories: Some(1000.0),
            ..Default::default()
        });
        let recipes = vec![recipe("a", 900.0, 30.0), recipe("b", 500.0, 30.0)];

        assert_eq!(ids(&suggest_meals(day(), &plans, recipes.as_slice())), vec!["b"]);
    }
}
