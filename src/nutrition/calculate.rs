//! Nutrition math
//!
//! Pure functions turning (food, amount) pairs into rounded nutrition values.
//!
//! Rounding policy: calories, protein, fat, carbs and fiber are kept to one
//! decimal place; sodium to two. Sums round after every addition, so the
//! total of several values can differ from rounding the raw sum once.

use crate::models::{Food, Ingredient, Nutrition};

/// Decimal places for everything except sodium
pub const MACRO_PRECISION: f64 = 10.0;
/// Decimal places for sodium (typical values are small)
pub const SODIUM_PRECISION: f64 = 100.0;

/// Round half up, matching what the displayed totals have always used
/// (0.05 -> 0.1, -0.05 -> 0.0)
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round `value` to the grid given by `factor` (10.0 = one decimal)
pub fn round_to(value: f64, factor: f64) -> f64 {
    round_half_up(value * factor) / factor
}

/// Apply the per-field rounding policy
pub fn round_nutrition(n: &Nutrition) -> Nutrition {
    Nutrition {
        calories: round_to(n.calories, MACRO_PRECISION),
        protein: round_to(n.protein, MACRO_PRECISION),
        fat: round_to(n.fat, MACRO_PRECISION),
        carbs: round_to(n.carbs, MACRO_PRECISION),
        fiber: round_to(n.fiber, MACRO_PRECISION),
        sodium: round_to(n.sodium, SODIUM_PRECISION),
    }
}

/// Nutrition for `amount` grams of `food` (the food stores values per 100g)
pub fn calculate_nutrition(food: &Food, amount: f64) -> Nutrition {
    let ratio = amount / 100.0;
    round_nutrition(&food.nutrition.scale(ratio))
}

/// Left fold from zero, rounding after each addition
pub fn sum_nutrition<'a, I>(nutritions: I) -> Nutrition
where
    I: IntoIterator<Item = &'a Nutrition>,
{
    nutritions
        .into_iter()
        .fold(Nutrition::zero(), |acc, n| round_nutrition(&acc.add(n)))
}

/// Total nutrition for an ingredient list
///
/// `find_food` resolves an ingredient's food id; ingredients whose food
/// cannot be found contribute zero.
pub fn calculate_total_nutrition<'f, F>(ingredients: &[Ingredient], find_food: F) -> Nutrition
where
    F: Fn(&str) -> Option<&'f Food>,
{
    let nutritions: Vec<Nutrition> = ingredients
        .iter()
        .map(|ingredient| match find_food(&ingredient.food_id) {
            Some(food) => calculate_nutrition(food, ingredient.amount),
            None => Nutrition::zero(),
        })
        .collect();

    sum_nutrition(&nutritions)
}

/// Nutrition per serving, rounded like a single ingredient
pub fn per_serving(total: &Nutrition, servings: u32) -> Nutrition {
    if servings == 0 {
        return *total;
    }
    round_nutrition(&total.scale(1.0 / servings as f64))
}
