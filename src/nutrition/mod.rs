//! Nutrition calculation module
//!
//! Handles nutrition scaling, aggregation and derived indicators.

pub mod balance;
pub mod calculate;

pub use balance::{
    calculate_pfc_balance, calculate_progress, goal_progress, remaining_nutrition,
    NutritionProgress, PfcBalance,
};
pub use calculate::{
    calculate_nutrition, calculate_total_nutrition, per_serving, round_nutrition, round_to,
    sum_nutrition,
};
