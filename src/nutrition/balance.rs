//! Derived indicators: macro balance and progress against goals

use serde::{Deserialize, Serialize};

use crate::models::{Nutrition, NutritionGoal};
use super::calculate::round_to;

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;
/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;

/// Share of calories from protein, fat and carbs, in whole percent
///
/// Each share is rounded on its own, so the three may add up to 99 or 101.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PfcBalance {
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
}

/// Percent of goal reached per field, each clamped to 0..=100
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionProgress {
    pub calories: u32,
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
    pub fiber: u32,
    pub sodium: u32,
}

fn whole_percent(fraction: f64) -> u32 {
    let percent = round_to(fraction * 100.0, 1.0);
    if percent.is_finite() && percent > 0.0 {
        percent as u32
    } else {
        0
    }
}

/// PFC balance for a nutrition value
///
/// Returns all zeros when protein, fat and carbs contribute no calories.
pub fn calculate_pfc_balance(nutrition: &Nutrition) -> PfcBalance {
    let protein_kcal = nutrition.protein * KCAL_PER_G_PROTEIN;
    let fat_kcal = nutrition.fat * KCAL_PER_G_FAT;
    let carbs_kcal = nutrition.carbs * KCAL_PER_G_CARBS;
    let total = protein_kcal + fat_kcal + carbs_kcal;

    if total == 0.0 || !total.is_finite() {
        return PfcBalance::default();
    }

    PfcBalance {
        protein: whole_percent(protein_kcal / total),
        fat: whole_percent(fat_kcal / total),
        carbs: whole_percent(carbs_kcal / total),
    }
}

/// Percent of `target` reached by `current`, rounded and clamped to 0..=100
///
/// A zero target yields 0.
pub fn calculate_progress(current: f64, target: f64) -> u32 {
    if target == 0.0 || !target.is_finite() {
        return 0;
    }
    whole_percent(current / target).min(100)
}

/// Progress for every field of a goal
pub fn goal_progress(consumed: &Nutrition, goal: &NutritionGoal) -> NutritionProgress {
    NutritionProgress {
        calories: calculate_progress(consumed.calories, goal.calories),
        protein: calculate_progress(consumed.protein, goal.protein),
        fat: calculate_progress(consumed.fat, goal.fat),
        carbs: calculate_progress(consumed.carbs, goal.carbs),
        fiber: calculate_progress(consumed.fiber, goal.fiber),
        sodium: calculate_progress(consumed.sodium, goal.sodium),
    }
}

/// What is left of the goal after `consumed`, never below zero
pub fn remaining_nutrition(goal: &NutritionGoal, consumed: &Nutrition) -> Nutrition {
    goal.as_nutrition().saturating_sub(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pfc_zero_nutrition() {
        assert_eq!(calculate_pfc_balance(&Nutrition::zero()), PfcBalance::default());

        // Calories alone do not count towards the balance
        let only_kcal = Nutrition { calories: 500.0, ..Default::default() };
        assert_eq!(calculate_pfc_balance(&only_kcal), PfcBalance::default());
    }

    #[test]
    fn test_pfc_balance() {
        // 20g P = 80 kcal, 10g F = 90 kcal, 57.5g C = 230 kcal -> 400 kcal.
        // 57.5% lands just below the half in binary and rounds down.
        let n = Nutrition { protein: 20.0, fat: 10.0, carbs: 57.5, ..Default::default() };
        let pfc = calculate_pfc_balance(&n);
        assert_eq!(pfc, PfcBalance { protein: 20, fat: 23, carbs: 57 });
    }

    #[test]
    fn test_pfc_single_macro() {
        let n = Nutrition { fat: 12.0, ..Default::default() };
        assert_eq!(calculate_pfc_balance(&n), PfcBalance { protein: 0, fat: 100, carbs: 0 });
    }

    #[test]
    fn test_progress() {
        assert_eq!(calculate_progress(150.0, 100.0), 100);
        assert_eq!(calculate_progress(50.0, 200.0), 25);
        assert_eq!(calculate_progress(1.0, 3.0), 33);
        assert_eq!(calculate_progress(2.0, 3.0), 67);
        assert_eq!(calculate_progress(0.0, 100.0), 0);
    }

    #[test]
    fn test_progress_zero_target() {
        for current in [0.0, 1.0, 1500.0, -3.0] {
            assert_eq!(calculate_progress(current, 0.0), 0);
        }
    }

    #[test]
    fn test_progress_never_negative() {
        assert_eq!(calculate_progress(-20.0, 100.0), 0);
        assert_eq!(calculate_progress(20.0, -100.0), 0);
    }

    #[test]
    fn test_goal_progress_and_remaining() {
        let goal = NutritionGoal::default();
        let consumed = Nutrition {
            calories: 1000.0,
            protein: 90.0,
            fat: 11.0,
            carbs: 0.0,
            fiber: 5.0,
            sodium: 3.5,
        };

        let progress = goal_progress(&consumed, &goal);
        assert_eq!(progress.calories, 50);
        assert_eq!(progress.protein, 100);
        assert_eq!(progress.fat, 20);
        assert_eq!(progress.carbs, 0);
        assert_eq!(progress.fiber, 25);
        assert_eq!(progress.sodium, 50);

        let left = remaining_nutrition(&goal, &consumed);
        assert_eq!(left.calories, 1000.0);
        assert_eq!(left.protein, 0.0);
        assert_eq!(left.fat, 44.0);
        assert_eq!(left.carbs, 250.0);
    }
}
