//! Plan Tools
//!
//! Day detail and weekly report views over the plan store, with recipe ids
//! resolved at read time.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{MealType, Nutrition};
use crate::nutrition::{calculate_pfc_balance, sum_nutrition, NutritionProgress, PfcBalance};
use crate::stores::{format_date, parse_date, today, week_dates, weekday_label, PlanStore, RecipeLookup};

/// A recipe id in a meal slot; name and nutrition are absent when the
/// recipe has been deleted
#[derive(Debug, Serialize)]
pub struct PlannedMeal {
    pub recipe_id: String,
    pub recipe_name: Option<String>,
    pub nutrition: Option<Nutrition>,
}

/// Meals organized by type
#[derive(Debug, Serialize)]
pub struct DayMeals {
    pub breakfast: Vec<PlannedMeal>,
    pub lunch: Vec<PlannedMeal>,
    pub dinner: Vec<PlannedMeal>,
    pub snack: Vec<PlannedMeal>,
}

/// Day with resolved meals and goal tracking
#[derive(Debug, Serialize)]
pub struct DayDetail {
    pub date: String,
    pub weekday: String,
    /// False for a date that was never planned
    pub stored: bool,
    pub target_calories: f64,
    pub meals: DayMeals,
    pub planned: Nutrition,
    pub consumed: Nutrition,
    pub actual_recorded: bool,
    pub remaining: Nutrition,
    pub progress: NutritionProgress,
    pub pfc_balance: PfcBalance,
}

/// One row of the weekly report
#[derive(Debug, Serialize)]
pub struct WeekDay {
    pub date: String,
    pub weekday: String,
    pub planned: Nutrition,
    pub goal_calories: f64,
    pub meal_count: usize,
}

/// Weekly report, Monday through Sunday
#[derive(Debug, Serialize)]
pub struct WeekReport {
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<WeekDay>,
    /// Sum of the week's planned nutrition
    pub total: Nutrition,
    pub pfc_balance: PfcBalance,
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate, String> {
    match date {
        Some(s) => parse_date(s).ok_or_else(|| format!("Invalid date format: {} (expected YYYY-MM-DD)", s)),
        None => Ok(today()),
    }
}

fn planned_meals<L>(ids: &[String], lookup: &L) -> Vec<PlannedMeal>
where
    L: RecipeLookup + ?Sized,
{
    ids.iter()
        .map(|id| {
            let recipe = lookup.resolve(id);
            PlannedMeal {
                recipe_id: id.clone(),
                recipe_name: recipe.map(|r| r.name.clone()),
                nutrition: recipe.map(|r| *r.total_nutrition()),
            }
        })
        .collect()
}

/// Full view of one day
pub fn get_day_detail<L>(plans: &PlanStore, lookup: &L, date: NaiveDate) -> DayDetail
where
    L: RecipeLookup + ?Sized,
{
    let plan = plans.get_plan(date);
    let consumed = plans.consumed_nutrition(date, lookup);

    DayDetail {
        date: format_date(date),
        weekday: weekday_label(date).to_string(),
        stored: plans.has_plan(date),
        target_calories: plan.target_calories,
        meals: DayMeals {
            breakfast: planned_meals(plan.meals.slot(MealType::Breakfast), lookup),
            lunch: planned_meals(plan.meals.slot(MealType::Lunch), lookup),
            dinner: planned_meals(plan.meals.slot(MealType::Dinner), lookup),
            snack: planned_meals(plan.meals.slot(MealType::Snack), lookup),
        },
        planned: plans.planned_nutrition(date, lookup),
        consumed,
        actual_recorded: plan.actual_nutrition.is_some(),
        remaining: plans.remaining_nutrition(date, lookup),
        progress: plans.goal_progress(date, lookup),
        pfc_balance: calculate_pfc_balance(&consumed),
    }
}

/// Planned totals for each day of the week containing `date`
pub fn get_week_report<L>(plans: &PlanStore, lookup: &L, date: NaiveDate) -> WeekReport
where
    L: RecipeLookup + ?Sized,
{
    let dates = week_dates(date);
    let goal_calories = plans.nutrition_goal().calories;

    let days: Vec<WeekDay> = dates
        .iter()
        .map(|&d| WeekDay {
            date: format_date(d),
            weekday: weekday_label(d).to_string(),
            planned: plans.planned_nutrition(d, lookup),
            goal_calories,
            meal_count: plans.get_plan(d).meals.len(),
        })
        .collect();

    let total = sum_nutrition(days.iter().map(|d| &d.planned));

    WeekReport {
        start_date: format_date(dates[0]),
        end_date: format_date(dates[6]),
        days,
        total,
        pfc_balance: calculate_pfc_balance(&total),
    }
}
