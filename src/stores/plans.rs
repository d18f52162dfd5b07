//! Plan store
//!
//! Per-date meal assignments plus the settings and nutrition goal
//! singletons. Plans are created lazily on first mutation; reading a date
//! that was never touched synthesizes an empty plan without storing it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::db::{Database, DbResult};
use crate::models::{
    DayPlan, MealType, Nutrition, NutritionGoal, NutritionGoalUpdate, SettingsUpdate,
    UserSettings,
};
use crate::nutrition::{self, NutritionProgress};

use super::week::{today, week_dates};
use super::RecipeLookup;

/// Meal plans, settings and goals
pub struct PlanStore {
    plans: BTreeMap<NaiveDate, DayPlan>,
    settings: UserSettings,
    goal: NutritionGoal,
    database: Option<Database>,
}

impl Default for PlanStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanStore {
    /// In-memory store starting from defaults
    pub fn new() -> Self {
        Self {
            plans: BTreeMap::new(),
            settings: UserSettings::default(),
            goal: NutritionGoal::default(),
            database: None,
        }
    }

    /// Store backed by `database`
    ///
    /// Settings and goal fall back to their defaults when nothing was saved.
    /// Recipe tables are never read here.
    pub fn open(database: Database) -> DbResult<Self> {
        let (plans, settings, goal) = database.with_conn(|conn| {
            Ok((
                DayPlan::load_all(conn)?,
                UserSettings::load(conn)?.unwrap_or_default(),
                NutritionGoal::load(conn)?.unwrap_or_default(),
            ))
        })?;
        info!(plans = plans.len(), "Loaded plan store");

        Ok(Self {
            plans,
            settings,
            goal,
            database: Some(database),
        })
    }

    // ------------------------------------------------------------------
    // Plans
    // ------------------------------------------------------------------

    /// The plan for `date`, or an empty one targeting the current settings
    pub fn get_plan(&self, date: NaiveDate) -> DayPlan {
        self.plans
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DayPlan::empty(date, self.settings.target_calories))
    }

    /// Whether a plan has been stored for `date`
    pub fn has_plan(&self, date: NaiveDate) -> bool {
        self.plans.contains_key(&date)
    }

    /// Dates with a stored plan, ascending
    pub fn stored_dates(&self) -> Vec<NaiveDate> {
        self.plans.keys().copied().collect()
    }

    /// Monday through Sunday of the week containing `date`
    pub fn get_week_plans(&self, date: NaiveDate) -> [DayPlan; 7] {
        week_dates(date).map(|d| self.get_plan(d))
    }

    pub fn get_this_week_plans(&self) -> [DayPlan; 7] {
        self.get_week_plans(today())
    }

    /// Append a recipe id to a meal slot, creating the plan if needed
    ///
    /// The id is not checked against the recipe store.
    pub fn add_meal(&mut self, date: NaiveDate, meal_type: MealType, recipe_id: &str) {
        if recipe_id.trim().is_empty() {
            debug!(%date, meal = meal_type.as_str(), "Ignoring blank recipe id");
            return;
        }

        let target = self.settings.target_calories;
        let plan = self
            .plans
            .entry(date)
            .or_insert_with(|| DayPlan::empty(date, target));
        plan.meals.slot_mut(meal_type).push(recipe_id.to_string());

        self.persist_plan(date);
    }

    /// Remove the first occurrence of a recipe id from a meal slot
    pub fn remove_meal(&mut self, date: NaiveDate, meal_type: MealType, recipe_id: &str) {
        let Some(plan) = self.plans.get_mut(&date) else {
            return;
        };

        let slot = plan.meals.slot_mut(meal_type);
        let Some(idx) = slot.iter().position(|id| id == recipe_id) else {
            return;
        };
        slot.remove(idx);

        self.persist_plan(date);
    }

    /// Set or clear the actual-nutrition override for a stored plan
    pub fn update_plan_nutrition(&mut self, date: NaiveDate, actual: Option<Nutrition>) {
        let Some(plan) = self.plans.get_mut(&date) else {
            debug!(%date, "No plan to record actual nutrition on");
            return;
        };
        plan.actual_nutrition = actual;

        self.persist_plan(date);
    }

    /// Drop the stored plan for `date`; returns whether one existed
    pub fn clear_plan(&mut self, date: NaiveDate) -> bool {
        if self.plans.remove(&date).is_none() {
            return false;
        }

        if let Some(database) = &self.database {
            if let Err(e) = database.with_conn(|conn| DayPlan::delete(conn, date)) {
                warn!(%date, error = %e, "Failed to delete persisted plan");
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Settings and goal
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn nutrition_goal(&self) -> &NutritionGoal {
        &self.goal
    }

    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.settings.merge(update);
        self.persist_settings();
    }

    pub fn update_nutrition_goal(&mut self, update: &NutritionGoalUpdate) {
        self.goal.merge(update);
        if let Some(database) = &self.database {
            if let Err(e) = database.with_conn(|conn| self.goal.save(conn)) {
                warn!(error = %e, "Failed to persist nutrition goal");
            }
        }
    }

    /// Flip the dark-mode flag and return the new value
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.persist_settings();
        self.settings.dark_mode
    }

    // ------------------------------------------------------------------
    // Nutrition views
    // ------------------------------------------------------------------

    /// Sum of the resolved recipe totals, breakfast through snack
    ///
    /// Ids that no longer resolve contribute nothing.
    pub fn planned_nutrition<L>(&self, date: NaiveDate, lookup: &L) -> Nutrition
    where
        L: RecipeLookup + ?Sized,
    {
        let Some(plan) = self.plans.get(&date) else {
            return Nutrition::zero();
        };

        let totals: Vec<&Nutrition> = plan
            .meals
            .all_recipe_ids()
            .filter_map(|id| lookup.resolve(id))
            .map(|recipe| recipe.total_nutrition())
            .collect();
        nutrition::sum_nutrition(totals)
    }

    /// The recorded override if there is one, otherwise the planned total
    pub fn consumed_nutrition<L>(&self, date: NaiveDate, lookup: &L) -> Nutrition
    where
        L: RecipeLookup + ?Sized,
    {
        match self.plans.get(&date).and_then(|p| p.actual_nutrition) {
            Some(actual) => actual,
            None => self.planned_nutrition(date, lookup),
        }
    }

    /// Goal minus consumed, per field, never negative
    pub fn remaining_nutrition<L>(&self, date: NaiveDate, lookup: &L) -> Nutrition
    where
        L: RecipeLookup + ?Sized,
    {
        nutrition::remaining_nutrition(&self.goal, &self.consumed_nutrition(date, lookup))
    }

    pub fn goal_progress<L>(&self, date: NaiveDate, lookup: &L) -> NutritionProgress
    where
        L: RecipeLookup + ?Sized,
    {
        nutrition::goal_progress(&self.consumed_nutrition(date, lookup), &self.goal)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn persist_plan(&self, date: NaiveDate) {
        let (Some(database), Some(plan)) = (&self.database, self.plans.get(&date)) else {
            return;
        };
        if let Err(e) = database.with_transaction(|tx| DayPlan::save(tx, plan)) {
            warn!(%date, error = %e, "Failed to persist plan");
        }
    }

    fn persist_settings(&self) {
        if let Some(database) = &self.database {
            if let Err(e) = database.with_conn(|conn| self.settings.save(conn)) {
                warn!(error = %e, "Failed to persist settings");
            }
        }
    }
}
