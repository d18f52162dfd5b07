//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("Applied schema migration v1");
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- RECIPES
        -- Saved recipes with their nutrition snapshot.
        -- List order is rowid order; upserts keep the rowid.
        -- ============================================
        CREATE TABLE recipes (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            servings INTEGER NOT NULL DEFAULT 1,

            -- Total nutrition computed when the ingredient list was saved
            total_calories REAL NOT NULL DEFAULT 0,
            total_protein REAL NOT NULL DEFAULT 0,
            total_fat REAL NOT NULL DEFAULT 0,
            total_carbs REAL NOT NULL DEFAULT 0,
            total_fiber REAL NOT NULL DEFAULT 0,
            total_sodium REAL NOT NULL DEFAULT 0,

            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE INDEX idx_recipes_name ON recipes(name);

        -- ============================================
        -- RECIPE INGREDIENTS
        -- Snapshot of (food, amount) pairs; food_id points into the
        -- static catalog, so there is no foreign key for it.
        -- ============================================
        CREATE TABLE recipe_ingredients (
            recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            food_id TEXT NOT NULL,
            amount REAL NOT NULL,             -- grams

            PRIMARY KEY (recipe_id, position)
        );

        -- ============================================
        -- DAY PLANS
        -- One row per date that has been written to
        -- ============================================
        CREATE TABLE day_plans (
            date TEXT PRIMARY KEY,            -- ISO date: "2025-01-09"
            target_calories REAL NOT NULL,

            -- Optional actual-nutrition override (all NULL when unset)
            actual_calories REAL,
            actual_protein REAL,
            actual_fat REAL,
            actual_carbs REAL,
            actual_fiber REAL,
            actual_sodium REAL
        );

        -- ============================================
        -- DAY PLAN MEALS
        -- Recipe ids per meal slot. Weak reference: the recipe may
        -- have been deleted, so no foreign key to recipes.
        -- ============================================
        CREATE TABLE day_plan_meals (
            date TEXT NOT NULL REFERENCES day_plans(date) ON DELETE CASCADE,
            meal_type TEXT NOT NULL CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack')),
            position INTEGER NOT NULL,
            recipe_id TEXT NOT NULL,

            PRIMARY KEY (date, meal_type, position)
        );

        -- ============================================
        -- SINGLETONS
        -- ============================================
        CREATE TABLE user_settings (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            target_calories REAL NOT NULL,
            target_protein REAL NOT NULL,
            target_fat REAL NOT NULL,
            target_carbs REAL NOT NULL,
            dark_mode INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE nutrition_goal (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            calories REAL NOT NULL,
            protein REAL NOT NULL,
            fat REAL NOT NULL,
            carbs REAL NOT NULL,
            fiber REAL NOT NULL,
            sodium REAL NOT NULL
        );
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
