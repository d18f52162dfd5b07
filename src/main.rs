//! Nutriplan
//!
//! Prints JSON views of the recipe and meal-plan stores.
//!
//! Usage: `nutriplan [today | day <date> | week [date] | foods <query> | recipes [query] | suggest | version]`

use tracing_subscriber::EnvFilter;

use nutriplan::build_info::{self, BuildInfo};
use nutriplan::config::Config;
use nutriplan::db::Database;
use nutriplan::stores::{suggest_meals, today, PlanStore, RecipeStore};
use nutriplan::tools::{foods, plans, recipes};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries only the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutriplan=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("today");
    let arg = args.get(1).map(String::as_str);

    if command == "version" {
        return print_json(&BuildInfo::current());
    }

    build_info::print_startup_banner();

    let config = Config::from_env();
    tracing::info!(
        database = %config.database_path.display(),
        foods = %config.foods_source(),
        "Opening stores"
    );

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let database = Database::open(&config.database_path)?;
    let catalog = config.load_catalog()?;

    // The two stores load independently from the same file
    let plan_store = PlanStore::open(database.clone())?;
    let recipe_store = RecipeStore::open(catalog, database)?;

    match command {
        "today" => print_json(&plans::get_day_detail(&plan_store, &recipe_store, today())),
        "day" => {
            let date = plans::resolve_date(arg)?;
            print_json(&plans::get_day_detail(&plan_store, &recipe_store, date))
        }
        "week" => {
            let date = plans::resolve_date(arg)?;
            print_json(&plans::get_week_report(&plan_store, &recipe_store, date))
        }
        "foods" => print_json(&foods::search_foods(
            recipe_store.catalog(),
            arg.unwrap_or(""),
            foods::DEFAULT_SEARCH_LIMIT,
        )),
        "recipes" => print_json(&recipes::list_recipes(&recipe_store, arg)),
        "suggest" => print_json(&suggest_meals(today(), &plan_store, &recipe_store)),
        other => Err(format!("Unknown command: {}", other).into()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
