//! Runtime configuration
//!
//! Read from the environment once at startup.

use std::path::{Path, PathBuf};

use crate::catalog::{CatalogResult, FoodCatalog};

pub const DATABASE_PATH_VAR: &str = "NUTRIPLAN_DATABASE_PATH";
pub const FOODS_PATH_VAR: &str = "NUTRIPLAN_FOODS_PATH";

/// Where state lives and where foods come from
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    /// `None` means the bundled dataset
    pub foods_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(DATABASE_PATH_VAR).ok(),
            std::env::var(FOODS_PATH_VAR).ok(),
        )
    }

    fn from_vars(database_path: Option<String>, foods_path: Option<String>) -> Self {
        let non_blank = |v: String| if v.trim().is_empty() { None } else { Some(PathBuf::from(v)) };

        Self {
            database_path: database_path
                .and_then(non_blank)
                .unwrap_or_else(default_database_path),
            foods_path: foods_path.and_then(non_blank),
        }
    }

    /// Load the configured food dataset
    pub fn load_catalog(&self) -> CatalogResult<FoodCatalog> {
        match &self.foods_path {
            Some(path) => FoodCatalog::from_path(path),
            None => FoodCatalog::bundled(),
        }
    }

    /// Human-readable source of the food dataset
    pub fn foods_source(&self) -> String {
        self.foods_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled".to_string())
    }
}

/// `data/nutriplan.db` under the project root
///
/// When running from `target/debug` or `target/release`, the project root
/// is two levels up from the executable.
fn default_database_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut path = project_root(&exe_dir);
    path.push("data");
    path.push("nutriplan.db");
    path
}

fn project_root(exe_dir: &Path) -> PathBuf {
    if exe_dir.ends_with("release") || exe_dir.ends_with("debug") {
        if let Some(root) = exe_dir.parent().and_then(Path::parent) {
            return root.to_path_buf();
        }
    }
    exe_dir.to_path_buf()
}
