//! Build metadata
//!
//! `build.rs` bumps a build counter and stamps the compile time into the
//! environment; everything here is resolved at compile time.

use serde::Serialize;

use crate::db::migrations::SCHEMA_VERSION;

/// Incremented on every recompilation, 0 when built without `build.rs`
pub const BUILD_NUMBER: u64 = match option_env!("NUTRIPLAN_BUILD_NUMBER") {
    Some(s) => digits_to_u64(s),
    None => 0,
};

/// RFC 3339 compile time
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRIPLAN_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Leading ASCII digits of `s` as a number; anything else yields 0
const fn digits_to_u64(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut value: u64 = 0;
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value * 10 + (bytes[i] - b'0') as u64;
        i += 1;
    }
    if i == 0 || i != bytes.len() {
        return 0;
    }
    value
}

/// What the `version` command prints
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub schema_version: i32,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// One-line form used in log output
    pub fn summary(&self) -> String {
        format!(
            "{} v{} (build {}, schema v{})",
            self.name, self.version, self.build_number, self.schema_version
        )
    }
}

/// Startup banner, written to stderr so stdout stays machine-readable
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("-----------------------------------------------");
    eprintln!(" Nutriplan: recipes, meal plans, daily goals");
    eprintln!(" {}", info.summary());
    eprintln!(" compiled {}", info.build_timestamp);
    eprintln!("-----------------------------------------------");
}
