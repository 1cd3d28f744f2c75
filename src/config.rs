// Runtime configuration for the CLI and server
// Engine constants (threshold, hours/year, segment boundaries) are compile-time and live
// next to the code that uses them.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "salaries.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Region shown when none is requested.
pub const DEFAULT_REGION: &str = "MD";
/// Category shown when none is requested.
pub const DEFAULT_CATEGORY: &str = "retail";
/// Regions compared side by side by default.
pub const DEFAULT_COMPARISON_REGIONS: [&str; 3] = ["MD", "DC", "VA"];

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite database file (`SALARY_DB_PATH`)
    pub database_path: PathBuf,
    /// Server listen address (`SALARY_BIND_ADDR`)
    pub bind_addr: String,
    /// Public base URL used to build submit links (`SALARY_PUBLIC_URL`)
    pub public_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable lookup; blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = AppConfig::default();

        AppConfig {
            database_path: get("SALARY_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            bind_addr: get("SALARY_BIND_ADDR").unwrap_or(defaults.bind_addr),
            public_url: get("SALARY_PUBLIC_URL").unwrap_or(defaults.public_url),
        }
    }
}

pub fn default_comparison_regions() -> Vec<String> {
    DEFAULT_COMPARISON_REGIONS
        .iter()
        .map(|r| r.to_string())
        .collect()
}
