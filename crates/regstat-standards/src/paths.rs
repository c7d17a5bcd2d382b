//! Environment overrides for reference data.

use std::path::PathBuf;

/// Environment variable pointing at a column schema TOML file.
pub const SCHEMA_ENV_VAR: &str = "REGSTAT_SCHEMA";

/// Environment variable pointing at a region registry TOML file.
pub const REGIONS_ENV_VAR: &str = "REGSTAT_REGIONS";

/// Column schema path from `REGSTAT_SCHEMA`, if set and non-empty.
pub fn schema_override() -> Option<PathBuf> {
    env_path(SCHEMA_ENV_VAR)
}

/// Region registry path from `REGSTAT_REGIONS`, if set and non-empty.
pub fn regions_override() -> Option<PathBuf> {
    env_path(REGIONS_ENV_VAR)
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
