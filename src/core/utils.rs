use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".steward";
const STORE_DIR: &str = "store";
const HOME_ENV: &str = "STEWARD_HOME";

/// Returns the application-specific data directory, defaulting to `~/.steward`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Resolves directories beneath an optional custom root.
pub struct PathResolver;

impl PathResolver {
    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(app_data_dir)
    }

    /// Directory holding one JSON file per persisted dataset.
    pub fn store_dir_in(base: &Path) -> PathBuf {
        base.join(STORE_DIR)
    }
}
