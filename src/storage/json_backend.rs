use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, Result};
use crate::{
    core::utils::PathResolver,
    utils::persistence::{ensure_dir, read_optional, remove_if_exists, write_atomic},
};

/// Stores each key as `<root>/store/<key>.json`, replacing files atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    store_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        let store_dir = PathResolver::store_dir_in(&root);
        ensure_dir(&store_dir)?;
        Ok(Self { root, store_dir })
    }

    /// Store rooted at `$STEWARD_HOME` or `~/.steward`.
    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.store_dir.join(format!("{}.json", canonical_key(key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        read_optional(&self.path_for(key))
    }

    fn save(&self, key: &str, json: &str) -> Result<()> {
        let path = self.path_for(key);
        write_atomic(&path, json)?;
        debug!(path = %path.display(), "dataset written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        remove_if_exists(&self.path_for(key))
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '-').is_empty() {
        "dataset".into()
    } else {
        sanitized
    }
}
