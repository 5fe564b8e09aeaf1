//! Key-value persistence for the user's datasets.
//!
//! Every dataset (transactions, categories, the tax profile, the onboarding
//! flag) lives under its own key as a JSON document. Reads go through [`load_or_default`],
//! which never fails: a missing or damaged value falls back to the default
//! and is reported through `tracing`.

pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::LedgerError;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Dataset names.
pub mod keys {
    pub const TRANSACTIONS: &str = "steward-transactions";
    pub const CATEGORIES: &str = "steward-categories";
    pub const TAX_PROFILE: &str = "steward-tax-profile";
    pub const ONBOARDED: &str = "steward-onboarded";

    // Per-field profile keys, read only when no profile document exists.
    pub const USER_STATE: &str = "steward-user-state";
    pub const SAVINGS_PERCENTAGE: &str = "steward-tax-savings-percentage";
    pub const DEDUCTION_TYPE: &str = "steward-deduction-type";
    pub const FILING_STATUS: &str = "steward-filing-status";
    pub const ITEMIZED_DEDUCTIONS: &str = "steward-itemized-deductions";

    pub const ALL: [&str; 9] = [
        TRANSACTIONS,
        CATEGORIES,
        TAX_PROFILE,
        USER_STATE,
        SAVINGS_PERCENTAGE,
        DEDUCTION_TYPE,
        FILING_STATUS,
        ITEMIZED_DEDUCTIONS,
        ONBOARDED,
    ];
}

/// Opaque store of JSON documents keyed by dataset name.
pub trait KeyValueStore: Send + Sync {
    /// Raw JSON stored under `key`, `None` when nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, json: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Decodes the value under `key`, falling back to `default` when it is
/// missing, unreadable or malformed.
pub fn load_or_default<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored value, using default");
            return default();
        }
        Err(err) => {
            warn!(key, error = %err, "failed to read stored value, using default");
            return default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, error = %err, "malformed stored value, using default");
            default()
        }
    }
}

/// Serializes `value` and saves it under `key`.
pub fn save_value<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.save(key, &json)?;
    debug!(key, bytes = json.len(), "stored value saved");
    Ok(())
}
