#![doc(test(attr(deny(warnings))))]

//! Steward Core keeps a self-employed user's income and expense ledger and
//! derives a live estimate of the taxes owed on it (self-employment, federal
//! and state), together with a savings target and quarterly payment plan.

pub mod core;
pub mod currency;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod profile;
pub mod storage;
pub mod tax;
pub mod utils;

use std::sync::Once;

pub use crate::core::LedgerManager;
pub use errors::LedgerError;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Steward Core tracing initialized.");
    });
}
