#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use steward_core::{
    core::time::FixedClock,
    ledger::{Transaction, TransactionDraft, TransactionKind},
    storage::JsonFileStore,
    tax::TaxTables,
    LedgerManager,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Fresh data directory that outlives the test body.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Manager backed by a JSON file store in `base`, pinned to `today`.
pub fn manager_in(base: &Path, today: NaiveDate) -> LedgerManager {
    let store = JsonFileStore::new(Some(base.to_path_buf())).expect("create json file store");
    LedgerManager::open_with(
        Box::new(store),
        TaxTables::tax_year_2024().clone(),
        Box::new(FixedClock(today)),
    )
}

/// Creates an isolated manager backed by a unique directory.
pub fn setup_manager() -> (LedgerManager, PathBuf) {
    let base = temp_base();
    let manager = manager_in(&base, date(2024, 5, 1));
    (manager, base)
}

pub fn income(amount: f64) -> TransactionDraft {
    TransactionDraft::new(
        date(2024, 3, 15),
        "Client",
        amount,
        TransactionKind::Income,
        "Client Payment",
    )
}

pub fn expense(amount: f64) -> TransactionDraft {
    TransactionDraft::new(
        date(2024, 3, 20),
        "Supplier",
        amount,
        TransactionKind::Expense,
        "Office Supplies",
    )
}

/// Transaction with a predictable identifier for snapshot output.
pub fn fixed_transaction(
    seed: u128,
    day: NaiveDate,
    source: &str,
    amount: f64,
    kind: TransactionKind,
    category: &str,
) -> Transaction {
    let mut txn = Transaction::new(day, source, amount, kind, category);
    txn.id = Uuid::from_u128(seed);
    txn
}
