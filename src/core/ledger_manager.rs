use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::services::{
    CategoryService, ServiceResult, SummaryService, TransactionService,
};
use crate::core::time::{Clock, SystemClock};
use crate::errors::LedgerError;
use crate::export;
use crate::ledger::{
    capture_receipt, default_categories, CategoryKind, CategoryRecord, ExtractedDraft, Ledger,
    ReceiptExtractor, Transaction, TransactionDraft,
};
use crate::profile::{DeductionType, FilingStatus, SavingsPercentage, TaxProfile};
use crate::storage::{keys, load_or_default, save_value, KeyValueStore};
use crate::tax::{estimate, QuarterlySchedule, TaxEstimate, TaxTables};

/// Owns the ledger, the tax profile and their persisted form.
///
/// Every mutation is applied to a copy, persisted, and only then swapped in
/// together with a freshly computed [`TaxEstimate`]. A failed save leaves the
/// manager unchanged, and readers never see an estimate that belongs to a
/// different ledger or profile than the one they can read.
pub struct LedgerManager {
    ledger: Ledger,
    profile: TaxProfile,
    onboarded: bool,
    estimate: TaxEstimate,
    tables: TaxTables,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl LedgerManager {
    /// Loads every dataset from `store` using the built-in tables and the system clock.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        Self::open_with(
            store,
            TaxTables::tax_year_2024().clone(),
            Box::new(SystemClock),
        )
    }

    pub fn open_with(
        store: Box<dyn KeyValueStore>,
        tables: TaxTables,
        clock: Box<dyn Clock>,
    ) -> Self {
        let ledger = load_ledger(store.as_ref());
        let profile = load_profile(store.as_ref());
        let onboarded = load_or_default(store.as_ref(), keys::ONBOARDED, || false);
        let estimate = estimate(ledger.transactions(), &profile, &tables);
        info!(
            transactions = ledger.transaction_count(),
            categories = ledger.categories.len(),
            tax_year = tables.year,
            "ledger opened"
        );
        Self {
            ledger,
            profile,
            onboarded,
            estimate,
            tables,
            store,
            clock,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn profile(&self) -> &TaxProfile {
        &self.profile
    }

    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Estimate matching the current ledger and profile.
    pub fn estimate(&self) -> &TaxEstimate {
        &self.estimate
    }

    pub fn is_onboarded(&self) -> bool {
        self.onboarded
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.ledger.transaction(id)
    }

    pub fn search(&self, term: &str) -> Vec<&Transaction> {
        TransactionService::search(&self.ledger, term)
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> ServiceResult<Uuid> {
        let id = self.commit_transactions(|ledger| TransactionService::add(ledger, draft))?;
        debug!(%id, "transaction added");
        Ok(id)
    }

    pub fn update_transaction(
        &mut self,
        id: Uuid,
        draft: TransactionDraft,
    ) -> ServiceResult<Transaction> {
        let previous =
            self.commit_transactions(|ledger| TransactionService::update(ledger, id, draft))?;
        debug!(%id, "transaction updated");
        Ok(previous)
    }

    pub fn delete_transaction(&mut self, id: Uuid) -> ServiceResult<Transaction> {
        let removed = self.commit_transactions(|ledger| TransactionService::remove(ledger, id))?;
        debug!(%id, "transaction deleted");
        Ok(removed)
    }

    /// Adds a custom category; `Ok(false)` when it already exists.
    pub fn add_category(&mut self, name: &str, kind: CategoryKind) -> ServiceResult<bool> {
        let mut next = self.ledger.clone();
        let added = CategoryService::add(&mut next, name, kind)?;
        if added {
            save_value(self.store.as_ref(), keys::CATEGORIES, &next.categories)?;
            self.ledger = next;
            debug!(name = name.trim(), "category added");
        }
        Ok(added)
    }

    pub fn set_filing_status(&mut self, status: FilingStatus) -> ServiceResult<()> {
        self.commit_profile(|profile| profile.filing_status = status)
    }

    pub fn set_state(&mut self, code: &str) -> ServiceResult<()> {
        self.commit_profile(|profile| profile.set_state(code))
    }

    pub fn set_deduction_type(&mut self, deduction: DeductionType) -> ServiceResult<()> {
        self.commit_profile(|profile| profile.deduction_type = deduction)
    }

    pub fn set_itemized_deductions(&mut self, amount: f64) -> ServiceResult<()> {
        self.commit_profile(|profile| profile.set_itemized_deductions(amount))
    }

    /// Stores the savings target, clamped to 10–50 percent.
    pub fn set_savings_percentage(&mut self, percentage: u8) -> ServiceResult<()> {
        self.commit_profile(|profile| {
            profile.savings_percentage = SavingsPercentage::new(percentage)
        })
    }

    /// Replaces the whole profile in one step.
    pub fn update_profile(&mut self, profile: TaxProfile) -> ServiceResult<()> {
        self.commit_profile(|current| {
            let state = profile.state_code.clone();
            *current = profile;
            current.set_state(&state);
        })
    }

    pub fn set_onboarded(&mut self, onboarded: bool) -> ServiceResult<()> {
        save_value(self.store.as_ref(), keys::ONBOARDED, &onboarded)?;
        self.onboarded = onboarded;
        Ok(())
    }

    /// Clears every dataset and restores the defaults.
    ///
    /// A removal that fails puts back the datasets already removed, so the
    /// store keeps matching the data still held in memory.
    pub fn reset(&mut self) -> ServiceResult<()> {
        let mut snapshot = Vec::with_capacity(keys::ALL.len());
        for key in keys::ALL {
            snapshot.push((key, self.store.load(key)?));
        }
        for (index, (key, _)) in snapshot.iter().enumerate() {
            if let Err(err) = self.store.remove(key) {
                restore_datasets(self.store.as_ref(), &snapshot[..index]);
                return Err(err.into());
            }
        }
        self.ledger = Ledger::new();
        self.profile = TaxProfile::default();
        self.onboarded = false;
        self.recompute();
        info!("all datasets reset");
        Ok(())
    }

    /// Assembles a reviewable draft from a receipt image.
    pub fn capture_receipt(
        &self,
        extractor: &dyn ReceiptExtractor,
        image: impl Into<String>,
    ) -> Result<ExtractedDraft, LedgerError> {
        capture_receipt(extractor, image, &self.ledger, self.clock.as_ref())
    }

    pub fn quarterly_schedule(&self) -> QuarterlySchedule {
        self.estimate.quarterly()
    }

    pub fn summary(&self) -> String {
        SummaryService::render(&self.estimate, &self.tables, self.clock.today())
    }

    pub fn export_csv_string(&self) -> Result<String, LedgerError> {
        export::to_csv_string(self.ledger.transactions())
    }

    /// Writes today's CSV export into `dir` and returns the file path.
    pub fn export_csv(&self, dir: &Path) -> Result<PathBuf, LedgerError> {
        export::export_to_dir(self.ledger.transactions(), dir, self.clock.today())
    }

    fn commit_transactions<T, F>(&mut self, apply: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut Ledger) -> ServiceResult<T>,
    {
        let mut next = self.ledger.clone();
        let outcome = apply(&mut next)?;
        save_value(self.store.as_ref(), keys::TRANSACTIONS, next.transactions())?;
        self.ledger = next;
        self.recompute();
        Ok(outcome)
    }

    fn commit_profile<F>(&mut self, apply: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut TaxProfile),
    {
        let mut next = self.profile.clone();
        apply(&mut next);
        if next == self.profile {
            return Ok(());
        }
        save_profile(self.store.as_ref(), &next)?;
        self.profile = next;
        self.recompute();
        debug!(
            filing_status = %self.profile.filing_status,
            state = %self.profile.state_code,
            deduction = %self.profile.deduction_type,
            "tax profile updated"
        );
        Ok(())
    }

    fn recompute(&mut self) {
        self.estimate = estimate(self.ledger.transactions(), &self.profile, &self.tables);
    }
}

fn load_ledger(store: &dyn KeyValueStore) -> Ledger {
    let stored: Vec<Transaction> = load_or_default(store, keys::TRANSACTIONS, Vec::new);
    let total = stored.len();
    let transactions: Vec<Transaction> = stored
        .into_iter()
        .filter(|txn| match txn.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!(id = %txn.id, error = %err, "dropping invalid stored transaction");
                false
            }
        })
        .collect();
    if transactions.len() != total {
        warn!(
            dropped = total - transactions.len(),
            "stored transactions failed validation"
        );
    }

    let records: Option<Vec<CategoryRecord>> = load_or_default(store, keys::CATEGORIES, || None);
    let categories = match records {
        Some(records) => records
            .into_iter()
            .map(CategoryRecord::into_category)
            .collect(),
        None => default_categories(),
    };
    Ledger::from_parts(transactions, categories)
}

fn load_profile(store: &dyn KeyValueStore) -> TaxProfile {
    let stored: Option<TaxProfile> = load_or_default(store, keys::TAX_PROFILE, || None);
    let mut profile = stored.unwrap_or_else(|| load_field_profile(store));
    let state = profile.state_code.clone();
    profile.set_state(&state);
    let itemized = profile.itemized_deductions;
    profile.set_itemized_deductions(itemized);
    profile
}

/// Profile assembled from the per-field keys written by earlier versions.
fn load_field_profile(store: &dyn KeyValueStore) -> TaxProfile {
    TaxProfile {
        filing_status: load_or_default(store, keys::FILING_STATUS, FilingStatus::default),
        state_code: load_or_default(store, keys::USER_STATE, String::new),
        deduction_type: load_or_default(store, keys::DEDUCTION_TYPE, DeductionType::default),
        itemized_deductions: load_or_default(store, keys::ITEMIZED_DEDUCTIONS, || 0.0),
        savings_percentage: load_or_default(
            store,
            keys::SAVINGS_PERCENTAGE,
            SavingsPercentage::default,
        ),
    }
}

/// The whole profile goes out as one document, so a failed write never
/// leaves a mix of old and new fields behind.
fn save_profile(store: &dyn KeyValueStore, profile: &TaxProfile) -> Result<(), LedgerError> {
    save_value(store, keys::TAX_PROFILE, profile)
}

fn restore_datasets(store: &dyn KeyValueStore, removed: &[(&str, Option<String>)]) {
    for (key, raw) in removed {
        if let Some(raw) = raw {
            if let Err(err) = store.save(key, raw) {
                warn!(key = *key, error = %err, "failed to restore dataset after aborted reset");
            }
        }
    }
}
