use uuid::Uuid;

use super::{
    category::{default_categories, Category},
    totals::LedgerTotals,
    transaction::{Transaction, TransactionKind},
};
use crate::errors::LedgerError;

/// Owns every transaction of a user, kept most-recent-date first, plus the
/// user-managed category set.
#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), default_categories())
    }

    /// Rebuilds a ledger from persisted datasets, restoring the date ordering.
    pub fn from_parts(transactions: Vec<Transaction>, categories: Vec<Category>) -> Self {
        let mut ledger = Self {
            transactions,
            categories,
        };
        ledger.sort_transactions();
        ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.sort_transactions();
        id
    }

    /// Swaps in `transaction` for the entry with the same id and returns the previous value.
    pub fn replace_transaction(
        &mut self,
        transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == transaction.id)
            .ok_or(LedgerError::TransactionNotFound(transaction.id))?;
        let previous = std::mem::replace(slot, transaction);
        self.sort_transactions();
        Ok(previous)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        Some(removed)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.matches(name))
    }

    /// Adds `category` unless one with the same name exists. Returns whether it was added.
    pub fn add_category(&mut self, category: Category) -> bool {
        if category.name.is_empty() || self.category(&category.name).is_some() {
            return false;
        }
        self.categories.push(category);
        true
    }

    /// Category names offered for a given direction, or all of them.
    pub fn category_names(&self, kind: Option<TransactionKind>) -> Vec<String> {
        self.categories
            .iter()
            .filter(|category| kind.map_or(true, |kind| category.applies_to(kind)))
            .map(|category| category.name.clone())
            .collect()
    }

    pub fn totals(&self) -> LedgerTotals {
        LedgerTotals::from_transactions(&self.transactions)
    }

    fn sort_transactions(&mut self) {
        // Stable, so same-day entries keep their insertion order.
        self.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::category::CategoryKind;
    use chrono::NaiveDate;

    fn on(day: u32, source: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        Transaction::new(date, source, 10.0, TransactionKind::Expense, "Travel")
    }

    fn sources(ledger: &Ledger) -> Vec<&str> {
        ledger
            .transactions()
            .iter()
            .map(|txn| txn.source.as_str())
            .collect()
    }

    #[test]
    fn transactions_are_kept_most_recent_first() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(on(3, "middle"));
        ledger.add_transaction(on(9, "latest"));
        ledger.add_transaction(on(1, "oldest"));
        ledger.add_transaction(on(3, "middle-later"));

        assert_eq!(
            sources(&ledger),
            vec!["latest", "middle", "middle-later", "oldest"]
        );
    }

    #[test]
    fn replace_reorders_and_returns_previous() {
        let mut ledger = Ledger::new();
        let first = ledger.add_transaction(on(2, "first"));
        ledger.add_transaction(on(5, "second"));

        let mut edited = ledger.transaction(first).cloned().unwrap();
        edited.date = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        edited.source = "first-edited".into();
        let previous = ledger.replace_transaction(edited).unwrap();

        assert_eq!(previous.source, "first");
        assert_eq!(sources(&ledger), vec!["first-edited", "second"]);
    }

    #[test]
    fn replace_unknown_transaction_fails() {
        let mut ledger = Ledger::new();
        let stray = on(1, "stray");
        let id = stray.id;
        let err = ledger.replace_transaction(stray).unwrap_err();
        assert!(matches!(err, LedgerError::TransactionNotFound(missing) if missing == id));
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let mut ledger = Ledger::new();
        let id = ledger.add_transaction(on(4, "gone"));
        let removed = ledger.remove_transaction(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(ledger.transaction(id).is_none());
        assert!(ledger.remove_transaction(id).is_none());
    }

    #[test]
    fn duplicate_categories_are_ignored() {
        let mut ledger = Ledger::new();
        assert!(!ledger.add_category(Category::new("travel", CategoryKind::Expense)));
        assert!(ledger.add_category(Category::new("Coworking", CategoryKind::Any)));
        assert!(ledger
            .category_names(Some(TransactionKind::Income))
            .contains(&"Coworking".to_string()));
    }
}
