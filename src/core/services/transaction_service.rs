//! Business logic helpers for managing transactions.

use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::errors::LedgerError;
use crate::ledger::{Ledger, Transaction, TransactionDraft};

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates `draft`, stores it under a fresh identifier and returns the id.
    pub fn add(ledger: &mut Ledger, draft: TransactionDraft) -> ServiceResult<Uuid> {
        let transaction = draft.into_transaction()?;
        Ok(ledger.add_transaction(transaction))
    }

    /// Replaces the transaction identified by `id` with `draft`, returning the previous value.
    pub fn update(
        ledger: &mut Ledger,
        id: Uuid,
        draft: TransactionDraft,
    ) -> ServiceResult<Transaction> {
        if ledger.transaction(id).is_none() {
            return Err(LedgerError::TransactionNotFound(id).into());
        }
        let replacement = draft.into_replacement(id)?;
        Ok(ledger.replace_transaction(replacement)?)
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<Transaction> {
        ledger
            .remove_transaction(id)
            .ok_or_else(|| LedgerError::TransactionNotFound(id).into())
    }

    /// Returns the ledger's transactions, most recent first.
    pub fn list(ledger: &Ledger) -> Vec<&Transaction> {
        ledger.transactions().iter().collect()
    }

    /// Transactions whose source or category contains `term` (case-insensitive)
    /// or whose amount contains it as text. A blank term matches everything.
    pub fn search<'a>(ledger: &'a Ledger, term: &str) -> Vec<&'a Transaction> {
        let needle = term.trim().to_lowercase();
        ledger
            .transactions()
            .iter()
            .filter(|txn| {
                needle.is_empty()
                    || txn.source.to_lowercase().contains(&needle)
                    || txn.category.to_lowercase().contains(&needle)
                    || txn.amount.to_string().contains(&needle)
            })
            .collect()
    }
}
