//! Transactions, categories and the ledger that owns them.

pub mod category;
pub mod extraction;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod totals;
pub mod transaction;

pub use category::{default_categories, Category, CategoryKind, CategoryRecord, UNCATEGORIZED};
pub use extraction::{
    capture_receipt, DraftField, ExtractedDraft, PartialTransaction, ReceiptExtractor,
    UNKNOWN_SOURCE,
};
pub use ledger::Ledger;
pub use totals::LedgerTotals;
pub use transaction::{Transaction, TransactionDraft, TransactionKind};
