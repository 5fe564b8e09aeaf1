use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// Direction of a ledger entry. Amounts are always non-negative; the kind
/// carries the sign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Parses a loosely formatted kind label, returning `None` when unrecognised.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub source: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    /// Image reference (data URL) of the receipt the entry was captured from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        source: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            source: source.into(),
            amount,
            kind,
            category: category.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: impl Into<String>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Checks the invariants a transaction must satisfy before it enters a ledger.
    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_fields(self.amount, &self.source, &self.category)
    }
}

/// Field values for a transaction that has not been assigned an identifier yet.
///
/// Drafts come from manual entry or from [`crate::ledger::extraction`]; they are
/// validated when converted into a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub source: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl TransactionDraft {
    pub fn new(
        date: NaiveDate,
        source: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            source: source.into(),
            amount,
            kind,
            category: category.into(),
            attachment: None,
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_fields(self.amount, &self.source, &self.category)
    }

    /// Builds a new transaction with a fresh identifier.
    pub fn into_transaction(self) -> Result<Transaction, LedgerError> {
        self.into_replacement(Uuid::new_v4())
    }

    /// Builds the full replacement for the transaction identified by `id`.
    pub fn into_replacement(self, id: Uuid) -> Result<Transaction, LedgerError> {
        self.validate()?;
        Ok(Transaction {
            id,
            date: self.date,
            source: self.source.trim().to_string(),
            amount: self.amount,
            kind: self.kind,
            category: self.category.trim().to_string(),
            attachment: self.attachment,
        })
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            source: txn.source.clone(),
            amount: txn.amount,
            kind: txn.kind,
            category: txn.category.clone(),
            attachment: txn.attachment.clone(),
        }
    }
}

fn validate_fields(amount: f64, source: &str, category: &str) -> Result<(), LedgerError> {
    if !amount.is_finite() {
        return Err(LedgerError::Validation(format!(
            "amount `{amount}` is not a number"
        )));
    }
    if amount < 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount {amount} must not be negative"
        )));
    }
    if source.trim().is_empty() {
        return Err(LedgerError::Validation("source must not be empty".into()));
    }
    if category.trim().is_empty() {
        return Err(LedgerError::Validation("category must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn expense(source: &str, amount: f64, category: &str) -> TransactionDraft {
        TransactionDraft::new(date(), source, amount, TransactionKind::Expense, category)
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let txn = Transaction::new(
            date(),
            "Acme",
            120.0,
            TransactionKind::Income,
            "Client Payment",
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["date"], "2024-03-09");
        assert!(json.get("attachment").is_none());
    }

    #[test]
    fn kind_parse_is_lenient() {
        assert_eq!(TransactionKind::parse(" Income "), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("EXPENSE"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("refund"), None);
    }

    #[test]
    fn draft_rejects_negative_and_nan_amounts() {
        let negative = expense("Shop", -1.0, "Travel");
        assert!(matches!(negative.into_transaction(), Err(LedgerError::Validation(_))));

        let nan = expense("Shop", f64::NAN, "Travel");
        assert!(matches!(nan.validate(), Err(LedgerError::Validation(_))));
    }

    #[test]
    fn draft_requires_source_and_category() {
        let blank_source = expense("  ", 5.0, "Travel");
        assert!(blank_source.validate().is_err());

        let blank_category = expense("Cafe", 5.0, "");
        assert!(blank_category.validate().is_err());
    }

    #[test]
    fn replacement_keeps_identifier() {
        let id = Uuid::new_v4();
        let draft = expense(" Cafe ", 5.0, "Meals & Entertainment");
        let txn = draft.into_replacement(id).unwrap();
        assert_eq!(txn.id, id);
        assert_eq!(txn.source, "Cafe");
    }
}
