//! Income, expense and net-profit aggregation over a set of transactions.

use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};

/// Totals derived from a transaction collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`; negative when expenses exceed income.
    pub net_profit: f64,
}

impl LedgerTotals {
    /// Sums the transactions by kind.
    ///
    /// Amounts are added in a canonical order so that the result does not
    /// depend on the order of the input.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut income = Vec::new();
        let mut expenses = Vec::new();
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => income.push(txn.amount),
                TransactionKind::Expense => expenses.push(txn.amount),
            }
        }
        Self::from_parts(canonical_sum(income), canonical_sum(expenses))
    }

    pub fn from_parts(income: f64, expenses: f64) -> Self {
        Self {
            income,
            expenses,
            net_profit: income - expenses,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit > 0.0
    }
}

fn canonical_sum(mut amounts: Vec<f64>) -> f64 {
    amounts.sort_by(|a, b| a.total_cmp(b));
    amounts.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(amount: f64, kind: TransactionKind) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        Transaction::new(date, "Source", amount, kind, "Category")
    }

    #[test]
    fn empty_ledger_has_zero_totals() {
        let empty: Vec<Transaction> = Vec::new();
        let totals = LedgerTotals::from_transactions(&empty);
        assert_eq!(totals, LedgerTotals::default());
    }

    #[test]
    fn net_profit_is_income_minus_expenses() {
        let items = vec![
            txn(1200.5, TransactionKind::Income),
            txn(300.25, TransactionKind::Expense),
            txn(99.99, TransactionKind::Expense),
            txn(0.1, TransactionKind::Income),
        ];
        let totals = LedgerTotals::from_transactions(&items);
        assert_eq!(totals.net_profit, totals.income - totals.expenses);
        assert!((totals.income - 1200.6).abs() < 1e-9);
        assert!((totals.expenses - 400.24).abs() < 1e-9);
    }

    #[test]
    fn expenses_beyond_income_yield_negative_profit() {
        let items = vec![
            txn(100.0, TransactionKind::Income),
            txn(250.0, TransactionKind::Expense),
        ];
        let totals = LedgerTotals::from_transactions(&items);
        assert_eq!(totals.net_profit, -150.0);
        assert!(!totals.is_profitable());
    }

    #[test]
    fn totals_are_bit_identical_under_reordering() {
        let mut items: Vec<Transaction> = [0.1, 0.2, 0.3, 1e16, 1.0, 7.77]
            .iter()
            .map(|amount| txn(*amount, TransactionKind::Income))
            .collect();
        items.push(txn(0.7, TransactionKind::Expense));
        let forward = LedgerTotals::from_transactions(&items);
        items.reverse();
        let backward = LedgerTotals::from_transactions(&items);
        items.rotate_left(3);
        let rotated = LedgerTotals::from_transactions(&items);

        assert_eq!(forward.income.to_bits(), backward.income.to_bits());
        assert_eq!(forward.income.to_bits(), rotated.income.to_bits());
        assert_eq!(forward.net_profit.to_bits(), rotated.net_profit.to_bits());
    }
}
