//! Composes the calculators into one estimate.
//!
//! [`estimate`] is a pure function of the ledger, the profile and the tables.
//! Every figure of a [`TaxEstimate`] comes from the same inputs, so a caller
//! that swaps in a fresh estimate after each change never exposes a mix of
//! old and new values.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    federal::{federal_detail, FederalDetail},
    quarterly::QuarterlySchedule,
    savings::SavingsGoal,
    self_employment::self_employment_tax,
    state::state_income_tax,
    tables::TaxTables,
};
use crate::{
    currency::format_cents,
    ledger::{LedgerTotals, Transaction},
    profile::TaxProfile,
};

/// Tax owed per component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub self_employment: f64,
    pub federal: f64,
    pub state: f64,
}

impl TaxBreakdown {
    pub fn total(&self) -> f64 {
        self.self_employment + self.federal + self.state
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0.0
    }
}

impl fmt::Display for TaxBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Self-employment tax: {}", format_cents(self.self_employment))?;
        writeln!(f, "Federal income tax:  {}", format_cents(self.federal))?;
        writeln!(f, "State income tax:    {}", format_cents(self.state))?;
        write!(f, "Total:               {}", format_cents(self.total()))
    }
}

/// Everything derived from one (ledger, profile) snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxEstimate {
    pub tax_year: i32,
    pub totals: LedgerTotals,
    pub profile: TaxProfile,
    pub breakdown: TaxBreakdown,
    pub federal: FederalDetail,
    pub savings: SavingsGoal,
}

impl TaxEstimate {
    pub fn total(&self) -> f64 {
        self.breakdown.total()
    }

    /// Share of net profit owed in tax, 0 without profit.
    pub fn effective_rate(&self) -> f64 {
        if self.totals.net_profit > 0.0 {
            self.total() / self.totals.net_profit
        } else {
            0.0
        }
    }

    pub fn quarterly(&self) -> QuarterlySchedule {
        QuarterlySchedule::new(self.tax_year, self.total())
    }
}

/// Estimates the tax owed on `transactions` for `profile`.
pub fn estimate<'a, I>(transactions: I, profile: &TaxProfile, tables: &TaxTables) -> TaxEstimate
where
    I: IntoIterator<Item = &'a Transaction>,
{
    estimate_from_totals(LedgerTotals::from_transactions(transactions), profile, tables)
}

/// Same as [`estimate`] for already aggregated totals.
pub fn estimate_from_totals(
    totals: LedgerTotals,
    profile: &TaxProfile,
    tables: &TaxTables,
) -> TaxEstimate {
    let net_profit = totals.net_profit;
    // Federal depends on the deductible half of the SE tax.
    let self_employment = self_employment_tax(net_profit, &tables.self_employment);
    let federal = federal_detail(
        net_profit,
        self_employment,
        profile.filing_status,
        profile.deduction_type,
        profile.itemized_deductions,
        tables,
    );
    let state = state_income_tax(net_profit, &profile.state_code, tables);

    let breakdown = TaxBreakdown {
        self_employment,
        federal: federal.tax,
        state,
    };
    let savings = SavingsGoal::project(
        totals.income,
        profile.savings_percentage,
        breakdown.total(),
    );

    TaxEstimate {
        tax_year: tables.year,
        totals,
        profile: profile.clone(),
        breakdown,
        federal,
        savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ledger::TransactionKind,
        profile::{DeductionType, FilingStatus},
        tax::federal::bracket_tax,
    };
    use chrono::NaiveDate;

    fn txn(amount: f64, kind: TransactionKind) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Transaction::new(date, "Client", amount, kind, "Client Payment")
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            txn(120_000.0, TransactionKind::Income),
            txn(20_000.0, TransactionKind::Expense),
        ]
    }

    #[test]
    fn single_filer_scenario() {
        let tables = TaxTables::tax_year_2024();
        let result = estimate(&scenario(), &TaxProfile::default(), tables);

        assert_eq!(result.totals.net_profit, 100_000.0);
        assert!((result.breakdown.self_employment - 14_129.55).abs() < 1e-6);
        assert!((result.federal.adjusted_gross_income - 92_935.225).abs() < 1e-6);
        assert!((result.federal.taxable_income - 78_335.225).abs() < 1e-6);

        let expected_federal = 1_160.0 + 0.12 * 35_550.0 + 0.22 * (78_335.225 - 47_150.0);
        assert!((result.breakdown.federal - expected_federal).abs() < 1e-6);
        assert_eq!(result.breakdown.state, 0.0);
        assert_eq!(
            result.total(),
            result.breakdown.self_employment + result.breakdown.federal
        );
    }

    #[test]
    fn losses_zero_every_component() {
        let items = vec![
            txn(1_000.0, TransactionKind::Income),
            txn(4_000.0, TransactionKind::Expense),
        ];
        let profile = TaxProfile::default().with_state("CA");
        let result = estimate(&items, &profile, TaxTables::tax_year_2024());
        assert!(result.breakdown.is_zero());
        assert_eq!(result.federal.taxable_income, 0.0);
        assert_eq!(result.effective_rate(), 0.0);
    }

    #[test]
    fn empty_ledger_has_no_savings_progress() {
        let empty: Vec<Transaction> = Vec::new();
        let result = estimate(&empty, &TaxProfile::default(), TaxTables::tax_year_2024());
        assert_eq!(result.savings.progress_ratio, 0.0);
        assert_eq!(result.total(), 0.0);
    }

    #[test]
    fn recomputation_is_bit_identical() {
        let tables = TaxTables::tax_year_2024();
        let profile = TaxProfile::default()
            .with_filing_status(FilingStatus::HeadOfHousehold)
            .with_state("NY");
        let first = estimate(&scenario(), &profile, tables);
        let second = estimate(&scenario(), &profile, tables);
        assert_eq!(first.total().to_bits(), second.total().to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn state_tax_uses_net_profit() {
        let profile = TaxProfile::default().with_state("ca");
        let result = estimate(&scenario(), &profile, TaxTables::tax_year_2024());
        assert!((result.breakdown.state - 9_300.0).abs() < 1e-9);
    }

    #[test]
    fn itemized_profile_uses_its_amount() {
        let tables = TaxTables::tax_year_2024();
        let profile = TaxProfile::default().with_itemized(30_000.0);
        let result = estimate(&scenario(), &profile, tables);
        assert_eq!(result.federal.deduction_type, DeductionType::Itemized);
        assert_eq!(result.federal.deduction, 30_000.0);
        let expected = bracket_tax(
            result.federal.adjusted_gross_income - 30_000.0,
            tables.brackets(FilingStatus::Single).brackets(),
        );
        assert_eq!(result.breakdown.federal, expected);
    }

    #[test]
    fn quarterly_installments_split_the_total() {
        let result = estimate(&scenario(), &TaxProfile::default(), TaxTables::tax_year_2024());
        let schedule = result.quarterly();
        assert_eq!(schedule.tax_year, 2024);
        assert!((schedule.total() - result.total()).abs() < 1e-6);
    }

    #[test]
    fn breakdown_renders_each_line() {
        let breakdown = TaxBreakdown {
            self_employment: 14_129.55,
            federal: 1_000.0,
            state: 0.0,
        };
        let rendered = breakdown.to_string();
        assert!(rendered.contains("Self-employment tax: $14,129.55"));
        assert!(rendered.ends_with("$15,129.55"));
    }
}
