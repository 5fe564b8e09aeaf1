//! Federal income tax on self-employment profit.

use serde::{Deserialize, Serialize};

use super::tables::{TaxBracket, TaxTables};
use crate::profile::{DeductionType, FilingStatus};

/// Intermediate figures of the federal computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FederalDetail {
    pub adjusted_gross_income: f64,
    pub deduction_type: DeductionType,
    /// Deduction subtracted from AGI (standard amount or itemized total).
    pub deduction: f64,
    pub taxable_income: f64,
    pub tax: f64,
}

/// Progressive tax on `taxable_income`: each bracket's rate applies only to
/// the slice of income inside its bounds.
pub fn bracket_tax(taxable_income: f64, brackets: &[TaxBracket]) -> f64 {
    if taxable_income <= 0.0 {
        return 0.0;
    }

    let mut tax = 0.0;
    let mut remaining = taxable_income;
    for bracket in brackets {
        if remaining <= 0.0 {
            break;
        }
        let in_bracket = remaining.min(bracket.upper_bound() - bracket.lower);
        tax += in_bracket * bracket.rate;
        remaining -= in_bracket;
    }
    tax.max(0.0)
}

/// Runs the federal computation and keeps its intermediate figures.
pub fn federal_detail(
    net_profit: f64,
    self_employment_tax: f64,
    filing_status: FilingStatus,
    deduction_type: DeductionType,
    itemized_deductions: f64,
    tables: &TaxTables,
) -> FederalDetail {
    if net_profit <= 0.0 {
        return FederalDetail {
            deduction_type,
            ..FederalDetail::default()
        };
    }

    let adjusted_gross_income = net_profit - self_employment_tax * 0.5;
    let deduction = match deduction_type {
        DeductionType::Standard => tables.standard_deduction(filing_status),
        DeductionType::Itemized => itemized_deductions.max(0.0),
    };
    let taxable_income = (adjusted_gross_income - deduction).max(0.0);
    let tax = bracket_tax(taxable_income, tables.brackets(filing_status).brackets());

    FederalDetail {
        adjusted_gross_income,
        deduction_type,
        deduction,
        taxable_income,
        tax,
    }
}

/// Federal income tax owed; see [`federal_detail`].
pub fn federal_income_tax(
    net_profit: f64,
    self_employment_tax: f64,
    filing_status: FilingStatus,
    deduction_type: DeductionType,
    itemized_deductions: f64,
    tables: &TaxTables,
) -> f64 {
    federal_detail(
        net_profit,
        self_employment_tax,
        filing_status,
        deduction_type,
        itemized_deductions,
        tables,
    )
    .tax
}
