use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::currency::{format_cents, format_date, format_dollars, format_percent};
use crate::ledger::{Ledger, LedgerTotals};
use crate::profile::{DeductionType, TaxProfile};
use crate::tax::{estimate, TaxEstimate, TaxTables};

pub struct SummaryService;

impl SummaryService {
    pub fn totals(ledger: &Ledger) -> LedgerTotals {
        ledger.totals()
    }

    pub fn estimate(ledger: &Ledger, profile: &TaxProfile, tables: &TaxTables) -> TaxEstimate {
        estimate(ledger.transactions(), profile, tables)
    }

    /// Plain-text dashboard of an estimate as of `today`.
    pub fn render(estimate: &TaxEstimate, tables: &TaxTables, today: NaiveDate) -> String {
        let mut out = String::new();
        let totals = &estimate.totals;
        let profile = &estimate.profile;

        let _ = writeln!(out, "Tax year {}", estimate.tax_year);
        let _ = writeln!(out, "Income:     {}", format_dollars(totals.income));
        let _ = writeln!(out, "Expenses:   {}", format_dollars(totals.expenses));
        let _ = writeln!(out, "Net profit: {}", format_dollars(totals.net_profit));
        let _ = writeln!(out);

        let state_label = match tables.state(&profile.state_code) {
            Some(state) => format!("{} ({})", state.name, format_percent(state.rate * 100.0)),
            None => "none".to_string(),
        };
        let _ = writeln!(out, "Filing status: {}", profile.filing_status.label());
        let _ = writeln!(out, "State: {state_label}");
        let deduction_label = match estimate.federal.deduction_type {
            DeductionType::Standard => "Standard deduction",
            DeductionType::Itemized => "Itemized deductions",
        };
        let _ = writeln!(
            out,
            "{deduction_label}: {}",
            format_cents(estimate.federal.deduction)
        );
        let _ = writeln!(
            out,
            "Taxable income: {}",
            format_cents(estimate.federal.taxable_income)
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", estimate.breakdown);
        let _ = writeln!(
            out,
            "Effective rate: {}",
            format_percent(estimate.effective_rate() * 100.0)
        );
        let _ = writeln!(out);

        let savings = &estimate.savings;
        let _ = writeln!(
            out,
            "Savings goal ({}): {}",
            profile.savings_percentage,
            format_dollars(savings.goal)
        );
        let _ = writeln!(
            out,
            "Progress: {}{}",
            format_percent(savings.display_percent()),
            if savings.is_exceeded() { " (goal exceeded)" } else { "" }
        );

        let schedule = estimate.quarterly();
        match schedule.next_due(today) {
            Some(payment) => {
                let _ = write!(
                    out,
                    "Next payment: {} due {}, {}",
                    format_cents(payment.amount),
                    format_date(payment.due),
                    payment.period
                );
            }
            None => {
                let _ = write!(
                    out,
                    "All quarterly payments for {} are past due",
                    schedule.tax_year
                );
            }
        }
        out
    }
}
