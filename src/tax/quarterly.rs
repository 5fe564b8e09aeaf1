//! Quarterly estimated-payment schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const PERIODS: [(&str, u32, u32, i32); 4] = [
    ("Q1 (Jan 1 - Mar 31)", 4, 15, 0),
    ("Q2 (Apr 1 - May 31)", 6, 15, 0),
    ("Q3 (Jun 1 - Aug 31)", 9, 15, 0),
    ("Q4 (Sep 1 - Dec 31)", 1, 15, 1),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyPayment {
    pub quarter: u8,
    pub period: String,
    pub due: NaiveDate,
    pub amount: f64,
}

/// Four equal installments of an annual estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlySchedule {
    pub tax_year: i32,
    pub payments: Vec<QuarterlyPayment>,
}

impl QuarterlySchedule {
    pub fn new(tax_year: i32, annual_total: f64) -> Self {
        let amount = annual_total.max(0.0) / 4.0;
        let payments = PERIODS
            .iter()
            .zip(1u8..)
            .filter_map(|(&(period, month, day, year_offset), quarter)| {
                let year = tax_year.checked_add(year_offset)?;
                NaiveDate::from_ymd_opt(year, month, day).map(|due| QuarterlyPayment {
                    quarter,
                    period: period.to_string(),
                    due,
                    amount,
                })
            })
            .collect();
        Self { tax_year, payments }
    }

    /// First installment due on or after `today`, if any remains.
    pub fn next_due(&self, today: NaiveDate) -> Option<&QuarterlyPayment> {
        self.payments.iter().find(|payment| payment.due >= today)
    }

    pub fn total(&self) -> f64 {
        self.payments.iter().map(|payment| payment.amount).sum()
    }
}
