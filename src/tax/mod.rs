//! Tax estimation for self-employment income.
//!
//! Ledger totals feed three calculators (self-employment, federal, state);
//! [`estimate::estimate`] composes them together with the savings projection.
//! The calculators are total functions: they never fail and never log.

pub mod estimate;
pub mod federal;
pub mod quarterly;
pub mod savings;
pub mod self_employment;
pub mod state;
pub mod tables;

pub use estimate::{estimate, estimate_from_totals, TaxBreakdown, TaxEstimate};
pub use federal::{bracket_tax, federal_detail, federal_income_tax, FederalDetail};
pub use quarterly::{QuarterlyPayment, QuarterlySchedule};
pub use savings::SavingsGoal;
pub use self_employment::self_employment_tax;
pub use state::state_income_tax;
pub use tables::{BracketSchedule, SelfEmploymentRates, StateRate, TaxBracket, TaxTables};
