//! Versioned tax reference data: self-employment constants, federal bracket
//! schedules, standard deductions and flat state rates.
//!
//! A [`TaxTables`] value describes one tax year. Moving to another year means
//! loading another table (see [`TaxTables::from_json`]); the calculators do
//! not change.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{errors::LedgerError, profile::FilingStatus};

static TAX_YEAR_2024: Lazy<TaxTables> = Lazy::new(build_tax_year_2024);

/// One slice of a progressive schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TaxBracket {
    pub rate: f64,
    pub lower: f64,
    /// `None` marks the open-ended top bracket.
    pub upper: Option<f64>,
}

impl TaxBracket {
    /// Upper bound as a number, `f64::INFINITY` for the top bracket.
    pub fn upper_bound(&self) -> f64 {
        self.upper.unwrap_or(f64::INFINITY)
    }
}

/// Ordered, contiguous brackets covering `[0, ∞)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketSchedule(Vec<TaxBracket>);

impl BracketSchedule {
    /// Validates and wraps `brackets`.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, LedgerError> {
        let first = brackets
            .first()
            .ok_or_else(|| LedgerError::InvalidTable("bracket schedule is empty".into()))?;
        if first.lower != 0.0 {
            return Err(LedgerError::InvalidTable(format!(
                "first bracket starts at {} instead of 0",
                first.lower
            )));
        }
        let last_index = brackets.len() - 1;
        for (index, bracket) in brackets.iter().enumerate() {
            if !(0.0..=1.0).contains(&bracket.rate) {
                return Err(LedgerError::InvalidTable(format!(
                    "bracket {index} has rate {} outside [0, 1]",
                    bracket.rate
                )));
            }
            match (bracket.upper, index == last_index) {
                (None, true) => {}
                (None, false) => {
                    return Err(LedgerError::InvalidTable(format!(
                        "bracket {index} is unbounded but is not the last one"
                    )))
                }
                (Some(_), true) => {
                    return Err(LedgerError::InvalidTable(
                        "top bracket must be unbounded".into(),
                    ))
                }
                (Some(upper), false) => {
                    if upper <= bracket.lower {
                        return Err(LedgerError::InvalidTable(format!(
                            "bracket {index} is empty or inverted ({} .. {upper})",
                            bracket.lower
                        )));
                    }
                    if brackets[index + 1].lower != upper {
                        return Err(LedgerError::InvalidTable(format!(
                            "gap or overlap between bracket {index} and {}",
                            index + 1
                        )));
                    }
                }
            }
        }
        Ok(Self(brackets))
    }

    /// Builds a schedule from `(rate, upper)` steps followed by the top rate.
    /// Lower bounds are chained from the previous upper bound, so the result
    /// is contiguous by construction.
    fn from_steps(steps: &[(f64, f64)], top_rate: f64) -> Self {
        let mut brackets = Vec::with_capacity(steps.len() + 1);
        let mut lower = 0.0;
        for &(rate, upper) in steps {
            brackets.push(TaxBracket {
                rate,
                lower,
                upper: Some(upper),
            });
            lower = upper;
        }
        brackets.push(TaxBracket {
            rate: top_rate,
            lower,
            upper: None,
        });
        Self(brackets)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.0
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketSchedule {
    type Error = LedgerError;

    fn try_from(value: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BracketSchedule> for Vec<TaxBracket> {
    fn from(value: BracketSchedule) -> Self {
        value.0
    }
}

/// Constants of the self-employment tax.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SelfEmploymentRates {
    /// Share of net profit counted as net earnings (92.35%).
    pub net_earnings_factor: f64,
    pub social_security_wage_base: f64,
    pub social_security_rate: f64,
    pub medicare_rate: f64,
}

impl SelfEmploymentRates {
    /// Rates and the net-earnings factor lie in `[0, 1]`; the wage base is
    /// finite and not negative.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let fractions = [
            ("net earnings factor", self.net_earnings_factor),
            ("social security rate", self.social_security_rate),
            ("medicare rate", self.medicare_rate),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(LedgerError::InvalidTable(format!(
                    "self-employment {name} {value} outside [0, 1]"
                )));
            }
        }
        if !self.social_security_wage_base.is_finite() || self.social_security_wage_base < 0.0 {
            return Err(LedgerError::InvalidTable(format!(
                "social security wage base {} is negative or not finite",
                self.social_security_wage_base
            )));
        }
        Ok(())
    }
}

/// A value per filing status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ByFilingStatus<T> {
    pub single: T,
    pub married_filing_jointly: T,
    pub head_of_household: T,
}

impl<T> ByFilingStatus<T> {
    pub fn get(&self, status: FilingStatus) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StateRate {
    pub name: String,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxTables {
    pub year: i32,
    pub self_employment: SelfEmploymentRates,
    pub federal_brackets: ByFilingStatus<BracketSchedule>,
    pub standard_deductions: ByFilingStatus<f64>,
    /// Keyed by upper-case postal code.
    pub states: BTreeMap<String, StateRate>,
}

impl TaxTables {
    /// Built-in tables for tax year 2024.
    pub fn tax_year_2024() -> &'static TaxTables {
        &TAX_YEAR_2024
    }

    /// Parses and validates a table set. Bracket schedules are checked for
    /// contiguity while decoding; self-employment constants, standard
    /// deductions and state rates afterwards.
    pub fn from_json(raw: &str) -> Result<Self, LedgerError> {
        let mut tables: TaxTables = serde_json::from_str(raw)?;
        tables.self_employment.validate()?;
        for status in FilingStatus::ALL {
            let deduction = tables.standard_deduction(status);
            if !deduction.is_finite() || deduction < 0.0 {
                return Err(LedgerError::InvalidTable(format!(
                    "standard deduction {deduction} for {status} is negative or not finite"
                )));
            }
        }
        let mut normalised = BTreeMap::new();
        for (code, state) in tables.states {
            if !(0.0..=1.0).contains(&state.rate) {
                return Err(LedgerError::InvalidTable(format!(
                    "state {code} has rate {} outside [0, 1]",
                    state.rate
                )));
            }
            normalised.insert(normalise_state_code(&code), state);
        }
        tables.states = normalised;
        Ok(tables)
    }

    pub fn brackets(&self, status: FilingStatus) -> &BracketSchedule {
        self.federal_brackets.get(status)
    }

    pub fn standard_deduction(&self, status: FilingStatus) -> f64 {
        *self.standard_deductions.get(status)
    }

    pub fn state(&self, code: &str) -> Option<&StateRate> {
        self.states.get(&normalise_state_code(code))
    }

    /// Flat rate for `code`, 0 when the code is empty or unknown.
    pub fn state_rate(&self, code: &str) -> f64 {
        self.state(code).map_or(0.0, |state| state.rate)
    }
}

pub(crate) fn normalise_state_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

fn build_tax_year_2024() -> TaxTables {
    TaxTables {
        year: 2024,
        self_employment: SelfEmploymentRates {
            net_earnings_factor: 0.9235,
            social_security_wage_base: 176_000.0,
            social_security_rate: 0.124,
            medicare_rate: 0.029,
        },
        federal_brackets: ByFilingStatus {
            single: BracketSchedule::from_steps(
                &[
                    (0.10, 11_600.0),
                    (0.12, 47_150.0),
                    (0.22, 100_525.0),
                    (0.24, 191_950.0),
                    (0.32, 243_725.0),
                    (0.35, 609_350.0),
                ],
                0.37,
            ),
            married_filing_jointly: BracketSchedule::from_steps(
                &[
                    (0.10, 23_200.0),
                    (0.12, 94_300.0),
                    (0.22, 201_050.0),
                    (0.24, 383_900.0),
                    (0.32, 487_450.0),
                    (0.35, 731_200.0),
                ],
                0.37,
            ),
            head_of_household: BracketSchedule::from_steps(
                &[
                    (0.10, 16_550.0),
                    (0.12, 63_100.0),
                    (0.22, 100_500.0),
                    (0.24, 191_950.0),
                    (0.32, 243_700.0),
                    (0.35, 609_350.0),
                ],
                0.37,
            ),
        },
        standard_deductions: ByFilingStatus {
            single: 14_600.0,
            married_filing_jointly: 29_200.0,
            head_of_household: 21_900.0,
        },
        states: STATE_RATES_2024
            .iter()
            .map(|(code, name, rate)| {
                (
                    (*code).to_string(),
                    StateRate {
                        name: (*name).to_string(),
                        rate: *rate,
                    },
                )
            })
            .collect(),
    }
}

/// Simplified flat (or average) state income tax rates.
const STATE_RATES_2024: &[(&str, &str, f64)] = &[
    ("AL", "Alabama", 0.05),
    ("AK", "Alaska", 0.0),
    ("AZ", "Arizona", 0.025),
    ("AR", "Arkansas", 0.044),
    ("CA", "California", 0.093),
    ("CO", "Colorado", 0.044),
    ("CT", "Connecticut", 0.055),
    ("DE", "Delaware", 0.066),
    ("FL", "Florida", 0.0),
    ("GA", "Georgia", 0.0549),
    ("HI", "Hawaii", 0.0825),
    ("ID", "Idaho", 0.058),
    ("IL", "Illinois", 0.0495),
    ("IN", "Indiana", 0.0305),
    ("IA", "Iowa", 0.057),
    ("KS", "Kansas", 0.057),
    ("KY", "Kentucky", 0.045),
    ("LA", "Louisiana", 0.0425),
    ("ME", "Maine", 0.0715),
    ("MD", "Maryland", 0.0575),
    ("MA", "Massachusetts", 0.05),
    ("MI", "Michigan", 0.0425),
    ("MN", "Minnesota", 0.0785),
    ("MS", "Mississippi", 0.05),
    ("MO", "Missouri", 0.0495),
    ("MT", "Montana", 0.059),
    ("NE", "Nebraska", 0.0627),
    ("NV", "Nevada", 0.0),
    ("NH", "New Hampshire", 0.04),
    ("NJ", "New Jersey", 0.0637),
    ("NM", "New Mexico", 0.059),
    ("NY", "New York", 0.0685),
    ("NC", "North Carolina", 0.045),
    ("ND", "North Dakota", 0.025),
    ("OH", "Ohio", 0.035),
    ("OK", "Oklahoma", 0.0475),
    ("OR", "Oregon", 0.099),
    ("PA", "Pennsylvania", 0.0307),
    ("RI", "Rhode Island", 0.0599),
    ("SC", "South Carolina", 0.064),
    ("SD", "South Dakota", 0.0),
    ("TN", "Tennessee", 0.0),
    ("TX", "Texas", 0.0),
    ("UT", "Utah", 0.0465),
    ("VT", "Vermont", 0.0875),
    ("VA", "Virginia", 0.0575),
    ("WA", "Washington", 0.0),
    ("WV", "West Virginia", 0.0512),
    ("WI", "Wisconsin", 0.0765),
    ("WY", "Wyoming", 0.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn bracket(rate: f64, lower: f64, upper: Option<f64>) -> TaxBracket {
        TaxBracket { rate, lower, upper }
    }

    #[test]
    fn built_in_schedules_are_valid() {
        let tables = TaxTables::tax_year_2024();
        for status in FilingStatus::ALL {
            let schedule = tables.brackets(status);
            assert!(BracketSchedule::new(schedule.brackets().to_vec()).is_ok());
            assert_eq!(schedule.brackets().len(), 7);
        }
        assert_eq!(tables.states.len(), 50);
    }

    #[test]
    fn schedule_rejects_gaps_and_bounded_top() {
        let gap = vec![
            bracket(0.1, 0.0, Some(100.0)),
            bracket(0.2, 150.0, None),
        ];
        assert!(matches!(
            BracketSchedule::new(gap),
            Err(LedgerError::InvalidTable(_))
        ));

        let bounded_top = vec![bracket(0.1, 0.0, Some(100.0))];
        assert!(BracketSchedule::new(bounded_top).is_err());

        let offset_start = vec![bracket(0.1, 10.0, None)];
        assert!(BracketSchedule::new(offset_start).is_err());

        assert!(BracketSchedule::new(Vec::new()).is_err());
    }

    #[test]
    fn state_lookup_normalises_codes() {
        let tables = TaxTables::tax_year_2024();
        assert_eq!(tables.state_rate(" ca "), 0.093);
        assert_eq!(tables.state("ny").map(|s| s.name.as_str()), Some("New York"));
        assert_eq!(tables.state_rate(""), 0.0);
        assert_eq!(tables.state_rate("ZZ"), 0.0);
    }

    #[test]
    fn tables_round_trip_through_json() {
        let tables = TaxTables::tax_year_2024();
        let json = serde_json::to_string(tables).unwrap();
        let parsed = TaxTables::from_json(&json).unwrap();
        assert_eq!(&parsed, tables);
    }

    #[test]
    fn from_json_rejects_invalid_schedules() {
        let mut value = serde_json::to_value(TaxTables::tax_year_2024()).unwrap();
        value["federalBrackets"]["single"][1]["lower"] = serde_json::json!(12_000.0);
        let err = TaxTables::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("gap or overlap"), "unexpected error: {err}");

        let mut value = serde_json::to_value(TaxTables::tax_year_2024()).unwrap();
        value["selfEmployment"]["social_security_rate"] = serde_json::json!(5.0);
        let err = TaxTables::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("social security rate"), "unexpected error: {err}");

        let mut value = serde_json::to_value(TaxTables::tax_year_2024()).unwrap();
        value["selfEmployment"]["net_earnings_factor"] = serde_json::json!(1.5);
        assert!(matches!(
            TaxTables::from_json(&value.to_string()),
            Err(LedgerError::InvalidTable(_))
        ));

        let mut value = serde_json::to_value(TaxTables::tax_year_2024()).unwrap();
        value["selfEmployment"]["social_security_wage_base"] = serde_json::json!(-1.0);
        let err = TaxTables::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("wage base"), "unexpected error: {err}");

        let mut value = serde_json::to_value(TaxTables::tax_year_2024()).unwrap();
        value["standardDeductions"]["single"] = serde_json::json!(-50_000.0);
        let err = TaxTables::from_json(&value.to_string()).unwrap_err();
        assert!(err.to_string().contains("standard deduction"), "unexpected error: {err}");
    }
}
