//! The user's tax profile: filing status, state, deduction mode and the
//! savings target.
//!
//! Enumerated fields decode leniently. An unknown or missing value resolves
//! to the default rather than failing, so a damaged settings file degrades to
//! a conservative estimate.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tax::tables::normalise_state_code;

/// Filing status selecting the bracket schedule and standard deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedFilingJointly,
    HeadOfHousehold,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 3] = [
        FilingStatus::Single,
        FilingStatus::MarriedFilingJointly,
        FilingStatus::HeadOfHousehold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilingStatus::Single => "single",
            FilingStatus::MarriedFilingJointly => "marriedFilingJointly",
            FilingStatus::HeadOfHousehold => "headOfHousehold",
        }
    }

    /// Parses a stored or user-supplied value. Unknown values map to `Single`.
    pub fn parse_lenient(value: &str) -> Self {
        let folded: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match folded.as_str() {
            "marriedfilingjointly" | "mfj" => FilingStatus::MarriedFilingJointly,
            "headofhousehold" | "hoh" => FilingStatus::HeadOfHousehold,
            _ => FilingStatus::Single,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilingStatus::Single => "Single",
            FilingStatus::MarriedFilingJointly => "Married Filing Jointly",
            FilingStatus::HeadOfHousehold => "Head of Household",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FilingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|v| FilingStatus::parse_lenient(&v))
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeductionType {
    #[default]
    Standard,
    Itemized,
}

impl DeductionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeductionType::Standard => "standard",
            DeductionType::Itemized => "itemized",
        }
    }

    /// Unknown values map to `Standard`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "itemized" => DeductionType::Itemized,
            _ => DeductionType::Standard,
        }
    }
}

impl fmt::Display for DeductionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeductionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|v| DeductionType::parse_lenient(&v))
            .unwrap_or_default())
    }
}

/// Share of income to set aside for taxes, always within 10–50 percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SavingsPercentage(u8);

impl SavingsPercentage {
    pub const MIN: u8 = 10;
    pub const MAX: u8 = 50;
    pub const DEFAULT: u8 = 25;

    /// Clamps `value` into the supported range.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Rounds and clamps a number coming from storage or a slider. Non-finite
    /// input yields the default.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let clamped = value.round().clamp(f64::from(Self::MIN), f64::from(Self::MAX));
        Self(clamped as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for SavingsPercentage {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for SavingsPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for SavingsPercentage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for SavingsPercentage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(value.map(SavingsPercentage::from_f64).unwrap_or_default())
    }
}

/// Everything besides the ledger that the tax estimate depends on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxProfile {
    #[serde(default)]
    pub filing_status: FilingStatus,
    /// Upper-case postal code, empty when no state is selected.
    #[serde(default)]
    pub state_code: String,
    #[serde(default)]
    pub deduction_type: DeductionType,
    /// Total itemized deductions, used only with [`DeductionType::Itemized`].
    #[serde(default)]
    pub itemized_deductions: f64,
    #[serde(default)]
    pub savings_percentage: SavingsPercentage,
}

impl TaxProfile {
    pub fn with_filing_status(mut self, status: FilingStatus) -> Self {
        self.filing_status = status;
        self
    }

    pub fn with_state(mut self, code: &str) -> Self {
        self.set_state(code);
        self
    }

    pub fn with_itemized(mut self, amount: f64) -> Self {
        self.deduction_type = DeductionType::Itemized;
        self.set_itemized_deductions(amount);
        self
    }

    pub fn set_state(&mut self, code: &str) {
        self.state_code = normalise_state_code(code);
    }

    /// Negative or non-finite amounts are stored as 0.
    pub fn set_itemized_deductions(&mut self, amount: f64) {
        self.itemized_deductions = if amount.is_finite() && amount > 0.0 {
            amount
        } else {
            0.0
        };
    }
}
