use serde::{Deserialize, Serialize};

use crate::profile::SavingsPercentage;

/// How the estimated tax compares to the savings target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// `income × percentage / 100`.
    pub goal: f64,
    /// `estimated_tax / goal`, or 0 without a goal. Not clamped.
    pub progress_ratio: f64,
}

impl SavingsGoal {
    pub fn project(income: f64, percentage: SavingsPercentage, estimated_tax: f64) -> Self {
        let goal = income * percentage.as_fraction();
        let progress_ratio = if goal > 0.0 {
            estimated_tax / goal
        } else {
            0.0
        };
        Self {
            goal,
            progress_ratio,
        }
    }

    /// Raw progress in percent; above 100 means over-saving.
    pub fn progress_percent(&self) -> f64 {
        self.progress_ratio * 100.0
    }

    /// Progress in percent clamped to `[0, 100]` for display.
    pub fn display_percent(&self) -> f64 {
        self.progress_percent().clamp(0.0, 100.0)
    }

    pub fn is_exceeded(&self) -> bool {
        self.progress_ratio > 1.0
    }
}
