//! Monthly category budgets and their derived status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Monthly spending limit for one category. The category is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub category: Category,
    pub amount: f64,
}

impl Budget {
    pub fn new(category: Category, amount: f64) -> Self {
        Self { category, amount }
    }
}

/// Spend measured against a budget for one window. Derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub category: Category,
    pub budget_amount: f64,
    pub spent_amount: f64,
    pub remaining_amount: f64,
    /// Rounded percentage; exceeds 100 when over budget.
    pub percent_used: i64,
}

impl BudgetStatus {
    pub fn is_over_budget(&self) -> bool {
        self.remaining_amount < 0.0
    }

    /// Percentage clamped to `0..=100`, for progress-bar widths only.
    pub fn bar_width_percent(&self) -> u8 {
        self.percent_used.clamp(0, 100) as u8
    }

    pub fn level(&self) -> BudgetLevel {
        BudgetLevel::for_percent(self.percent_used)
    }
}

/// Colour band a status falls into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Healthy,
    Warning,
    Over,
}

impl BudgetLevel {
    pub fn for_percent(percent: i64) -> Self {
        if percent > 100 {
            BudgetLevel::Over
        } else if percent > 80 {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Healthy
        }
    }
}

impl fmt::Display for BudgetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetLevel::Healthy => "healthy",
            BudgetLevel::Warning => "warning",
            BudgetLevel::Over => "over",
        };
        f.write_str(label)
    }
}
