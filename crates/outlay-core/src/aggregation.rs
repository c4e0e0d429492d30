//! Pure aggregation over expense and budget snapshots.
//!
//! Nothing here performs I/O or mutates its inputs; the same inputs always
//! produce structurally equal outputs.

use std::{
    cmp::Reverse,
    collections::{btree_map, BTreeMap},
};

use chrono::{Duration, NaiveDate};
use outlay_domain::{Budget, BudgetStatus, Category, DateWindow, Expense};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Alert threshold used by the dashboard when none is configured.
pub const DEFAULT_ALERT_THRESHOLD: i64 = 80;

/// Summed spend per category. Categories without spend are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SpendByCategory(BTreeMap<Category, f64>);

impl SpendByCategory {
    /// Spend for a category, zero when absent.
    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in registry order.
    pub fn iter(&self) -> btree_map::Iter<'_, Category, f64> {
        self.0.iter()
    }
}

impl FromIterator<(Category, f64)> for SpendByCategory {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        let mut totals = BTreeMap::new();
        for (category, amount) in iter {
            *totals.entry(category).or_insert(0.0) += amount;
        }
        Self(totals)
    }
}

/// Sums expenses dated inside `window` (bounds included) per category.
pub fn spend_by_category(expenses: &[Expense], window: DateWindow) -> SpendByCategory {
    expenses
        .iter()
        .filter(|expense| window.contains(expense.date))
        .map(|expense| (expense.category, expense.amount))
        .collect()
}

/// Measures every budget against `spend`, preserving budget order.
///
/// Fails with [`CoreError::InvalidBudget`] on the first budget whose amount is
/// not a positive finite number.
pub fn budget_status(
    budgets: &[Budget],
    spend: &SpendByCategory,
) -> Result<Vec<BudgetStatus>, CoreError> {
    budgets
        .iter()
        .map(|budget| {
            if !budget.amount.is_finite() || budget.amount <= 0.0 {
                return Err(CoreError::InvalidBudget {
                    category: budget.category,
                    amount: budget.amount,
                });
            }
            let spent = spend.get(budget.category);
            Ok(BudgetStatus {
                category: budget.category,
                budget_amount: budget.amount,
                spent_amount: spent,
                remaining_amount: budget.amount - spent,
                percent_used: (100.0 * spent / budget.amount).round() as i64,
            })
        })
        .collect()
}

/// Statuses at or above `threshold` percent, in input order.
pub fn threshold_alerts(statuses: &[BudgetStatus], threshold: i64) -> Vec<BudgetStatus> {
    statuses
        .iter()
        .filter(|status| status.percent_used >= threshold)
        .cloned()
        .collect()
}

/// Total spend for one calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Dense per-day totals, oldest first. Produced lazily by [`daily_series`].
#[derive(Debug, Clone)]
pub struct DailySeries<'a> {
    expenses: &'a [Expense],
    next: NaiveDate,
    remaining: u32,
}

impl Iterator for DailySeries<'_> {
    type Item = DailyTotal;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let date = self.next;
        let total = self
            .expenses
            .iter()
            .filter(|expense| expense.date == date)
            .map(|expense| expense.amount)
            .sum();
        self.remaining -= 1;
        self.next = date + Duration::days(1);
        Some(DailyTotal { date, total })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for DailySeries<'_> {}

/// `days` consecutive daily totals ending at `anchor` inclusive.
pub fn daily_series(expenses: &[Expense], days: u32, anchor: NaiveDate) -> DailySeries<'_> {
    let start = anchor - Duration::days(days.saturating_sub(1) as i64);
    DailySeries {
        expenses,
        next: start,
        remaining: days,
    }
}

/// Sum of all amounts, optionally restricted to a window.
pub fn total_spent(expenses: &[Expense], window: Option<DateWindow>) -> f64 {
    expenses
        .iter()
        .filter(|expense| window.map_or(true, |window| window.contains(expense.date)))
        .map(|expense| expense.amount)
        .sum()
}

/// Average spend per elapsed day; zero days count as one.
pub fn average_daily(total: f64, days_elapsed: u32) -> f64 {
    total / days_elapsed.max(1) as f64
}

/// The `limit` most recent expenses, newest date first. Ties keep input order.
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by_key(|expense| Reverse(expense.date));
    sorted.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, category: Category, on: NaiveDate) -> Expense {
        Expense::new("item", amount, category, on)
    }

    fn march_2024() -> DateWindow {
        DateWindow::month_containing(date(2024, 3, 10))
    }

    #[test]
    fn march_food_example_flows_through_every_stage() {
        let expenses = vec![
            expense(50.0, Category::Food, date(2024, 3, 1)),
            expense(30.0, Category::Food, date(2024, 3, 15)),
        ];
        let budgets = vec![Budget::new(Category::Food, 100.0)];

        let spend = spend_by_category(&expenses, march_2024());
        assert_eq!(spend.len(), 1);
        assert_eq!(spend.get(Category::Food), 80.0);

        let statuses = budget_status(&budgets, &spend).unwrap();
        assert_eq!(
            statuses,
            vec![BudgetStatus {
                category: Category::Food,
                budget_amount: 100.0,
                spent_amount: 80.0,
                remaining_amount: 20.0,
                percent_used: 80,
            }]
        );

        let alerts = threshold_alerts(&statuses, DEFAULT_ALERT_THRESHOLD);
        assert_eq!(alerts, statuses);
    }

    #[test]
    fn spend_excludes_out_of_window_and_empty_categories() {
        let expenses = vec![
            expense(10.0, Category::Food, date(2024, 2, 29)),
            expense(20.0, Category::Travel, date(2024, 3, 31)),
            expense(5.0, Category::Food, date(2024, 4, 1)),
            expense(7.5, Category::Housing, date(2024, 3, 1)),
        ];
        let spend = spend_by_category(&expenses, march_2024());
        assert!(!spend.contains(Category::Food));
        assert_eq!(spend.get(Category::Food), 0.0);
        assert_eq!(spend.get(Category::Travel), 20.0);
        assert_eq!(spend.get(Category::Housing), 7.5);
        assert_eq!(spend.total(), total_spent(&expenses, Some(march_2024())));
        let order: Vec<_> = spend.iter().map(|(category, _)| *category).collect();
        assert_eq!(order, vec![Category::Housing, Category::Travel]);
    }

    #[test]
    fn spend_total_matches_in_window_sum() {
        let expenses: Vec<_> = (0..40u32)
            .map(|i| {
                let category = Category::ALL[(i % 10) as usize];
                expense(1.25 * (i + 1) as f64, category, date(2024, 2, 20) + Duration::days(i as i64))
            })
            .collect();
        let window = march_2024();
        let spend = spend_by_category(&expenses, window);
        let expected: f64 = expenses
            .iter()
            .filter(|e| window.contains(e.date))
            .map(|e| e.amount)
            .sum();
        assert!((spend.total() - expected).abs() < 1e-9);
        assert!(spend.iter().all(|(_, amount)| *amount > 0.0));
    }

    #[test]
    fn status_preserves_budget_order_and_defaults_missing_spend() {
        let budgets = vec![
            Budget::new(Category::Travel, 200.0),
            Budget::new(Category::Food, 100.0),
            Budget::new(Category::Education, 50.0),
        ];
        let spend: SpendByCategory = vec![(Category::Food, 150.0)].into_iter().collect();
        let statuses = budget_status(&budgets, &spend).unwrap();
        assert_eq!(statuses.len(), budgets.len());
        let order: Vec<_> = statuses.iter().map(|s| s.category).collect();
        assert_eq!(order, vec![Category::Travel, Category::Food, Category::Education]);
        assert_eq!(statuses[0].spent_amount, 0.0);
        assert_eq!(statuses[0].percent_used, 0);
        assert_eq!(statuses[1].percent_used, 150);
        assert_eq!(statuses[1].remaining_amount, -50.0);
    }

    #[test]
    fn zero_budget_is_rejected() {
        let budgets = vec![Budget::new(Category::Food, 0.0)];
        let err = budget_status(&budgets, &SpendByCategory::default()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidBudget {
                category: Category::Food,
                ..
            }
        ));

        let negative = vec![Budget::new(Category::Food, -5.0)];
        assert!(budget_status(&negative, &SpendByCategory::default()).is_err());
        let nan = vec![Budget::new(Category::Food, f64::NAN)];
        assert!(budget_status(&nan, &SpendByCategory::default()).is_err());
    }

    #[test]
    fn percent_used_rounds_half_away_from_zero() {
        let budgets = vec![Budget::new(Category::Food, 300.0)];
        let spend: SpendByCategory = vec![(Category::Food, 100.0)].into_iter().collect();
        assert_eq!(budget_status(&budgets, &spend).unwrap()[0].percent_used, 33);
        let spend: SpendByCategory = vec![(Category::Food, 1.5)].into_iter().collect();
        let budgets = vec![Budget::new(Category::Food, 200.0)];
        assert_eq!(budget_status(&budgets, &spend).unwrap()[0].percent_used, 1);
    }

    #[test]
    fn alerts_filter_inclusively_and_keep_order() {
        let budgets = vec![
            Budget::new(Category::Food, 100.0),
            Budget::new(Category::Travel, 100.0),
            Budget::new(Category::Housing, 100.0),
        ];
        let spend: SpendByCategory = vec![
            (Category::Food, 79.0),
            (Category::Travel, 120.0),
            (Category::Housing, 80.0),
        ]
        .into_iter()
        .collect();
        let statuses = budget_status(&budgets, &spend).unwrap();
        let alerts = threshold_alerts(&statuses, 80);
        let order: Vec<_> = alerts.iter().map(|s| s.category).collect();
        assert_eq!(order, vec![Category::Travel, Category::Housing]);
    }

    #[test]
    fn daily_series_is_dense_and_oldest_first() {
        let d1 = date(2024, 3, 1);
        let d2 = date(2024, 3, 2);
        let d3 = date(2024, 3, 3);
        let expenses = vec![expense(10.0, Category::Food, d2)];
        let series: Vec<_> = daily_series(&expenses, 3, d3).collect();
        assert_eq!(
            series,
            vec![
                DailyTotal { date: d1, total: 0.0 },
                DailyTotal { date: d2, total: 10.0 },
                DailyTotal { date: d3, total: 0.0 },
            ]
        );
    }

    #[test]
    fn daily_series_reports_exact_length() {
        let series = daily_series(&[], 7, date(2024, 3, 7));
        assert_eq!(series.len(), 7);
        assert_eq!(daily_series(&[], 0, date(2024, 3, 7)).count(), 0);
        let first = daily_series(&[], 7, date(2024, 3, 7)).next().unwrap();
        assert_eq!(first.date, date(2024, 3, 1));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let expenses = vec![
            expense(12.0, Category::Food, date(2024, 3, 4)),
            expense(8.0, Category::Shopping, date(2024, 3, 9)),
        ];
        let before = expenses.clone();
        let budgets = vec![Budget::new(Category::Food, 40.0)];
        let first = spend_by_category(&expenses, march_2024());
        let second = spend_by_category(&expenses, march_2024());
        assert_eq!(first, second);
        assert_eq!(
            budget_status(&budgets, &first).unwrap(),
            budget_status(&budgets, &second).unwrap()
        );
        let a: Vec<_> = daily_series(&expenses, 10, date(2024, 3, 10)).collect();
        let b: Vec<_> = daily_series(&expenses, 10, date(2024, 3, 10)).collect();
        assert_eq!(a, b);
        assert_eq!(expenses, before);
    }

    #[test]
    fn recent_expenses_sorts_newest_first() {
        let expenses = vec![
            expense(1.0, Category::Food, date(2024, 3, 1)),
            expense(2.0, Category::Food, date(2024, 3, 5)),
            expense(3.0, Category::Food, date(2024, 3, 3)),
        ];
        let recent = recent_expenses(&expenses, 2);
        let amounts: Vec<_> = recent.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0]);
    }

    #[test]
    fn average_daily_never_divides_by_zero() {
        assert_eq!(average_daily(90.0, 0), 90.0);
        assert_eq!(average_daily(90.0, 3), 30.0);
    }
}
