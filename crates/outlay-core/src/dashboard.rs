//! Dashboard summary assembled from a snapshot.

use chrono::{Datelike, NaiveDate};
use outlay_domain::{BudgetLevel, BudgetStatus, DateWindow, Expense};
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::{
        average_daily, budget_status, daily_series, recent_expenses, spend_by_category,
        threshold_alerts, total_spent, DailyTotal, SpendByCategory,
    },
    snapshot::Snapshot,
    CoreError,
};

pub const RECENT_LIMIT: usize = 5;
pub const SERIES_DAYS: u32 = 7;

/// A budget status plus the values a progress bar needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    #[serde(flatten)]
    pub status: BudgetStatus,
    pub bar_width_percent: u8,
    pub is_over_budget: bool,
    pub level: BudgetLevel,
}

impl From<BudgetStatus> for StatusView {
    fn from(status: BudgetStatus) -> Self {
        Self {
            bar_width_percent: status.bar_width_percent(),
            is_over_budget: status.is_over_budget(),
            level: status.level(),
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub today: NaiveDate,
    pub total_spent: f64,
    pub month: DateWindow,
    pub month_spent: f64,
    pub last_week_spent: f64,
    pub average_daily: f64,
    pub spend_by_category: SpendByCategory,
    pub daily: Vec<DailyTotal>,
    pub statuses: Vec<StatusView>,
    pub alerts: Vec<StatusView>,
    pub alert_threshold: i64,
    pub recent: Vec<Expense>,
}

impl Dashboard {
    pub fn build(snapshot: &Snapshot, today: NaiveDate, threshold: i64) -> Result<Self, CoreError> {
        Self::build_with_limit(snapshot, today, threshold, RECENT_LIMIT)
    }

    /// Same as [`Dashboard::build`] with a custom number of recent expenses.
    pub fn build_with_limit(
        snapshot: &Snapshot,
        today: NaiveDate,
        threshold: i64,
        recent_limit: usize,
    ) -> Result<Self, CoreError> {
        let expenses = &snapshot.expenses;
        let month = DateWindow::month_containing(today);
        let week = DateWindow::trailing_days(today, SERIES_DAYS);

        let month_spent = total_spent(expenses, Some(month));
        let spend = spend_by_category(expenses, month);
        let statuses = budget_status(&snapshot.budgets, &spend)?;
        let alerts = threshold_alerts(&statuses, threshold);

        Ok(Self {
            today,
            total_spent: total_spent(expenses, None),
            month,
            month_spent,
            last_week_spent: total_spent(expenses, Some(week)),
            average_daily: average_daily(month_spent, today.day()),
            spend_by_category: spend,
            daily: daily_series(expenses, SERIES_DAYS, today).collect(),
            statuses: statuses.into_iter().map(StatusView::from).collect(),
            alerts: alerts.into_iter().map(StatusView::from).collect(),
            alert_threshold: threshold,
            recent: recent_expenses(expenses, recent_limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outlay_domain::{Budget, Category};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample() -> Snapshot {
        Snapshot::new(
            vec![
                Expense::new("Groceries", 50.0, Category::Food, date(3, 2)),
                Expense::new("Dinner", 30.0, Category::Food, date(3, 9)),
                Expense::new("Bus", 5.0, Category::Transportation, date(3, 10)),
                Expense::new("Rent", 900.0, Category::Housing, date(2, 1)),
            ],
            vec![
                Budget::new(Category::Food, 100.0),
                Budget::new(Category::Transportation, 4.0),
            ],
        )
    }

    #[test]
    fn assembles_every_card() {
        let dashboard = Dashboard::build(&sample(), date(3, 10), 80).unwrap();
        assert_eq!(dashboard.total_spent, 985.0);
        assert_eq!(dashboard.month_spent, 85.0);
        assert_eq!(dashboard.last_week_spent, 35.0);
        assert_eq!(dashboard.average_daily, 8.5);
        assert_eq!(dashboard.spend_by_category.get(Category::Food), 80.0);
        assert!(!dashboard.spend_by_category.contains(Category::Housing));
        assert_eq!(dashboard.daily.len(), 7);
        assert_eq!(dashboard.daily[6].total, 5.0);
        assert_eq!(dashboard.recent.len(), 4);
        assert_eq!(dashboard.recent[0].description, "Bus");
    }

    #[test]
    fn over_budget_keeps_raw_percent_and_clamps_bar() {
        let dashboard = Dashboard::build(&sample(), date(3, 10), 80).unwrap();
        let transport = &dashboard.statuses[1];
        assert_eq!(transport.status.percent_used, 125);
        assert_eq!(transport.bar_width_percent, 100);
        assert!(transport.is_over_budget);
        assert_eq!(transport.level, BudgetLevel::Over);

        let categories: Vec<_> = dashboard.alerts.iter().map(|a| a.status.category).collect();
        assert_eq!(categories, vec![Category::Food, Category::Transportation]);
    }

    #[test]
    fn invalid_budget_fails_the_build() {
        let mut snapshot = sample();
        snapshot.budgets.push(Budget::new(Category::Travel, 0.0));
        assert!(matches!(
            Dashboard::build(&snapshot, date(3, 10), 80),
            Err(CoreError::InvalidBudget { category: Category::Travel, .. })
        ));
    }

    #[test]
    fn status_view_serialises_flat() {
        let dashboard = Dashboard::build(&sample(), date(3, 10), 80).unwrap();
        let json = serde_json::to_value(&dashboard.statuses[0]).unwrap();
        assert_eq!(json["percentUsed"], 80);
        assert_eq!(json["barWidthPercent"], 80);
        assert_eq!(json["level"], "healthy");
    }
}
