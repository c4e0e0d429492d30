//! Plain-text tables and progress bars for the shell.

use colored::Colorize;
use outlay_core::{CurrencyFormat, DailyTotal};
use outlay_domain::{BudgetLevel, BudgetStatus, Expense};

pub const BAR_CELLS: usize = 20;

#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

/// Column-aligned table rendered to lines of text.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        let header = self
            .columns
            .iter()
            .map(|col| format!("{:width$} ", col.header, width = col.width))
            .collect::<String>();
        lines.push(header.trim_end().to_string());
        let total_width = self.columns.iter().map(|col| col.width + 1).sum::<usize>();
        lines.push("-".repeat(total_width.saturating_sub(1).max(1)));

        for row in &self.rows {
            let line = self
                .columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let cell = row.get(idx).map(String::as_str).unwrap_or("");
                    format!("{:width$}", cell, width = column.width)
                })
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(line.trim_end().to_string());
        }
        lines
    }
}

/// Bar of `cells` characters filled to `width_percent` (already clamped).
pub fn bar(width_percent: u8, cells: usize) -> String {
    let filled = (usize::from(width_percent.min(100)) * cells + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(cells - filled))
}

fn tint(text: String, level: BudgetLevel) -> String {
    match level {
        BudgetLevel::Healthy => text.green().to_string(),
        BudgetLevel::Warning => text.yellow().to_string(),
        BudgetLevel::Over => text.red().to_string(),
    }
}

/// One budget line: the bar uses the clamped width, the text the raw percent.
pub fn budget_line(status: &BudgetStatus, currency: &CurrencyFormat) -> String {
    let level = status.level();
    let mut line = format!(
        "{:<15} {} {:>4}%  {} of {}",
        status.category.label(),
        tint(bar(status.bar_width_percent(), BAR_CELLS), level),
        status.percent_used,
        currency.format(status.spent_amount),
        currency.format(status.budget_amount),
    );
    if status.is_over_budget() {
        line.push_str(&format!(
            "  (over by {})",
            currency.format(-status.remaining_amount)
        ));
    } else {
        line.push_str(&format!(
            "  ({} left)",
            currency.format(status.remaining_amount)
        ));
    }
    line
}

/// Daily totals as bars scaled against the largest day.
pub fn daily_lines(series: &[DailyTotal], currency: &CurrencyFormat) -> Vec<String> {
    let peak = series.iter().map(|day| day.total).fold(0.0_f64, f64::max);
    series
        .iter()
        .map(|day| {
            let width = if peak > 0.0 {
                (day.total / peak * 100.0).round() as u8
            } else {
                0
            };
            format!(
                "{} {} {}",
                day.date.format("%a %m-%d"),
                bar(width, BAR_CELLS),
                currency.format(day.total)
            )
        })
        .collect()
}

pub fn short_id(expense: &Expense) -> String {
    let mut short = expense.id.to_string();
    short.truncate(8);
    short
}

pub fn expense_table(expenses: &[Expense], currency: &CurrencyFormat) -> Table {
    let mut table = Table::new(vec![
        TableColumn::new("ID", 8),
        TableColumn::new("Date", 10),
        TableColumn::new("Category", 14),
        TableColumn::new("Amount", 12),
        TableColumn::new("Description", 30),
    ]);
    for expense in expenses {
        table.add_row(vec![
            short_id(expense),
            expense.date.to_string(),
            expense.category.label(),
            currency.format(expense.amount),
            expense.description.clone(),
        ]);
    }
    table
}
