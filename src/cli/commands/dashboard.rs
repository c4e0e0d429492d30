use outlay_core::Dashboard;

use crate::cli::commands::budget::alert_message;
use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::render::{budget_line, daily_lines, expense_table};
use crate::cli::{io, output};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "dashboard",
        "Summarise spending, budgets and alerts",
        "dashboard",
        cmd_dashboard,
    )]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let dashboard = Dashboard::build_with_limit(
        context.store.snapshot(),
        context.today(),
        context.config.alert_threshold,
        context.config.recent_limit,
    )?;

    output::section("Dashboard");
    io::print_info(format!(
        "Total spent:      {}",
        context.money(dashboard.total_spent)
    ));
    io::print_info(format!(
        "This month:       {}",
        context.money(dashboard.month_spent)
    ));
    io::print_info(format!(
        "Last 7 days:      {}",
        context.money(dashboard.last_week_spent)
    ));
    io::print_info(format!(
        "Average per day:  {}",
        context.money(dashboard.average_daily)
    ));

    if !dashboard.alerts.is_empty() {
        output::section("Alerts");
        for view in &dashboard.alerts {
            io::print_warning(alert_message(&view.status, context));
        }
    }

    output::section("Spending by category");
    if dashboard.spend_by_category.is_empty() {
        io::print_info("No spending this month.");
    }
    for (category, amount) in dashboard.spend_by_category.iter() {
        io::print_info(format!("  {:<15} {}", category.label(), context.money(*amount)));
    }

    output::section("Last 7 days");
    for line in daily_lines(&dashboard.daily, &context.currency) {
        io::print_info(line);
    }

    if !dashboard.statuses.is_empty() {
        output::section("Budgets");
        for view in &dashboard.statuses {
            io::print_info(budget_line(&view.status, &context.currency));
        }
    }

    output::section("Recent expenses");
    if dashboard.recent.is_empty() {
        io::print_info("No expenses recorded yet.");
    } else {
        for line in expense_table(&dashboard.recent, &context.currency).lines() {
            io::print_info(line);
        }
    }
    Ok(())
}
