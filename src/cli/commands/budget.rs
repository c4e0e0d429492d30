use outlay_core::{budget_status, spend_by_category, threshold_alerts, BudgetForm};
use outlay_domain::{BudgetStatus, Category, DateWindow};

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::render::budget_line;
use crate::cli::{io, output};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budgets",
            "Show this month's budgets against spending",
            "budgets",
            cmd_list,
        ),
        CommandEntry::new(
            "set-budget",
            "Create or replace a category budget",
            "set-budget <category> <amount>",
            cmd_set,
        ),
        CommandEntry::new(
            "delete-budget",
            "Remove a category budget",
            "delete-budget <category>",
            cmd_delete,
        ),
        CommandEntry::new(
            "alerts",
            "List budgets at or above a usage threshold",
            "alerts [threshold-percent]",
            cmd_alerts,
        ),
    ]
}

/// Budget statuses for the month containing today.
pub(crate) fn month_statuses(context: &ShellContext) -> Result<Vec<BudgetStatus>, CommandError> {
    let snapshot = context.store.snapshot();
    let window = DateWindow::month_containing(context.today());
    let spend = spend_by_category(&snapshot.expenses, window);
    Ok(budget_status(&snapshot.budgets, &spend)?)
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let statuses = month_statuses(context)?;
    if statuses.is_empty() {
        io::print_info("No budgets set. Use `set-budget <category> <amount>`.");
        return Ok(());
    }
    output::section(format!(
        "Budgets for {}",
        context.today().format("%B %Y")
    ));
    for status in &statuses {
        io::print_info(budget_line(status, &context.currency));
    }
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [category, amount] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: set-budget <category> <amount>".into(),
        ));
    };
    let budget = BudgetForm::new(category, amount).validate()?;
    let (category, amount) = (budget.category, budget.amount);
    context.store.upsert_budget(budget)?;
    io::print_success(format!(
        "Budget for {} set to {}.",
        category.label(),
        context.money(amount)
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: delete-budget <category>".into(),
        ));
    };
    let category: Category = raw
        .parse()
        .map_err(|err: outlay_domain::UnknownCategory| {
            CommandError::InvalidArguments(err.to_string())
        })?;
    if !context.confirm(&format!("Delete the {} budget?", category.label()))? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    context.store.delete_budget(category)?;
    io::print_success(format!("Deleted budget for {}.", category.label()));
    Ok(())
}

fn cmd_alerts(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let threshold = match args.first() {
        Some(raw) => raw.trim_end_matches('%').parse::<i64>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid threshold `{}`", raw))
        })?,
        None => context.config.alert_threshold,
    };
    let alerts = threshold_alerts(&month_statuses(context)?, threshold);
    if alerts.is_empty() {
        io::print_info(format!("No budgets at or above {}%.", threshold));
        return Ok(());
    }
    output::section(format!("Budget alerts (>= {}%)", threshold));
    for status in &alerts {
        io::print_warning(alert_message(status, context));
    }
    Ok(())
}

pub(crate) fn alert_message(status: &BudgetStatus, context: &ShellContext) -> String {
    if status.is_over_budget() {
        format!(
            "{} is over budget: {}% used ({} of {})",
            status.category.label(),
            status.percent_used,
            context.money(status.spent_amount),
            context.money(status.budget_amount)
        )
    } else {
        format!(
            "{} budget at {}% ({} of {})",
            status.category.label(),
            status.percent_used,
            context.money(status.spent_amount),
            context.money(status.budget_amount)
        )
    }
}
