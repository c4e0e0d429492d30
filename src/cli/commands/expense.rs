use outlay_core::{recent_expenses, ExpenseForm};

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::cli::render::{expense_table, short_id};
use crate::cli::{io, output};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "expenses",
            "List all expenses, newest first",
            "expenses",
            cmd_list,
        ),
        CommandEntry::new(
            "add-expense",
            "Record a new expense (date defaults to today)",
            "add-expense <description> <amount> <category> [YYYY-MM-DD]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit-expense",
            "Replace every field of an expense",
            "edit-expense <id-prefix> <description> <amount> <category> <YYYY-MM-DD>",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete-expense",
            "Delete an expense",
            "delete-expense <id-prefix>",
            cmd_delete,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let expenses = &context.store.snapshot().expenses;
    if expenses.is_empty() {
        io::print_info("No expenses recorded yet. Use `add-expense` to create one.");
        return Ok(());
    }
    let sorted = recent_expenses(expenses, expenses.len());
    output::section("Expenses");
    for line in expense_table(&sorted, &context.currency).lines() {
        io::print_info(line);
    }
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !(3..=4).contains(&args.len()) {
        return Err(CommandError::InvalidArguments(
            "usage: add-expense <description> <amount> <category> [YYYY-MM-DD]".into(),
        ));
    }
    let today = context.today().format("%Y-%m-%d").to_string();
    let date = args.get(3).copied().unwrap_or(today.as_str());
    let draft = ExpenseForm::new(args[0], args[1], args[2], date).validate()?;
    let expense = context.store.create_expense(draft)?;
    io::print_success(format!(
        "Added expense {}: {} {} ({}) on {}",
        short_id(&expense),
        expense.description,
        context.money(expense.amount),
        expense.category.label(),
        expense.date
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 5 {
        return Err(CommandError::InvalidArguments(
            "usage: edit-expense <id-prefix> <description> <amount> <category> <YYYY-MM-DD>"
                .into(),
        ));
    }
    let existing = context.find_expense(args[0])?;
    let draft = ExpenseForm::new(args[1], args[2], args[3], args[4]).validate()?;
    let expense = context.store.update_expense(existing.id, draft)?;
    io::print_success(format!(
        "Updated expense {}: {} {} ({}) on {}",
        short_id(&expense),
        expense.description,
        context.money(expense.amount),
        expense.category.label(),
        expense.date
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: delete-expense <id-prefix>".into(),
        ));
    };
    let expense = context.find_expense(prefix)?;
    let prompt = format!(
        "Delete `{}` ({})?",
        expense.description,
        context.money(expense.amount)
    );
    if !context.confirm(&prompt)? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }
    context.store.delete_expense(expense.id)?;
    io::print_success(format!("Deleted expense {}.", short_id(&expense)));
    Ok(())
}
