//! Immutable store snapshots and the commands that derive new ones.

use outlay_domain::{Budget, Category, Expense, ExpenseDraft};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

/// Point-in-time view of both stores, handed to aggregation and rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub budgets: Vec<Budget>,
}

/// A single store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateExpense(Expense),
    UpdateExpense { id: Uuid, draft: ExpenseDraft },
    DeleteExpense(Uuid),
    UpsertBudget(Budget),
    DeleteBudget(Category),
}

impl Command {
    pub fn describe(&self) -> String {
        match self {
            Command::CreateExpense(expense) => format!("create expense {}", expense.id),
            Command::UpdateExpense { id, .. } => format!("update expense {id}"),
            Command::DeleteExpense(id) => format!("delete expense {id}"),
            Command::UpsertBudget(budget) => format!("upsert budget {}", budget.category),
            Command::DeleteBudget(category) => format!("delete budget {category}"),
        }
    }
}

impl Snapshot {
    pub fn new(expenses: Vec<Expense>, budgets: Vec<Budget>) -> Self {
        Self { expenses, budgets }
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn budget(&self, category: Category) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.category == category)
    }

    /// Finds the single expense whose id starts with `prefix`.
    pub fn expense_by_prefix(&self, prefix: &str) -> Option<&Expense> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .expenses
            .iter()
            .filter(|expense| expense.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Some(found),
            _ => None,
        }
    }

    /// Returns the snapshot that results from `command`; `self` is untouched.
    pub fn apply(&self, command: &Command) -> Result<Snapshot, CoreError> {
        let mut next = self.clone();
        match command {
            Command::CreateExpense(expense) => next.expenses.push(expense.clone()),
            Command::UpdateExpense { id, draft } => {
                let expense = next
                    .expenses
                    .iter_mut()
                    .find(|expense| expense.id == *id)
                    .ok_or(CoreError::ExpenseNotFound(*id))?;
                expense.apply_draft(draft.clone());
            }
            Command::DeleteExpense(id) => {
                let index = next
                    .expenses
                    .iter()
                    .position(|expense| expense.id == *id)
                    .ok_or(CoreError::ExpenseNotFound(*id))?;
                next.expenses.remove(index);
            }
            Command::UpsertBudget(budget) => {
                match next
                    .budgets
                    .iter_mut()
                    .find(|existing| existing.category == budget.category)
                {
                    Some(existing) => existing.amount = budget.amount,
                    None => next.budgets.push(budget.clone()),
                }
            }
            Command::DeleteBudget(category) => {
                let index = next
                    .budgets
                    .iter()
                    .position(|budget| budget.category == *category)
                    .ok_or(CoreError::BudgetNotFound(*category))?;
                next.budgets.remove(index);
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn apply_leaves_original_untouched() {
        let original = Snapshot::default();
        let expense = Expense::new("Coffee", 3.5, Category::Food, date(2));
        let next = original
            .apply(&Command::CreateExpense(expense.clone()))
            .unwrap();
        assert!(original.expenses.is_empty());
        assert_eq!(next.expenses, vec![expense]);
    }

    #[test]
    fn update_replaces_fields_but_not_id() {
        let expense = Expense::new("Coffee", 3.5, Category::Food, date(2));
        let snapshot = Snapshot::new(vec![expense.clone()], Vec::new());
        let draft = ExpenseDraft {
            description: "Cinema".into(),
            amount: 12.0,
            category: Category::Entertainment,
            date: date(4),
        };
        let next = snapshot
            .apply(&Command::UpdateExpense {
                id: expense.id,
                draft,
            })
            .unwrap();
        let updated = next.expense(expense.id).unwrap();
        assert_eq!(updated.description, "Cinema");
        assert_eq!(updated.category, Category::Entertainment);
        assert_eq!(snapshot.expenses[0].description, "Coffee");
    }

    #[test]
    fn missing_targets_are_not_found() {
        let snapshot = Snapshot::default();
        let missing = Uuid::new_v4();
        assert!(matches!(
            snapshot.apply(&Command::DeleteExpense(missing)),
            Err(CoreError::ExpenseNotFound(id)) if id == missing
        ));
        assert!(matches!(
            snapshot.apply(&Command::DeleteBudget(Category::Travel)),
            Err(CoreError::BudgetNotFound(Category::Travel))
        ));
    }

    #[test]
    fn upsert_replaces_in_place_and_appends_new() {
        let snapshot = Snapshot::new(
            Vec::new(),
            vec![
                Budget::new(Category::Food, 100.0),
                Budget::new(Category::Travel, 50.0),
            ],
        );
        let next = snapshot
            .apply(&Command::UpsertBudget(Budget::new(Category::Food, 250.0)))
            .unwrap();
        assert_eq!(next.budgets[0], Budget::new(Category::Food, 250.0));
        assert_eq!(next.budgets.len(), 2);

        let next = next
            .apply(&Command::UpsertBudget(Budget::new(Category::Housing, 900.0)))
            .unwrap();
        assert_eq!(next.budgets.last().unwrap().category, Category::Housing);
    }

    #[test]
    fn prefix_lookup_requires_unique_match() {
        let expense = Expense::new("Coffee", 3.5, Category::Food, date(2));
        let snapshot = Snapshot::new(vec![expense.clone()], Vec::new());
        let prefix = &expense.id.to_string()[..8];
        assert_eq!(snapshot.expense_by_prefix(prefix), Some(&expense));
        assert_eq!(snapshot.expense_by_prefix(""), None);
    }
}
