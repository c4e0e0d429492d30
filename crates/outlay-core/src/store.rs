//! Client-side holder of one owner's snapshot. The snapshot is swapped only
//! after storage accepts a command.

use std::sync::Arc;

use outlay_domain::{Budget, Category, Expense, ExpenseDraft};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    snapshot::Snapshot,
    storage::{snapshot_warnings, ExpenseStorage},
    CoreError,
};

/// Client-side view of one owner's expenses and budgets.
///
/// Mutations go through storage first. The held snapshot is replaced only
/// when storage accepts the change, so a failed call leaves it as it was.
pub struct ExpenseStore<S: ExpenseStorage + ?Sized> {
    owner: String,
    storage: Arc<S>,
    snapshot: Snapshot,
}

impl<S: ExpenseStorage + ?Sized> ExpenseStore<S> {
    /// Opens the store and loads the owner's current data.
    pub fn open(owner: impl Into<String>, storage: Arc<S>) -> Result<Self, CoreError> {
        let mut store = Self {
            owner: owner.into(),
            storage,
            snapshot: Snapshot::default(),
        };
        store.refresh()?;
        Ok(store)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn refresh(&mut self) -> Result<(), CoreError> {
        let snapshot = self.storage.load_snapshot(&self.owner)?;
        for warning in snapshot_warnings(&snapshot) {
            tracing::warn!(owner = %self.owner, "{warning}");
        }
        debug!(
            owner = %self.owner,
            expenses = snapshot.expenses.len(),
            budgets = snapshot.budgets.len(),
            "snapshot loaded"
        );
        self.snapshot = snapshot;
        Ok(())
    }

    pub fn create_expense(&mut self, draft: ExpenseDraft) -> Result<Expense, CoreError> {
        let expense = Expense::from_draft(draft);
        let expenses = self.storage.create_expense(&self.owner, expense.clone())?;
        self.replace_expenses(expenses);
        info!(owner = %self.owner, id = %expense.id, "expense created");
        Ok(expense)
    }

    pub fn update_expense(&mut self, id: Uuid, draft: ExpenseDraft) -> Result<Expense, CoreError> {
        let expenses = self.storage.update_expense(&self.owner, id, draft)?;
        self.replace_expenses(expenses);
        info!(owner = %self.owner, %id, "expense updated");
        self.snapshot
            .expense(id)
            .cloned()
            .ok_or(CoreError::ExpenseNotFound(id))
    }

    pub fn delete_expense(&mut self, id: Uuid) -> Result<(), CoreError> {
        let expenses = self.storage.delete_expense(&self.owner, id)?;
        self.replace_expenses(expenses);
        info!(owner = %self.owner, %id, "expense deleted");
        Ok(())
    }

    pub fn upsert_budget(&mut self, budget: Budget) -> Result<(), CoreError> {
        let category = budget.category;
        let budgets = self.storage.upsert_budget(&self.owner, budget)?;
        self.snapshot = Snapshot::new(self.snapshot.expenses.clone(), budgets);
        info!(owner = %self.owner, %category, "budget saved");
        Ok(())
    }

    pub fn delete_budget(&mut self, category: Category) -> Result<(), CoreError> {
        let budgets = self.storage.delete_budget(&self.owner, category)?;
        self.snapshot = Snapshot::new(self.snapshot.expenses.clone(), budgets);
        info!(owner = %self.owner, %category, "budget deleted");
        Ok(())
    }

    fn replace_expenses(&mut self, expenses: Vec<Expense>) {
        self.snapshot = Snapshot::new(expenses, self.snapshot.budgets.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn draft(description: &str, amount: f64) -> ExpenseDraft {
        ExpenseDraft {
            description: description.into(),
            amount,
            category: Category::Food,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        }
    }

    #[test]
    fn successful_mutations_replace_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ExpenseStore::open("sam", storage.clone()).unwrap();
        let expense = store.create_expense(draft("Lunch", 12.0)).unwrap();
        assert_eq!(store.snapshot().expenses.len(), 1);

        store
            .upsert_budget(Budget::new(Category::Food, 100.0))
            .unwrap();
        assert_eq!(store.snapshot().budgets.len(), 1);
        assert_eq!(store.snapshot().expenses[0].id, expense.id);

        let mut other = ExpenseStore::open("sam", storage).unwrap();
        other.refresh().unwrap();
        assert_eq!(other.snapshot(), store.snapshot());
    }

    #[test]
    fn failed_mutation_keeps_previous_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = ExpenseStore::open("sam", storage.clone()).unwrap();
        store.create_expense(draft("Lunch", 12.0)).unwrap();
        let before = store.snapshot().clone();

        let err = store.delete_expense(Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.snapshot(), &before);

        storage.set_unavailable(true);
        let err = store.create_expense(draft("Dinner", 30.0)).unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
        assert_eq!(store.snapshot(), &before);
        assert!(store.refresh().is_err());
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn owners_are_isolated() {
        let storage = Arc::new(MemoryStorage::new());
        let mut sam = ExpenseStore::open("sam", storage.clone()).unwrap();
        sam.create_expense(draft("Lunch", 12.0)).unwrap();
        let alex = ExpenseStore::open("alex", storage).unwrap();
        assert!(alex.snapshot().expenses.is_empty());
    }
}
