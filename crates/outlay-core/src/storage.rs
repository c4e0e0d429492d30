//! Persistence traits for expenses, budgets and users, plus an in-memory backend.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        RwLock,
    },
};

use outlay_domain::{Budget, Category, Expense, ExpenseDraft, User};
use uuid::Uuid;

use crate::{
    snapshot::{Command, Snapshot},
    CoreError,
};

/// Persistence for one owner's expenses and budgets. Every mutation returns
/// the updated collection.
pub trait ExpenseStorage: Send + Sync {
    fn list_expenses(&self, owner: &str) -> Result<Vec<Expense>, CoreError>;
    fn create_expense(&self, owner: &str, expense: Expense) -> Result<Vec<Expense>, CoreError>;
    fn update_expense(
        &self,
        owner: &str,
        id: Uuid,
        draft: ExpenseDraft,
    ) -> Result<Vec<Expense>, CoreError>;
    fn delete_expense(&self, owner: &str, id: Uuid) -> Result<Vec<Expense>, CoreError>;
    fn list_budgets(&self, owner: &str) -> Result<Vec<Budget>, CoreError>;
    fn upsert_budget(&self, owner: &str, budget: Budget) -> Result<Vec<Budget>, CoreError>;
    fn delete_budget(&self, owner: &str, category: Category) -> Result<Vec<Budget>, CoreError>;

    fn load_snapshot(&self, owner: &str) -> Result<Snapshot, CoreError> {
        Ok(Snapshot::new(
            self.list_expenses(owner)?,
            self.list_budgets(owner)?,
        ))
    }
}

/// Persistence for registered users.
pub trait UserStorage: Send + Sync {
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;
    fn find_user(&self, id: Uuid) -> Result<Option<User>, CoreError>;
    fn insert_user(&self, user: User) -> Result<(), CoreError>;
}

/// Everything the HTTP layer needs from one persistence handle.
pub trait StorageBackend: ExpenseStorage + UserStorage {}

impl<T: ExpenseStorage + UserStorage> StorageBackend for T {}

/// Volatile storage kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    books: RwLock<HashMap<String, Snapshot>>,
    users: RwLock<Vec<User>>,
    unavailable: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call fail with [`CoreError::Storage`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), CoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("storage unavailable".into()));
        }
        Ok(())
    }

    fn read(&self, owner: &str) -> Result<Snapshot, CoreError> {
        self.ensure_available()?;
        let books = self
            .books
            .read()
            .map_err(|_| CoreError::Storage("book lock poisoned".into()))?;
        Ok(books.get(owner).cloned().unwrap_or_default())
    }

    fn mutate(&self, owner: &str, command: Command) -> Result<Snapshot, CoreError> {
        self.ensure_available()?;
        let mut books = self
            .books
            .write()
            .map_err(|_| CoreError::Storage("book lock poisoned".into()))?;
        let current = books.get(owner).cloned().unwrap_or_default();
        let next = current.apply(&command)?;
        books.insert(owner.to_string(), next.clone());
        Ok(next)
    }
}

impl ExpenseStorage for MemoryStorage {
    fn list_expenses(&self, owner: &str) -> Result<Vec<Expense>, CoreError> {
        Ok(self.read(owner)?.expenses)
    }

    fn create_expense(&self, owner: &str, expense: Expense) -> Result<Vec<Expense>, CoreError> {
        Ok(self.mutate(owner, Command::CreateExpense(expense))?.expenses)
    }

    fn update_expense(
        &self,
        owner: &str,
        id: Uuid,
        draft: ExpenseDraft,
    ) -> Result<Vec<Expense>, CoreError> {
        Ok(self
            .mutate(owner, Command::UpdateExpense { id, draft })?
            .expenses)
    }

    fn delete_expense(&self, owner: &str, id: Uuid) -> Result<Vec<Expense>, CoreError> {
        Ok(self.mutate(owner, Command::DeleteExpense(id))?.expenses)
    }

    fn list_budgets(&self, owner: &str) -> Result<Vec<Budget>, CoreError> {
        Ok(self.read(owner)?.budgets)
    }

    fn upsert_budget(&self, owner: &str, budget: Budget) -> Result<Vec<Budget>, CoreError> {
        Ok(self.mutate(owner, Command::UpsertBudget(budget))?.budgets)
    }

    fn delete_budget(&self, owner: &str, category: Category) -> Result<Vec<Budget>, CoreError> {
        Ok(self.mutate(owner, Command::DeleteBudget(category))?.budgets)
    }
}

impl UserStorage for MemoryStorage {
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        self.ensure_available()?;
        let users = self
            .users
            .read()
            .map_err(|_| CoreError::Storage("user lock poisoned".into()))?;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    fn find_user(&self, id: Uuid) -> Result<Option<User>, CoreError> {
        self.ensure_available()?;
        let users = self
            .users
            .read()
            .map_err(|_| CoreError::Storage("user lock poisoned".into()))?;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    fn insert_user(&self, user: User) -> Result<(), CoreError> {
        self.ensure_available()?;
        let mut users = self
            .users
            .write()
            .map_err(|_| CoreError::Storage("user lock poisoned".into()))?;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(CoreError::EmailTaken(user.email));
        }
        users.push(user);
        Ok(())
    }
}

/// Flags dangling or suspicious records in a snapshot.
pub fn snapshot_warnings(snapshot: &Snapshot) -> Vec<String> {
    let mut warnings = Vec::new();
    for expense in &snapshot.expenses {
        if !(expense.amount.is_finite() && expense.amount > 0.0) {
            warnings.push(format!(
                "expense {} has non-positive amount {}",
                expense.id, expense.amount
            ));
        }
    }
    for budget in &snapshot.budgets {
        if !(budget.amount.is_finite() && budget.amount > 0.0) {
            warnings.push(format!(
                "budget {} has non-positive amount {}",
                budget.category, budget.amount
            ));
        }
    }
    let mut seen = Vec::new();
    for budget in &snapshot.budgets {
        if seen.contains(&budget.category) {
            warnings.push(format!("duplicate budget for {}", budget.category));
        }
        seen.push(budget.category);
    }
    warnings
}
