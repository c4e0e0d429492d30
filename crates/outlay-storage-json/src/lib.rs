use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, Utc};
use outlay_core::{Command, CoreError, ExpenseStorage, Snapshot, UserStorage};
use outlay_domain::{Budget, Category, Expense, ExpenseDraft, User};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

const EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const BOOKS_DIR: &str = "books";
const USERS_FILE: &str = "users.json";

/// On-disk document holding one owner's expenses and budgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl Book {
    pub fn new(owner: &str) -> Self {
        let now = Utc::now();
        Self {
            owner: owner.to_string(),
            created_at: now,
            updated_at: now,
            expenses: Vec::new(),
            budgets: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.expenses.clone(), self.budgets.clone())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserFile {
    #[serde(default)]
    users: Vec<User>,
}

/// Filesystem-backed JSON persistence: one file per owner plus a user list.
///
/// Every read-modify-write runs under a single lock so concurrent requests
/// cannot interleave their updates.
pub struct JsonBookStorage {
    root: PathBuf,
    lock: Mutex<()>,
}

impl JsonBookStorage {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(BOOKS_DIR))?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn book_path(&self, owner: &str) -> PathBuf {
        self.root
            .join(BOOKS_DIR)
            .join(format!("{}.{}", canonical_name(owner), EXTENSION))
    }

    pub fn users_path(&self) -> PathBuf {
        self.root.join(USERS_FILE)
    }

    /// Loads the owner's book, or an empty one when nothing is stored yet.
    pub fn load_book(&self, owner: &str) -> Result<Book, CoreError> {
        let _guard = self.guard()?;
        self.read_book(owner)
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, CoreError> {
        self.lock
            .lock()
            .map_err(|_| CoreError::Storage("storage lock poisoned".into()))
    }

    fn read_book(&self, owner: &str) -> Result<Book, CoreError> {
        match read_json::<Book>(&self.book_path(owner))? {
            Some(book) => Ok(book),
            None => Ok(Book::new(owner)),
        }
    }

    fn mutate(&self, owner: &str, command: Command) -> Result<Book, CoreError> {
        let _guard = self.guard()?;
        let mut book = self.read_book(owner)?;
        let next = book.snapshot().apply(&command)?;
        book.expenses = next.expenses;
        book.budgets = next.budgets;
        book.updated_at = Utc::now();
        save_json(&self.book_path(owner), &book)?;
        debug!(owner, command = %command.describe(), "book saved");
        Ok(book)
    }

    fn read_users(&self) -> Result<UserFile, CoreError> {
        Ok(read_json::<UserFile>(&self.users_path())?.unwrap_or_default())
    }
}

impl ExpenseStorage for JsonBookStorage {
    fn list_expenses(&self, owner: &str) -> Result<Vec<Expense>, CoreError> {
        Ok(self.load_book(owner)?.expenses)
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
        Ok(self.load_book(owner)?.budgets)
    }

    fn upsert_budget(&self, owner: &str, budget: Budget) -> Result<Vec<Budget>, CoreError> {
        Ok(self.mutate(owner, Command::UpsertBudget(budget))?.budgets)
    }

    fn delete_budget(&self, owner: &str, category: Category) -> Result<Vec<Budget>, CoreError> {
        Ok(self.mutate(owner, Command::DeleteBudget(category))?.budgets)
    }

    fn load_snapshot(&self, owner: &str) -> Result<Snapshot, CoreError> {
        Ok(self.load_book(owner)?.snapshot())
    }
}

impl UserStorage for JsonBookStorage {
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let _guard = self.guard()?;
        Ok(self
            .read_users()?
            .users
            .into_iter()
            .find(|user| user.email == email))
    }

    fn find_user(&self, id: Uuid) -> Result<Option<User>, CoreError> {
        let _guard = self.guard()?;
        Ok(self.read_users()?.users.into_iter().find(|user| user.id == id))
    }

    fn insert_user(&self, user: User) -> Result<(), CoreError> {
        let _guard = self.guard()?;
        let mut file = self.read_users()?;
        if file.users.iter().any(|existing| existing.email == user.email) {
            return Err(CoreError::EmailTaken(user.email));
        }
        file.users.push(user);
        save_json(&self.users_path(), &file)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>, CoreError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|err| CoreError::Serde(err.to_string()))
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CoreError> {
    let data =
        serde_json::to_string_pretty(value).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "book".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::canonical_name;

    #[test]
    fn canonical_name_keeps_uuid_shape() {
        assert_eq!(
            canonical_name("6F9619FF-8B86-D011-B42D-00C04FC964FF"),
            "6f9619ff-8b86-d011-b42d-00c04fc964ff"
        );
        assert_eq!(canonical_name("../etc"), "___etc");
        assert_eq!(canonical_name("  "), "book");
    }
}
