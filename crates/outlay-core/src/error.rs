use outlay_domain::{Category, DateWindowError};
use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Invalid budget for {category}: amount {amount} must be positive")]
    InvalidBudget { category: Category, amount: f64 },
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Budget not found: {0}")]
    BudgetNotFound(Category),
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("An account with email `{0}` already exists")]
    EmailTaken(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid date window: {0}")]
    InvalidWindow(#[from] DateWindowError),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// True for errors that reference a record that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::ExpenseNotFound(_) | CoreError::BudgetNotFound(_) | CoreError::UserNotFound(_)
        )
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation(errors)
    }
}
