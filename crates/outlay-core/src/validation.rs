//! Form validation for expenses, budgets and accounts.
//!
//! Forms carry raw text the way it was typed. Validation reports every
//! failing field at once so callers can show each message next to its input.

use std::fmt;

use chrono::NaiveDate;
use outlay_domain::{Budget, Category, ExpenseDraft};
use serde::{Deserialize, Deserializer, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for a field, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw expense form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
}

impl ExpenseForm {
    pub fn new(description: &str, amount: &str, category: &str, date: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            amount: Some(amount.to_string()),
            category: Some(category.to_string()),
            date: Some(date.to_string()),
        }
    }

    pub fn validate(&self) -> Result<ExpenseDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let description = match present(&self.description) {
            Some(text) => text.to_string(),
            None => {
                errors.push("description", "Description is required");
                String::new()
            }
        };
        let amount = check_amount(
            &self.amount,
            &mut errors,
            "Amount is required",
            "Amount must be a positive number",
        );
        let category = check_category(&self.category, &mut errors);
        let date = match present(&self.date) {
            None => {
                errors.push("date", "Date is required");
                None
            }
            Some(text) => match NaiveDate::parse_from_str(text, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push("date", "Date must be in YYYY-MM-DD format");
                    None
                }
            },
        };

        errors.into_result(|| ExpenseDraft {
            description,
            amount: amount.unwrap_or_default(),
            category: category.unwrap_or(Category::Other),
            date: date.unwrap_or(NaiveDate::MIN),
        })
    }
}

/// Raw budget form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetForm {
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub amount: Option<String>,
}

impl BudgetForm {
    pub fn new(category: &str, amount: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            amount: Some(amount.to_string()),
        }
    }

    pub fn validate(&self) -> Result<Budget, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let category = check_category(&self.category, &mut errors);
        let amount = check_amount(
            &self.amount,
            &mut errors,
            "Budget amount is required",
            "Budget amount must be a positive number",
        );
        errors.into_result(|| Budget {
            category: category.unwrap_or(Category::Other),
            amount: amount.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration fields after validation; the email is normalised to lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = present(&self.name).map(str::to_string);
        if name.is_none() {
            errors.push("name", "Name is required");
        }
        let email = check_email(&self.email, &mut errors);
        let password = self.password.clone().unwrap_or_default();
        if password.is_empty() {
            errors.push("password", "Password is required");
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        errors.into_result(|| Registration {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            password,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginForm {
    /// Returns the normalised email and the password.
    pub fn validate(&self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let email = check_email(&self.email, &mut errors);
        let password = self.password.clone().unwrap_or_default();
        if password.is_empty() {
            errors.push("password", "Password is required");
        }
        errors.into_result(|| (email.unwrap_or_default(), password))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

fn check_amount(
    value: &Option<String>,
    errors: &mut ValidationErrors,
    required: &str,
    positive: &str,
) -> Option<f64> {
    let Some(text) = present(value) else {
        errors.push("amount", required);
        return None;
    };
    match text.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Some(amount),
        _ => {
            errors.push("amount", positive);
            None
        }
    }
}

fn check_category(value: &Option<String>, errors: &mut ValidationErrors) -> Option<Category> {
    match present(value).map(str::parse::<Category>) {
        Some(Ok(category)) => Some(category),
        _ => {
            errors.push("category", "Select a valid category");
            None
        }
    }
}

fn check_email(value: &Option<String>, errors: &mut ValidationErrors) -> Option<String> {
    match present(value) {
        None => {
            errors.push("email", "Email is required");
            None
        }
        Some(text) if !text.contains('@') || text.starts_with('@') || text.ends_with('@') => {
            errors.push("email", "Email address is invalid");
            None
        }
        Some(text) => Some(text.to_ascii_lowercase()),
    }
}

/// Accepts JSON strings or numbers for text fields, so `"12.5"` and `12.5`
/// both reach validation.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_expense_form_produces_draft() {
        let draft = ExpenseForm::new("Groceries", "42.50", "Food", "2024-03-01")
            .validate()
            .expect("valid form");
        assert_eq!(draft.description, "Groceries");
        assert_eq!(draft.amount, 42.5);
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn expense_form_reports_every_bad_field() {
        let errors = ExpenseForm::new("  ", "-3", "groceries", "03/01/2024")
            .validate()
            .unwrap_err();
        assert_eq!(errors.errors.len(), 4);
        assert_eq!(errors.message_for("description"), Some("Description is required"));
        assert_eq!(
            errors.message_for("amount"),
            Some("Amount must be a positive number")
        );
        assert_eq!(errors.message_for("category"), Some("Select a valid category"));
        assert_eq!(
            errors.message_for("date"),
            Some("Date must be in YYYY-MM-DD format")
        );
    }

    #[test]
    fn budget_form_distinguishes_missing_from_non_numeric() {
        let missing = BudgetForm::new("food", "").validate().unwrap_err();
        assert_eq!(missing.message_for("amount"), Some("Budget amount is required"));

        let garbage = BudgetForm::new("food", "abc").validate().unwrap_err();
        assert_eq!(
            garbage.message_for("amount"),
            Some("Budget amount must be a positive number")
        );

        let zero = BudgetForm::new("food", "0").validate().unwrap_err();
        assert!(zero.message_for("amount").is_some());
    }

    #[test]
    fn budget_form_accepts_numeric_json() {
        let form: BudgetForm =
            serde_json::from_str(r#"{"category":"housing","amount":1200}"#).unwrap();
        let budget = form.validate().unwrap();
        assert_eq!(budget.category, Category::Housing);
        assert_eq!(budget.amount, 1200.0);
    }

    #[test]
    fn registration_normalises_email() {
        let form = RegistrationForm {
            name: Some("Sam".into()),
            email: Some("Sam@Example.COM".into()),
            password: Some("secret1".into()),
        };
        let registration = form.validate().unwrap();
        assert_eq!(registration.email, "sam@example.com");
    }

    #[test]
    fn registration_rejects_short_password() {
        let form = RegistrationForm {
            name: Some("Sam".into()),
            email: Some("sam@example.com".into()),
            password: Some("abc".into()),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.message_for("password").unwrap().contains("at least 6"));
    }
}
