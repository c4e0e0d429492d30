//! Expense records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;

/// A single recorded expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            category,
            date,
        }
    }

    /// Builds a record with a fresh id from validated draft fields.
    pub fn from_draft(draft: ExpenseDraft) -> Self {
        Self::new(draft.description, draft.amount, draft.category, draft.date)
    }

    /// Replaces every field except the id.
    pub fn apply_draft(&mut self, draft: ExpenseDraft) {
        self.description = draft.description;
        self.amount = draft.amount;
        self.category = draft.category;
        self.date = draft.date;
    }
}

/// The mutable fields of an expense, as submitted by a form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
}

impl From<&Expense> for ExpenseDraft {
    fn from(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_draft_keeps_identity() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut expense = Expense::new("Lunch", 12.5, Category::Food, date);
        let id = expense.id;
        expense.apply_draft(ExpenseDraft {
            description: "Train".into(),
            amount: 4.0,
            category: Category::Transportation,
            date: date.succ_opt().unwrap(),
        });
        assert_eq!(expense.id, id);
        assert_eq!(expense.description, "Train");
        assert_eq!(expense.category, Category::Transportation);
    }

    #[test]
    fn dates_serialize_as_iso_strings() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let expense = Expense::new("Groceries", 30.0, Category::Food, date);
        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["category"], "food");
    }
}
