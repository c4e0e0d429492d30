//! The closed set of expense categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Classifies an expense or a budget. The variant order is the registry order
/// used for listings and form selects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Healthcare,
    Education,
    Shopping,
    Travel,
    Other,
}

impl Category {
    /// Every category, in registry order.
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Healthcare,
        Category::Education,
        Category::Shopping,
        Category::Travel,
        Category::Other,
    ];

    /// Stable lowercase identifier, as stored and sent over the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transportation => "transportation",
            Category::Housing => "housing",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Shopping => "shopping",
            Category::Travel => "travel",
            Category::Other => "other",
        }
    }

    /// Capitalised label for headings and chart legends.
    pub fn label(self) -> String {
        let id = self.as_str();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    pub fn iter() -> impl Iterator<Item = Category> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a registered category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category `{}`", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Category::iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| UnknownCategory(value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_matches_declaration() {
        let ids: Vec<_> = Category::iter().map(Category::as_str).collect();
        assert_eq!(ids.first(), Some(&"food"));
        assert_eq!(ids.last(), Some(&"other"));
        assert_eq!(ids.len(), 10);
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Food".parse::<Category>(), Ok(Category::Food));
        assert_eq!(" travel ".parse::<Category>(), Ok(Category::Travel));
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn serializes_as_lowercase_identifier() {
        let json = serde_json::to_string(&Category::Healthcare).unwrap();
        assert_eq!(json, "\"healthcare\"");
        let back: Category = serde_json::from_str("\"shopping\"").unwrap();
        assert_eq!(back, Category::Shopping);
    }

    #[test]
    fn label_capitalises_first_letter() {
        assert_eq!(Category::Utilities.label(), "Utilities");
    }
}
