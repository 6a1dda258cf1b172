//! Category model
//!
//! Categories are per-user labels with an icon. Expenses refer to them by
//! name, so renaming a category also renames the label on its expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Icon used when none is given
pub const DEFAULT_ICON: &str = "more-horizontal";

/// Categories created for every new user, with their icons
pub const DEFAULT_CATEGORIES: [(&str, &str); 9] = [
    ("Bolig", "house"),
    ("Forbrug", "zap"),
    ("Transport", "car"),
    ("Børn", "baby"),
    ("Mad", "utensils"),
    ("Forsikring", "shield"),
    ("Abonnementer", "tv"),
    ("Opsparing", "piggy-bank"),
    ("Andet", DEFAULT_ICON),
];

/// An expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Icon name for display
    #[serde(default = "default_icon")]
    pub icon: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        let now = Utc::now();
        let icon = icon.into();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            icon: if icon.trim().is_empty() { default_icon() } else { icon },
            created_at: now,
            updated_at: now,
        }
    }

    /// The default category set for a new user
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, icon)| Category::new(*name, *icon))
            .collect()
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Bolig", "house");
        assert_eq!(category.name, "Bolig");
        assert_eq!(category.icon, "house");
    }

    #[test]
    fn test_blank_icon_uses_default() {
        let category = Category::new("Ferie", "");
        assert_eq!(category.icon, DEFAULT_ICON);
    }

    #[test]
    fn test_defaults() {
        let defaults = Category::defaults();
        assert_eq!(defaults.len(), 9);
        assert_eq!(defaults[0].name, "Bolig");
        assert!(defaults.iter().any(|c| c.name == "Børn" && c.icon == "baby"));
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid", "tv");
        assert!(category.validate().is_ok());

        category.name = String::new();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_serialization() {
        let category = Category::new("Mad", "utensils");
        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category, deserialized);
    }
}
