use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Label used when a transaction arrives without a usable category.
pub const UNCATEGORIZED: &str = "Uncategorized";

const DEFAULT_CATEGORIES: &[(CategoryKind, &str)] = &[
    (CategoryKind::Income, "Client Payment"),
    (CategoryKind::Income, "Consulting Gig"),
    (CategoryKind::Expense, "Office Supplies"),
    (CategoryKind::Expense, "Software & Subscriptions"),
    (CategoryKind::Expense, "Travel"),
    (CategoryKind::Expense, "Meals & Entertainment"),
    (CategoryKind::Expense, "Utilities"),
    (CategoryKind::Expense, "Home Office"),
];

/// Categorises ledger activity for reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub kind: CategoryKind,
    #[serde(default)]
    pub is_custom: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into().trim().to_string(),
            kind,
            is_custom: true,
        }
    }

    /// Case-insensitive name comparison that ignores surrounding whitespace.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    pub fn applies_to(&self, kind: TransactionKind) -> bool {
        match self.kind {
            CategoryKind::Any => true,
            CategoryKind::Income => kind == TransactionKind::Income,
            CategoryKind::Expense => kind == TransactionKind::Expense,
        }
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CategoryKind {
    Income,
    Expense,
    /// User-created categories that are offered for either direction.
    #[default]
    Any,
}

/// Stored form of a category. Older datasets hold bare names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryRecord {
    Full(Category),
    Name(String),
}

impl CategoryRecord {
    pub fn into_category(self) -> Category {
        match self {
            CategoryRecord::Full(category) => category,
            CategoryRecord::Name(name) => default_categories()
                .into_iter()
                .find(|category| category.matches(&name))
                .unwrap_or_else(|| Category::new(name, CategoryKind::Any)),
        }
    }
}

/// Returns the built-in category set offered to a fresh ledger.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(kind, name)| Category {
            name: (*name).to_string(),
            kind: *kind,
            is_custom: false,
        })
        .collect()
}
