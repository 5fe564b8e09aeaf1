use crate::ledger::{Category, CategoryKind, Ledger, TransactionKind};

use super::{ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    /// Adds a custom category. Returns `false` when the name already exists.
    pub fn add(ledger: &mut Ledger, name: &str, kind: CategoryKind) -> ServiceResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Invalid("Category name cannot be empty".into()));
        }
        Ok(ledger.add_category(Category::new(name, kind)))
    }

    /// Categories offered for `kind`, or all of them.
    pub fn list(ledger: &Ledger, kind: Option<TransactionKind>) -> Vec<&Category> {
        ledger
            .categories
            .iter()
            .filter(|category| kind.map_or(true, |kind| category.applies_to(kind)))
            .collect()
    }

    pub fn names(ledger: &Ledger, kind: Option<TransactionKind>) -> Vec<String> {
        ledger.category_names(kind)
    }
}
