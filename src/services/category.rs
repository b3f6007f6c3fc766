//! Category service
//!
//! Provides category management over the API: listing as a sorted tree,
//! batch creation with duplicate checks, renaming, and optimistic fixed-flag
//! toggles and deletes.

use serde_json::json;
use std::collections::{HashMap, HashSet};
use tracing::info;

use super::expense::ExpenseService;
use super::optimistic::Optimistic;
use crate::api::ApiClient;
use crate::error::{MonetaError, MonetaResult};
use crate::models::{Category, CategoryId, CategoryTree, Expense, Money, RECOMMENDED_CATEGORIES};

/// All-time spending and the latest expense of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryActivity {
    pub category: Category,
    pub total_spent: Money,
    pub recent_expense: Option<Expense>,
}

/// Service for category management
pub struct CategoryService<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch all categories as a sorted tree
    pub fn list(&self) -> MonetaResult<CategoryTree> {
        let categories: Vec<Category> = self.client.get_list("/categories", &[])?;
        Ok(CategoryTree::new(categories))
    }

    /// Fetch one category by ID
    pub fn get(&self, id: CategoryId) -> MonetaResult<Category> {
        self.client
            .get(&format!("/categories/{}", id), &[])
            .map_err(|e| match e {
                MonetaError::NotFound { .. } => MonetaError::category_not_found(id.to_string()),
                other => other,
            })
    }

    /// Find a category by name or ID in `tree`, or fail with `NotFound`
    pub fn require<'t>(&self, tree: &'t CategoryTree, identifier: &str) -> MonetaResult<&'t Category> {
        tree.find(identifier)
            .ok_or_else(|| MonetaError::category_not_found(identifier))
    }

    /// Create several top-level categories at once.
    ///
    /// Names are trimmed and de-duplicated. If any name already exists
    /// (case-insensitively) nothing is created.
    pub fn create_many(&self, tree: &CategoryTree, names: &[String]) -> MonetaResult<Vec<Category>> {
        let user = self.client.session().require_user()?;

        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            Category::validate_name(name).map_err(|e| MonetaError::Validation(e.to_string()))?;
            if seen.insert(name.to_lowercase()) {
                unique.push(name.to_string());
            }
        }

        if unique.is_empty() {
            return Err(MonetaError::Validation(
                "Enter at least one category name".into(),
            ));
        }

        let existing: HashSet<String> = tree
            .flatten()
            .iter()
            .map(|c| c.name.trim().to_lowercase())
            .collect();
        if let Some(duplicate) = unique.iter().find(|n| existing.contains(&n.to_lowercase())) {
            return Err(MonetaError::Duplicate {
                entity_type: "Category",
                identifier: duplicate.clone(),
            });
        }

        let query = [("userId", user.id.to_string())];
        let mut created = Vec::with_capacity(unique.len());
        for name in unique {
            let category: Category = self.client.post(
                "/categories",
                &query,
                &json!({ "name": name, "parentId": null }),
            )?;
            info!("created category {}", category.name);
            created.push(category);
        }

        Ok(created)
    }

    /// All-time total and most recent expense for every category in `tree`.
    ///
    /// Totals come back keyed by category name.
    pub fn activity(
        &self,
        tree: &CategoryTree,
        expenses: &ExpenseService,
    ) -> MonetaResult<Vec<CategoryActivity>> {
        let totals: HashMap<String, Money> = expenses
            .totals_by_category(None)?
            .into_iter()
            .map(|t| (t.category, t.total))
            .collect();

        tree.flatten()
            .into_iter()
            .map(|category| {
                Ok(CategoryActivity {
                    total_spent: totals.get(&category.name).copied().unwrap_or_default(),
                    recent_expense: expenses.latest_in_category(category.id)?,
                    category: category.clone(),
                })
            })
            .collect()
    }

    /// Recommended category names the user does not have yet
    pub fn missing_recommended(&self, tree: &CategoryTree) -> Vec<&'static str> {
        let existing: HashSet<String> = tree
            .flatten()
            .iter()
            .map(|c| c.name.trim().to_lowercase())
            .collect();
        RECOMMENDED_CATEGORIES
            .iter()
            .copied()
            .filter(|name| !existing.contains(&name.to_lowercase()))
            .collect()
    }

    /// Rename a category, keeping its fixed flag
    pub fn rename(&self, category: &Category, new_name: &str) -> MonetaResult<()> {
        let new_name = new_name.trim();
        Category::validate_name(new_name).map_err(|e| MonetaError::Validation(e.to_string()))?;

        self.client.put(
            &format!("/categories/{}", category.id),
            &json!({ "name": new_name, "fixed": category.fixed }),
        )
    }

    /// Mark a category fixed or variable. The local tree reflects the change
    /// immediately and reverts if the API rejects it.
    pub fn set_fixed(
        &self,
        tree: &mut Optimistic<CategoryTree>,
        id: CategoryId,
        fixed: bool,
    ) -> MonetaResult<()> {
        let name = tree
            .state()
            .get(id)
            .map(|c| c.name.clone())
            .ok_or_else(|| MonetaError::category_not_found(id.to_string()))?;

        tree.apply(
            |current| current.with_fixed(id, fixed),
            |_| {
                self.client.put(
                    &format!("/categories/{}", id),
                    &json!({ "name": name, "fixed": fixed }),
                )
            },
        )
    }

    /// Delete a category (and its sub-categories). The local tree drops it
    /// immediately and the previous tree is restored if the API refuses.
    pub fn delete(&self, tree: &mut Optimistic<CategoryTree>, id: CategoryId) -> MonetaResult<()> {
        if tree.state().get(id).is_none() {
            return Err(MonetaError::category_not_found(id.to_string()));
        }

        tree.apply(
            |current| current.without(id),
            |_| self.client.delete(&format!("/categories/{}", id)),
        )?;
        info!("deleted category {}", id);
        Ok(())
    }
}
