//! Budget models
//!
//! A budget caps spending in one category for the current budget cycle. The
//! API owns cycle assignment; the client only reads the current cycle's
//! budgets and submits amounts in batches.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// A budget for one category in the current cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,

    pub category_id: CategoryId,

    #[serde(default)]
    pub category_name: Option<String>,

    pub amount: Money,
}

/// One row of a `POST /budgets/batch` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEntry {
    pub category_id: CategoryId,
    pub amount: Money,
}

impl BudgetEntry {
    pub fn new(category_id: CategoryId, amount: Money) -> Self {
        Self {
            category_id,
            amount,
        }
    }
}

/// Current-cycle budgets keyed by category
#[derive(Debug, Clone, Default)]
pub struct BudgetMap {
    by_category: HashMap<CategoryId, Budget>,
}

impl BudgetMap {
    pub fn new(budgets: Vec<Budget>) -> Self {
        Self {
            by_category: budgets.into_iter().map(|b| (b.category_id, b)).collect(),
        }
    }

    /// Budget for a category, if one is set
    pub fn get(&self, category_id: CategoryId) -> Option<&Budget> {
        self.by_category.get(&category_id)
    }

    /// Budgeted amount for a category (zero when unset)
    pub fn amount_for(&self, category_id: CategoryId) -> Money {
        self.get(category_id).map(|b| b.amount).unwrap_or_default()
    }

    /// Sum of every budget
    pub fn total(&self) -> Money {
        self.by_category.values().map(|b| b.amount).sum()
    }

    /// Budgets ordered by category name, then ID
    pub fn sorted(&self) -> Vec<&Budget> {
        let mut budgets: Vec<_> = self.by_category.values().collect();
        budgets.sort_by(|a, b| {
            a.category_name
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .cmp(&b.category_name.as_deref().unwrap_or("").to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        budgets
    }

    pub fn len(&self) -> usize {
        self.by_category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}
