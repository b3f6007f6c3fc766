//! Budget service
//!
//! Reads the current cycle's budgets and saves new amounts in batches.

use serde_json::Value;
use tracing::info;

use crate::api::ApiClient;
use crate::error::{MonetaError, MonetaResult};
use crate::models::{Budget, BudgetEntry, BudgetId, BudgetMap, CategoryId};

/// Service for budget management
pub struct BudgetService<'a> {
    client: &'a ApiClient,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Budgets for the current cycle, keyed by category
    pub fn current_cycle(&self) -> MonetaResult<BudgetMap> {
        let budgets: Vec<Budget> = self.client.get_list("/budgets/current-cycle", &[])?;
        Ok(BudgetMap::new(budgets))
    }

    /// Save budget amounts for the current cycle.
    ///
    /// Entries with a zero or negative amount are dropped; if nothing is
    /// left the batch is rejected without calling the API. Returns the
    /// number of budgets sent.
    pub fn save_batch(&self, entries: &[BudgetEntry]) -> MonetaResult<usize> {
        let batch: Vec<BudgetEntry> = entries
            .iter()
            .filter(|e| e.amount.is_positive())
            .copied()
            .collect();

        if batch.is_empty() {
            return Err(MonetaError::Validation(
                "Please enter at least one budget amount to save.".into(),
            ));
        }

        let _: Value = self.client.post("/budgets/batch", &[], &batch)?;
        info!("saved {} budgets", batch.len());
        Ok(batch.len())
    }

    /// Delete a budget by ID
    pub fn delete(&self, id: BudgetId) -> MonetaResult<()> {
        self.client
            .delete(&format!("/budgets/{}", id))
            .map_err(|e| match e {
                MonetaError::NotFound { .. } => MonetaError::budget_not_found(id.to_string()),
                other => other,
            })
    }

    /// Remove the current-cycle budget of a category
    pub fn clear_category(&self, budgets: &BudgetMap, category_id: CategoryId) -> MonetaResult<BudgetId> {
        let budget = budgets.get(category_id).ok_or_else(|| {
            MonetaError::budget_not_found(format!("category {}", category_id))
        })?;
        self.delete(budget.id)?;
        Ok(budget.id)
    }
}
