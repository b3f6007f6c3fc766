//! Expense models
//!
//! Expenses are owned by the API. Locally we only read them and build
//! `ExpenseDraft` payloads for create/update requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub category_name: Option<String>,

    pub amount: Money,

    pub expense_date: NaiveDate,
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.expense_date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// Create/update payload for an expense
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub description: String,
    pub category_id: CategoryId,
    pub amount: Money,
    pub expense_date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        description: impl Into<String>,
        category_id: CategoryId,
        amount: Money,
        expense_date: NaiveDate,
    ) -> Self {
        Self {
            description: description.into(),
            category_id,
            amount,
            expense_date,
        }
    }

    /// A draft is complete when it has a description and a positive amount
    pub fn is_complete(&self) -> bool {
        !self.description.trim().is_empty() && self.amount.is_positive()
    }
}

/// Filters for `GET /expenses`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseQuery {
    pub page: u32,
    pub size: u32,
    pub category_id: Option<CategoryId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Sort newest first by expense date
    pub newest_first: bool,
}

impl ExpenseQuery {
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    /// Query-string pairs in the order the API documents them
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(id) = self.category_id {
            params.push(("categoryId", id.to_string()));
        }
        if let Some(start) = self.start_date {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        if self.newest_first {
            params.push(("sortBy", "expenseDate".to_string()));
            params.push(("sortDir", "desc".to_string()));
        }
        params
    }
}
