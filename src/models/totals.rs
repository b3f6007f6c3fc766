//! Aggregates computed by the API's `/expenses/total*` endpoints

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// Total spent in one category over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name (the endpoint groups by name, not ID)
    pub category: String,
    pub total: Money,
}

/// Total spent on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Money,
}
