//! Spending Trends Report
//!
//! Sums expenses per calendar month over a trailing window.

use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeMap;

use crate::api::ApiClient;
use crate::display::report::{format_bar, format_title};
use crate::error::MonetaResult;
use crate::models::{Expense, Money};
use crate::services::ExpenseService;

/// Spending in one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySpending {
    /// `YYYY-MM`, used for ordering
    pub key: String,
    /// `Mon YYYY`
    pub label: String,
    pub total: Money,
}

/// Spending Trends Report
#[derive(Debug, Clone)]
pub struct SpendingTrendsReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Months with spending, oldest first
    pub months: Vec<MonthlySpending>,
}

impl SpendingTrendsReport {
    /// Group `expenses` by the month of their expense date
    pub fn build(start_date: NaiveDate, end_date: NaiveDate, expenses: &[Expense]) -> Self {
        let mut by_month: BTreeMap<String, MonthlySpending> = BTreeMap::new();

        for expense in expenses {
            let key = expense.expense_date.format("%Y-%m").to_string();
            by_month
                .entry(key.clone())
                .or_insert_with(|| MonthlySpending {
                    key,
                    label: expense.expense_date.format("%b %Y").to_string(),
                    total: Money::zero(),
                })
                .total += expense.amount;
        }

        Self {
            start_date,
            end_date,
            months: by_month.into_values().collect(),
        }
    }

    /// Fetch the last `months` months of expenses ending at `today`
    pub fn generate(client: &ApiClient, today: NaiveDate, months: u32) -> MonetaResult<Self> {
        let start_date = window_start(today, months);
        let expenses = ExpenseService::new(client).between(start_date, today)?;
        Ok(Self::build(start_date, today, &expenses))
    }

    /// Average monthly spending across the months shown
    pub fn average(&self) -> Money {
        if self.months.is_empty() {
            return Money::zero();
        }
        let total: Money = self.months.iter().map(|m| m.total).sum();
        Money::from_cents(total.cents() / self.months.len() as i64)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format_title(
            &format!("Spending Trends: {} to {}", self.start_date, self.end_date),
            60,
        );

        if self.months.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        let max = self
            .months
            .iter()
            .map(|m| m.total.as_decimal())
            .fold(0.0, f64::max);
        for month in &self.months {
            output.push_str(&format!(
                "{:<10} {:>14}  {}\n",
                month.label,
                month.total.format_with_symbol(currency),
                format_bar(month.total.as_decimal(), max, 30)
            ));
        }
        output.push_str(&format!(
            "\nMonthly average: {}\n",
            self.average().format_with_symbol(currency)
        ));

        output
    }
}

/// Same calendar day `months` months before `today`, clamped to month end
fn window_start(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expenses() -> Vec<Expense> {
        serde_json::from_value(json!([
            {"id": 1, "amount": 100, "expenseDate": "2024-03-30"},
            {"id": 2, "amount": 50.25, "expenseDate": "2024-01-02"},
            {"id": 3, "amount": 20, "expenseDate": "2024-03-01"},
            {"id": 4, "amount": 10, "expenseDate": "2023-12-31"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_groups_by_month_in_order() {
        let report = SpendingTrendsReport::build(date(2023, 10, 1), date(2024, 4, 1), &expenses());
        let labels: Vec<_> = report.months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Dec 2023", "Jan 2024", "Mar 2024"]);
        assert_eq!(report.months[2].key, "2024-03");
        assert_eq!(report.months[2].total, Money::from_cents(12000));
        assert_eq!(report.months[1].total, Money::from_cents(5025));
    }

    #[test]
    fn test_average() {
        let report = SpendingTrendsReport::build(date(2023, 10, 1), date(2024, 4, 1), &expenses());
        assert_eq!(report.average(), Money::from_cents((1000 + 5025 + 12000) / 3));
        let empty = SpendingTrendsReport::build(date(2024, 1, 1), date(2024, 2, 1), &[]);
        assert_eq!(empty.average(), Money::zero());
        assert!(empty.format_terminal("$").contains("No expenses"));
    }

    #[test]
    fn test_window_start_clamps() {
        assert_eq!(window_start(date(2024, 8, 31), 6), date(2024, 2, 29));
        assert_eq!(window_start(date(2024, 3, 15), 12), date(2023, 3, 15));
    }
}
