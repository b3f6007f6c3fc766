//! Budget Progress Report
//!
//! Compares each current-cycle budget with what has been spent in its
//! category. Spending totals are keyed by category name, so budgets without
//! a category name are skipped.

use std::collections::HashMap;

use crate::api::ApiClient;
use crate::display::report::{format_percentage, format_progress, format_title, separator};
use crate::error::MonetaResult;
use crate::models::{BudgetCycle, BudgetMap, CategoryTotal, Money};
use crate::services::{BudgetService, CycleService, ExpenseService};

/// Progress of one budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgressRow {
    pub category: String,
    pub budget: Money,
    pub spent: Money,
    /// Spent as a percentage of the budget (0 when the budget is 0)
    pub percentage: f64,
}

impl BudgetProgressRow {
    pub fn is_over(&self) -> bool {
        self.percentage > 100.0
    }

    pub fn remaining(&self) -> Money {
        self.budget - self.spent
    }
}

/// Budget Progress Report
#[derive(Debug, Clone)]
pub struct BudgetProgressReport {
    pub cycle: BudgetCycle,
    pub rows: Vec<BudgetProgressRow>,
}

impl BudgetProgressReport {
    /// Match budgets to spending totals by category name
    pub fn build(cycle: BudgetCycle, budgets: &BudgetMap, totals: &[CategoryTotal]) -> Self {
        let spent: HashMap<&str, Money> = totals
            .iter()
            .map(|t| (t.category.as_str(), t.total))
            .collect();

        let rows = budgets
            .sorted()
            .into_iter()
            .filter_map(|budget| {
                let category = budget.category_name.as_deref()?;
                let spent = spent.get(category).copied().unwrap_or_default();
                Some(BudgetProgressRow {
                    category: category.to_string(),
                    budget: budget.amount,
                    spent,
                    percentage: if budget.amount.is_positive() {
                        spent.percent_of(budget.amount)
                    } else {
                        0.0
                    },
                })
            })
            .collect();

        Self { cycle, rows }
    }

    /// Fetch budgets and spending for the current cycle.
    ///
    /// The API only serves budgets for the current cycle, so other cycles
    /// can't be compared.
    pub fn generate(client: &ApiClient, cycles: &CycleService) -> MonetaResult<Self> {
        let cycle = cycles.current_cycle();
        let budgets = BudgetService::new(client).current_cycle()?;
        let totals = ExpenseService::new(client).totals_by_category(Some(&cycle))?;
        Ok(Self::build(cycle, &budgets, &totals))
    }

    pub fn total_budget(&self) -> Money {
        self.rows.iter().map(|r| r.budget).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.rows.iter().map(|r| r.spent).sum()
    }

    /// Rows whose spending exceeds the budget
    pub fn over_budget(&self) -> Vec<&BudgetProgressRow> {
        self.rows.iter().filter(|r| r.is_over()).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format_title(&format!("Budget Progress: {}", self.cycle), 78);

        if self.rows.is_empty() {
            output.push_str("No budgets set for this cycle.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:>12} {:>12} {:>7}  {}\n",
            "Category", "Spent", "Budget", "Used", "Progress"
        ));
        output.push_str(&separator(78));
        output.push('\n');

        for row in &self.rows {
            let marker = if row.is_over() { " OVER" } else { "" };
            output.push_str(&format!(
                "{:<22} {:>12} {:>12} {:>7}  {}{}\n",
                row.category,
                row.spent.format_with_symbol(currency),
                row.budget.format_with_symbol(currency),
                format_percentage(row.percentage),
                format_progress(row.percentage, 15),
                marker
            ));
        }

        output.push_str(&separator(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>12} {:>12}\n",
            "Total",
            self.total_spent().format_with_symbol(currency),
            self.total_budget().format_with_symbol(currency)
        ));

        let over = self.over_budget();
        if !over.is_empty() {
            output.push_str(&format!("\n{} categories over budget\n", over.len()));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::models::PreferredDay;
    use crate::session::Session;
    use chrono::NaiveDate;
    use reqwest::Method;
    use serde_json::json;

    fn cycle() -> BudgetCycle {
        BudgetCycle::resolve(
            PreferredDay::new(1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        )
    }

    fn budgets() -> BudgetMap {
        BudgetMap::new(
            serde_json::from_value(json!([
                {"id": 1, "categoryId": 1, "categoryName": "Food", "amount": 1000},
                {"id": 2, "categoryId": 2, "categoryName": "Travel", "amount": 500},
                {"id": 3, "categoryId": 3, "amount": 200},
                {"id": 4, "categoryId": 4, "categoryName": "Gifts", "amount": 0}
            ]))
            .unwrap(),
        )
    }

    fn totals() -> Vec<CategoryTotal> {
        serde_json::from_value(json!([
            {"category": "Food", "total": 250},
            {"category": "Travel", "total": 650},
            {"category": "Gifts", "total": 40}
        ]))
        .unwrap()
    }

    #[test]
    fn test_progress_rows() {
        let report = BudgetProgressReport::build(cycle(), &budgets(), &totals());
        assert_eq!(report.rows.len(), 3);

        let food = report.rows.iter().find(|r| r.category == "Food").unwrap();
        assert_eq!(food.percentage, 25.0);
        assert!(!food.is_over());
        assert_eq!(food.remaining(), Money::from_cents(75000));

        let travel = report.rows.iter().find(|r| r.category == "Travel").unwrap();
        assert_eq!(travel.percentage, 130.0);
        assert!(travel.is_over());

        let gifts = report.rows.iter().find(|r| r.category == "Gifts").unwrap();
        assert_eq!(gifts.percentage, 0.0);
    }

    #[test]
    fn test_totals_and_over_budget() {
        let report = BudgetProgressReport::build(cycle(), &budgets(), &totals());
        assert_eq!(report.total_budget(), Money::from_cents(150000));
        assert_eq!(report.total_spent(), Money::from_cents(94000));
        assert_eq!(report.over_budget().len(), 1);

        let output = report.format_terminal("₹");
        assert!(output.contains("OVER"));
        assert!(output.contains("1 categories over budget"));
    }

    #[test]
    fn test_missing_spending_is_zero() {
        let report = BudgetProgressReport::build(cycle(), &budgets(), &[]);
        assert!(report.rows.iter().all(|r| r.spent.is_zero()));
    }

    #[test]
    fn test_generate_uses_current_cycle() {
        let mock = MockTransport::new()
            .respond(
                Method::GET,
                "/budgets/current-cycle",
                200,
                json!([{"id": 1, "categoryId": 1, "categoryName": "Food", "amount": 1000}]),
            )
            .respond(
                Method::GET,
                "/expenses/total/category",
                200,
                json!([{"category": "Food", "total": 400}]),
            );
        let log = mock.log();
        let client = ApiClient::new(mock, Session::default());
        let cycles = CycleService::with_today(
            PreferredDay::new(25).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
        );

        let report = BudgetProgressReport::generate(&client, &cycles).unwrap();
        assert_eq!(report.cycle.to_string(), "2024-02-25..2024-03-24");
        assert_eq!(report.rows[0].percentage, 40.0);

        let sent = log.last().unwrap();
        assert_eq!(sent.query_value("startDate"), Some("2024-02-25"));
        assert_eq!(sent.query_value("endDate"), Some("2024-03-24"));
    }
}
