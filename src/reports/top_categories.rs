//! Top Categories Report
//!
//! Ranks variable spending by category. Fixed categories (rent, loan
//! payments) are left out because they say nothing about habits.

use std::collections::HashSet;

use crate::api::ApiClient;
use crate::display::report::{format_bar, format_percentage, format_title, separator};
use crate::error::MonetaResult;
use crate::models::{BudgetCycle, CategoryTotal, CategoryTree, Money};
use crate::services::{CategoryService, ExpenseService};

/// One ranked category
#[derive(Debug, Clone, PartialEq)]
pub struct TopCategoryRow {
    pub name: String,
    pub total: Money,
    /// Share of the total of the rows shown
    pub percentage: f64,
}

/// Top Categories Report
#[derive(Debug, Clone)]
pub struct TopCategoriesReport {
    /// `None` for all-time totals
    pub cycle: Option<BudgetCycle>,
    pub rows: Vec<TopCategoryRow>,
    pub total: Money,
}

impl TopCategoriesReport {
    /// Rank `totals`, skipping fixed categories, keeping at most `limit` rows
    pub fn build(
        cycle: Option<BudgetCycle>,
        totals: Vec<CategoryTotal>,
        categories: &CategoryTree,
        limit: usize,
    ) -> Self {
        let fixed: HashSet<&str> = categories.fixed_names().into_iter().collect();

        let mut variable: Vec<CategoryTotal> = totals
            .into_iter()
            .filter(|t| !fixed.contains(t.category.as_str()))
            .collect();
        variable.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
        variable.truncate(limit);

        let total: Money = variable.iter().map(|t| t.total).sum();
        let rows = variable
            .into_iter()
            .map(|t| TopCategoryRow {
                percentage: t.total.percent_of(total),
                name: t.category,
                total: t.total,
            })
            .collect();

        Self { cycle, rows, total }
    }

    /// Fetch totals and categories from the API and build the report
    pub fn generate(client: &ApiClient, cycle: Option<BudgetCycle>, limit: usize) -> MonetaResult<Self> {
        let categories = CategoryService::new(client).list()?;
        let totals = ExpenseService::new(client).totals_by_category(cycle.as_ref())?;
        Ok(Self::build(cycle, totals, &categories, limit))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let title = match &self.cycle {
            Some(cycle) => format!("Top Categories: {}", cycle),
            None => "Top Categories: all time".to_string(),
        };
        let mut output = format_title(&title, 60);

        if self.rows.is_empty() {
            output.push_str("No spending data available.\n");
            return output;
        }

        let max = self.rows.first().map(|r| r.total.as_decimal()).unwrap_or(0.0);
        for (rank, row) in self.rows.iter().enumerate() {
            output.push_str(&format!(
                "{:>2}. {:<22} {:>12} {:>6}  {}\n",
                rank + 1,
                row.name,
                row.total.format_with_symbol(currency),
                format_percentage(row.percentage),
                format_bar(row.total.as_decimal(), max, 12)
            ));
        }
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "    {:<22} {:>12}\n",
            "Total",
            self.total.format_with_symbol(currency)
        ));

        output
    }
}
