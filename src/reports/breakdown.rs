//! Budget and spending breakdowns
//!
//! Both reports split a whole (total budget, total spent) into per-category
//! shares. They replace the pie charts of a graphical client.

use crate::api::ApiClient;
use crate::display::report::{format_bar, format_percentage, format_title, separator};
use crate::error::MonetaResult;
use crate::models::{BudgetCycle, BudgetMap, CategoryTotal, CategoryTree, Money};
use crate::services::{BudgetService, CategoryService, ExpenseService};

/// One slice of a breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRow {
    pub name: String,
    pub amount: Money,
    pub percentage: f64,
}

/// A whole split into named shares, largest first
#[derive(Debug, Clone)]
pub struct Breakdown {
    pub title: String,
    pub rows: Vec<ShareRow>,
    pub total: Money,
}

impl Breakdown {
    fn from_amounts(title: String, amounts: Vec<(String, Money)>, total: Money) -> Self {
        let mut rows: Vec<ShareRow> = amounts
            .into_iter()
            .filter(|(_, amount)| amount.is_positive())
            .map(|(name, amount)| ShareRow {
                percentage: amount.percent_of(total),
                name,
                amount,
            })
            .collect();
        rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));

        Self { title, rows, total }
    }

    /// Categories with a positive budget and their share of the total budget
    pub fn budgets(budgets: &BudgetMap, categories: &CategoryTree) -> Self {
        let amounts: Vec<(String, Money)> = budgets
            .sorted()
            .into_iter()
            .map(|b| {
                let name = b
                    .category_name
                    .clone()
                    .or_else(|| categories.get(b.category_id).map(|c| c.name.clone()))
                    .unwrap_or_else(|| format!("Category {}", b.category_id));
                (name, b.amount)
            })
            .collect();
        let total = amounts
            .iter()
            .map(|(_, amount)| *amount)
            .filter(Money::is_positive)
            .sum();

        Self::from_amounts("Budget Breakdown".to_string(), amounts, total)
    }

    /// Category totals and their share of the cycle's total spending
    pub fn spending(cycle: &BudgetCycle, totals: Vec<CategoryTotal>, cycle_total: Money) -> Self {
        let shown: Money = totals
            .iter()
            .map(|t| t.total)
            .filter(Money::is_positive)
            .sum();
        // Uncategorized spending can make the cycle total larger than the sum
        // of category totals, never smaller.
        let total = cycle_total.max(shown);
        let amounts = totals.into_iter().map(|t| (t.category, t.total)).collect();

        Self::from_amounts(format!("Spending Breakdown: {}", cycle), amounts, total)
    }

    /// Fetch the current-cycle budgets and categories and build a budget breakdown
    pub fn generate_budgets(client: &ApiClient) -> MonetaResult<Self> {
        let budgets = BudgetService::new(client).current_cycle()?;
        let categories = CategoryService::new(client).list()?;
        Ok(Self::budgets(&budgets, &categories))
    }

    /// Fetch cycle totals and build a spending breakdown
    pub fn generate_spending(client: &ApiClient, cycle: BudgetCycle) -> MonetaResult<Self> {
        let expenses = ExpenseService::new(client);
        let totals = expenses.totals_by_category(Some(&cycle))?;
        let total = expenses.total(&cycle)?;
        Ok(Self::spending(&cycle, totals, total))
    }

    /// Format the breakdown for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format_title(&self.title, 60);

        if self.rows.is_empty() {
            output.push_str("Nothing to show.\n");
            return output;
        }

        for row in &self.rows {
            output.push_str(&format!(
                "{:<22} {:>12} {:>6}  {}\n",
                row.name,
                row.amount.format_with_symbol(currency),
                format_percentage(row.percentage),
                format_bar(row.percentage, 100.0, 15)
            ));
        }
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>12}\n",
            "Total",
            self.total.format_with_symbol(currency)
        ));

        output
    }
}
