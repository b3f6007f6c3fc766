//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetMap, CategoryTree};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    amount: String,
}

/// Format the current cycle's budgets as a table with a total line
pub fn format_budget_table(budgets: &BudgetMap, categories: &CategoryTree, currency: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set for this cycle.\n\nUse 'moneta budget set <CATEGORY>=<AMOUNT>' to add one.\n"
            .to_string();
    }

    let rows = budgets.sorted().into_iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        category: b
            .category_name
            .clone()
            .or_else(|| categories.get(b.category_id).map(|c| c.name.clone()))
            .unwrap_or_else(|| format!("#{}", b.category_id)),
        amount: b.amount.format_with_symbol(currency),
    });

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push_str(&format!(
        "\nTotal budgeted: {}\n",
        budgets.total().format_with_symbol(currency)
    ));
    output
}
