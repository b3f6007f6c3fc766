//! Expense display formatting
//!
//! Expense lists render as tables; single expenses as a detail block.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{CategoryTree, Expense, Money};
use crate::services::ExpensePage;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Name of an expense's category, from the expense itself or the tree
fn category_label(expense: &Expense, categories: &CategoryTree) -> String {
    expense
        .category_name
        .clone()
        .or_else(|| {
            expense
                .category_id
                .and_then(|id| categories.get(id))
                .map(|c| c.name.clone())
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Format expenses as a table
pub fn format_expense_table(expenses: &[Expense], categories: &CategoryTree, currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.expense_date.format("%Y-%m-%d").to_string(),
        description: truncate(&e.description, 30),
        category: category_label(e, categories),
        amount: e.amount.format_with_symbol(currency),
    });

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output
}

/// Format one page of expenses with a page footer
pub fn format_expense_page(page: &ExpensePage, categories: &CategoryTree, currency: &str) -> String {
    let mut output = format_expense_table(&page.expenses, categories, currency);

    match page.total_pages() {
        Some(pages) if pages > 0 => {
            output.push_str(&format!("Page {} of {}", page.page + 1, pages));
            if let Some(total) = page.total_count {
                output.push_str(&format!(" ({} expenses)", total));
            }
            output.push('\n');
        }
        _ if page.has_next() => {
            output.push_str(&format!(
                "Page {}. More results: --page {}\n",
                page.page + 1,
                page.page + 2
            ));
        }
        _ => {}
    }

    output
}

/// Format the expenses of a single day with their total
pub fn format_day(
    date: chrono::NaiveDate,
    expenses: &[Expense],
    categories: &CategoryTree,
    currency: &str,
) -> String {
    let mut output = format!("Expenses on {}\n", date.format("%A, %d %B %Y"));
    output.push_str(&format_expense_table(expenses, categories, currency));

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!("Total: {}\n", total.format_with_symbol(currency)));
    output
}

/// Format a one-line confirmation for a recorded expense
pub fn format_expense_short(expense: &Expense, currency: &str) -> String {
    format!(
        "{} {} {} (ID: {})",
        expense.expense_date.format("%Y-%m-%d"),
        expense.description,
        expense.amount.format_with_symbol(currency),
        expense.id
    )
}

/// Truncate to at most `max_len` characters
pub(super) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
