//! Category display formatting
//!
//! Formats the category tree, single categories and the list of suggested
//! categories for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::expense::truncate;
use crate::models::{Budget, BudgetMap, Category, CategoryTree, Money};
use crate::services::CategoryActivity;

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Total spent")]
    total: String,
    #[tabled(rename = "Latest expense")]
    latest: String,
}

fn fixed_marker(category: &Category) -> &'static str {
    if category.fixed {
        " [fixed]"
    } else {
        ""
    }
}

fn budget_suffix(category: &Category, budgets: Option<&BudgetMap>, currency: &str) -> String {
    budgets
        .and_then(|b| b.get(category.id))
        .map(|b| format!("  (budget {})", b.amount.format_with_symbol(currency)))
        .unwrap_or_default()
}

/// Format categories as a tree, with budgets when they are known
pub fn format_category_tree(tree: &CategoryTree, budgets: Option<&BudgetMap>, currency: &str) -> String {
    if tree.is_empty() {
        return "No categories found.\n\nRun 'moneta category recommended' for suggestions.\n"
            .to_string();
    }

    let mut output = String::new();

    for category in tree.roots() {
        output.push_str(&format!(
            "{:>4}  {}{}{}\n",
            category.id,
            category.name,
            fixed_marker(category),
            budget_suffix(category, budgets, currency)
        ));

        for (j, child) in category.sub_categories.iter().enumerate() {
            let is_last = j == category.sub_categories.len() - 1;
            let prefix = if is_last { "└── " } else { "├── " };
            output.push_str(&format!(
                "{:>4}    {}{}{}{}\n",
                child.id,
                prefix,
                child.name,
                fixed_marker(child),
                budget_suffix(child, budgets, currency)
            ));
        }
    }

    output
}

/// Format category details
pub fn format_category_details(
    category: &Category,
    budget: Option<&Budget>,
    spent: Option<Money>,
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:     {}\n", category.id));
    output.push_str(&format!(
        "  Type:   {}\n",
        if category.fixed { "Fixed" } else { "Variable" }
    ));

    match budget {
        Some(b) => output.push_str(&format!(
            "  Budget: {}\n",
            b.amount.format_with_symbol(currency)
        )),
        None => output.push_str("  Budget: (none)\n"),
    }

    if let Some(spent) = spent {
        output.push_str(&format!("  Spent:  {}\n", spent.format_with_symbol(currency)));
        if let Some(b) = budget {
            output.push_str(&format!(
                "  Left:   {}\n",
                (b.amount - spent).format_with_symbol(currency)
            ));
        }
    }

    if !category.sub_categories.is_empty() {
        output.push_str("\n  Sub-categories:\n");
        for child in &category.sub_categories {
            output.push_str(&format!("    - {}{}\n", child.name, fixed_marker(child)));
        }
    }

    output
}

/// Format every category with its all-time spending and latest expense
pub fn format_category_activity(activity: &[CategoryActivity], currency: &str) -> String {
    if activity.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = activity.iter().map(|a| ActivityRow {
        id: a.category.id.to_string(),
        name: format!("{}{}", a.category.name, fixed_marker(&a.category)),
        total: a.total_spent.format_with_symbol(currency),
        latest: a
            .recent_expense
            .as_ref()
            .map(|e| {
                format!(
                    "{} {} ({})",
                    e.expense_date.format("%Y-%m-%d"),
                    truncate(&e.description, 24),
                    e.amount.format_with_symbol(currency)
                )
            })
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut output = Table::new(rows).with(Style::sharp()).to_string();
    output.push('\n');
    output
}

/// Format suggested category names the user does not have yet
pub fn format_recommended(names: &[&str]) -> String {
    if names.is_empty() {
        return "You already have every suggested category.\n".to_string();
    }

    let mut output = String::from("Suggested categories:\n");
    for name in names {
        output.push_str(&format!("  - {}\n", name));
    }
    output.push_str("\nAdd them with: moneta category create \"<NAME>\" ...\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use serde_json::json;

    fn tree() -> CategoryTree {
        let cats: Vec<Category> = serde_json::from_value(json!([
            {"id": 1, "name": "Rent", "fixed": true},
            {"id": 2, "name": "Food", "subcategories": [
                {"id": 3, "name": "Dining out", "parentId": 2},
                {"id": 4, "name": "Coffee", "parentId": 2}
            ]}
        ]))
        .unwrap();
        CategoryTree::new(cats)
    }

    #[test]
    fn test_format_empty_tree() {
        let output = format_category_tree(&CategoryTree::default(), None, "₹");
        assert!(output.contains("No categories found"));
    }

    #[test]
    fn test_format_category_tree() {
        let budgets = BudgetMap::new(
            serde_json::from_value(json!([{"id": 1, "categoryId": 2, "amount": 800}])).unwrap(),
        );
        let output = format_category_tree(&tree(), Some(&budgets), "₹");
        assert!(output.contains("Rent [fixed]"));
        assert!(output.contains("Food  (budget ₹800.00)"));
        assert!(output.contains("├── Coffee"));
        assert!(output.contains("└── Dining out"));
    }

    #[test]
    fn test_format_category_details() {
        let tree = tree();
        let food = tree.find("food").unwrap();
        let budget: Budget =
            serde_json::from_value(json!({"id": 1, "categoryId": 2, "amount": 800})).unwrap();
        let output =
            format_category_details(food, Some(&budget), Some(Money::from_cents(30000)), "₹");
        assert!(output.contains("Type:   Variable"));
        assert!(output.contains("Left:   ₹500.00"));
        assert!(output.contains("- Coffee"));
    }

    #[test]
    fn test_format_recommended() {
        assert!(format_recommended(&[]).contains("every suggested"));
        assert!(format_recommended(&["Pets"]).contains("  - Pets"));
    }

    #[test]
    fn test_format_category_activity() {
        let tree = tree();
        let rent = tree.get(CategoryId::new(1)).unwrap().clone();
        let coffee = tree.get(CategoryId::new(4)).unwrap().clone();
        let activity = vec![
            CategoryActivity {
                category: rent,
                total_spent: Money::from_cents(2400000),
                recent_expense: Some(
                    serde_json::from_value(json!({"id": 9, "description": "May rent",
                        "categoryId": 1, "amount": 12000, "expenseDate": "2024-05-01"}))
                    .unwrap(),
                ),
            },
            CategoryActivity {
                category: coffee,
                total_spent: Money::zero(),
                recent_expense: None,
            },
        ];

        let output = format_category_activity(&activity, "₹");
        assert!(output.contains("Rent [fixed]"));
        assert!(output.contains("₹24000.00"));
        assert!(output.contains("2024-05-01 May rent (₹12000.00)"));
        assert!(output.contains("Coffee"));
        assert!(format_category_activity(&[], "₹").contains("No categories"));
    }
}
