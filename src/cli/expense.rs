//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing and deleting
//! expenses.

use chrono::{Duration, Local, NaiveDate};
use clap::Subcommand;

use super::cycle::{parse_date, session_preferred_day};
use crate::api::ApiClient;
use crate::config::Settings;
use crate::display::{format_day, format_expense_page, format_expense_short};
use crate::error::{MonetaError, MonetaResult};
use crate::models::{CategoryTree, ExpenseDraft, ExpenseId, ExpenseQuery, Money};
use crate::services::{CategoryService, CycleService, ExpenseService};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses, newest first
    List {
        /// Filter by category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Limit to a budget cycle (current, last, next or a date in it)
        #[arg(long, conflicts_with = "all")]
        cycle: Option<String>,
        /// List expenses from every cycle
        #[arg(long)]
        all: bool,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Page size (defaults to the configured page size)
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// Show the expenses of one day
    Day {
        /// Date (YYYY-MM-DD), "today" or "yesterday"
        #[arg(default_value = "today")]
        date: String,
    },

    /// Record one or more expenses
    Add {
        /// Expenses as DESCRIPTION=AMOUNT, optionally DESCRIPTION=AMOUNT@CATEGORY
        #[arg(required = true, value_name = "DESCRIPTION=AMOUNT[@CATEGORY]")]
        entries: Vec<String>,
        /// Category for entries that don't name one
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Replace an expense
    Edit {
        /// Expense ID
        id: ExpenseId,
        /// Description
        #[arg(long)]
        description: String,
        /// Amount
        #[arg(short, long)]
        amount: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse a day argument relative to `today`
fn parse_day(s: &str, today: NaiveDate) -> MonetaResult<NaiveDate> {
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        _ => parse_date(s),
    }
}

/// Parse `DESCRIPTION=AMOUNT[@CATEGORY]` into a draft
fn parse_entry(
    tree: &CategoryTree,
    entry: &str,
    default_category: Option<&str>,
    date: NaiveDate,
) -> MonetaResult<ExpenseDraft> {
    let invalid = || {
        MonetaError::Validation(format!(
            "Invalid expense '{}'. Use DESCRIPTION=AMOUNT[@CATEGORY]",
            entry
        ))
    };

    let (description, rest) = entry.rsplit_once('=').ok_or_else(invalid)?;
    let (amount, category) = match rest.split_once('@') {
        Some((amount, category)) => (amount, Some(category)),
        None => (rest, default_category),
    };

    let category = category.ok_or_else(|| {
        MonetaError::Validation(format!(
            "No category for '{}'. Add @CATEGORY or pass --category",
            description.trim()
        ))
    })?;
    let category = tree
        .find(category)
        .ok_or_else(|| MonetaError::category_not_found(category.trim()))?;
    let amount = Money::parse(amount).map_err(|_| invalid())?;

    Ok(ExpenseDraft::new(description.trim(), category.id, amount, date))
}

/// Handle an expense command
pub fn handle_expense_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> MonetaResult<()> {
    let service = ExpenseService::new(client);
    let currency = settings.currency_symbol.as_str();
    let today = Local::now().date_naive();

    match cmd {
        ExpenseCommands::List {
            category,
            cycle,
            all,
            page,
            size,
        } => {
            let tree = CategoryService::new(client).list()?;
            let category_id = match category {
                Some(c) => Some(
                    tree.find(&c)
                        .ok_or_else(|| MonetaError::category_not_found(&c))?
                        .id,
                ),
                None => None,
            };

            let mut query = ExpenseQuery {
                category_id,
                newest_first: true,
                ..ExpenseQuery::page(page.saturating_sub(1), size.unwrap_or(settings.page_size))
            };
            if !all {
                let cycles = CycleService::with_today(session_preferred_day(client.session()), today);
                let selected = cycles.parse_or_current(cycle.as_deref())?;
                query.start_date = Some(selected.start_date());
                query.end_date = Some(selected.end_date());
                println!("Cycle {}", selected);
            }

            let result = service.list(&query)?;
            print!("{}", format_expense_page(&result, &tree, currency));
        }

        ExpenseCommands::Day { date } => {
            let date = parse_day(&date, today)?;
            let tree = CategoryService::new(client).list()?;
            let expenses = service.for_day(date)?;
            print!("{}", format_day(date, &expenses, &tree, currency));
        }

        ExpenseCommands::Add {
            entries,
            category,
            date,
        } => {
            let date = match date {
                Some(d) => parse_day(&d, today)?,
                None => today,
            };
            let tree = CategoryService::new(client).list()?;
            let drafts = entries
                .iter()
                .map(|e| parse_entry(&tree, e, category.as_deref(), date))
                .collect::<MonetaResult<Vec<_>>>()?;

            let created = service.add_many(&drafts)?;
            for expense in &created {
                println!("Recorded: {}", format_expense_short(expense, currency));
            }
            let skipped = drafts.len() - created.len();
            if skipped > 0 {
                println!("Skipped {} incomplete entries.", skipped);
            }
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            date,
        } => {
            let date = match date {
                Some(d) => parse_day(&d, today)?,
                None => today,
            };
            let tree = CategoryService::new(client).list()?;
            let category = tree
                .find(&category)
                .ok_or_else(|| MonetaError::category_not_found(&category))?;
            let amount = Money::parse(&amount)
                .map_err(|e| MonetaError::Validation(e.to_string()))?;

            let draft = ExpenseDraft::new(description.trim(), category.id, amount, date);
            service.update(id, &draft)?;
            println!("Updated expense {}", id);
        }

        ExpenseCommands::Delete { id, force } => {
            if !force {
                println!("About to delete expense {}", id);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(id)?;
            println!("Deleted expense {}", id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryId};
    use serde_json::json;

    fn tree() -> CategoryTree {
        let cats: Vec<Category> = serde_json::from_value(json!([
            {"id": 4, "name": "Food"},
            {"id": 5, "name": "Travel"}
        ]))
        .unwrap();
        CategoryTree::new(cats)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_entry_with_category() {
        let draft = parse_entry(&tree(), "Train ticket=450@travel", None, date(2024, 5, 2)).unwrap();
        assert_eq!(draft.description, "Train ticket");
        assert_eq!(draft.category_id, CategoryId::new(5));
        assert_eq!(draft.amount, Money::from_cents(45000));
        assert_eq!(draft.expense_date, date(2024, 5, 2));
    }

    #[test]
    fn test_parse_entry_default_category() {
        let draft = parse_entry(&tree(), "Lunch=120.5", Some("Food"), date(2024, 5, 2)).unwrap();
        assert_eq!(draft.category_id, CategoryId::new(4));
        assert_eq!(draft.amount, Money::from_cents(12050));
    }

    #[test]
    fn test_parse_entry_errors() {
        let on = date(2024, 5, 2);
        assert!(parse_entry(&tree(), "Lunch", Some("Food"), on).unwrap_err().is_validation());
        assert!(parse_entry(&tree(), "Lunch=12", None, on).unwrap_err().is_validation());
        assert!(parse_entry(&tree(), "Lunch=12@Pets", None, on).unwrap_err().is_not_found());
        assert!(parse_entry(&tree(), "Lunch=x@Food", None, on).unwrap_err().is_validation());
        assert!(parse_entry(&tree(), "Lunch=abc5@Food", None, on).unwrap_err().is_validation());
        assert!(parse_entry(&tree(), "Lunch=99999999999999999@Food", None, on)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_parse_day() {
        let today = date(2024, 3, 1);
        assert_eq!(parse_day("today", today).unwrap(), today);
        assert_eq!(parse_day("Yesterday", today).unwrap(), date(2024, 2, 29));
        assert_eq!(parse_day("2024-01-31", today).unwrap(), date(2024, 1, 31));
    }
}
