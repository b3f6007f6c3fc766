//! Budget CLI commands
//!
//! Implements CLI commands for setting and clearing current-cycle budgets.

use clap::Subcommand;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::display::format_budget_table;
use crate::error::{MonetaError, MonetaResult};
use crate::models::{BudgetEntry, BudgetId, CategoryTree, Money};
use crate::services::{BudgetService, CategoryService};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show budgets for the current cycle
    List,

    /// Set budgets for the current cycle
    Set {
        /// One or more CATEGORY=AMOUNT pairs (e.g. "Groceries=8000")
        #[arg(required = true, value_name = "CATEGORY=AMOUNT")]
        entries: Vec<String>,
    },

    /// Delete a budget by ID
    Delete {
        /// Budget ID
        id: BudgetId,
    },

    /// Remove the current-cycle budget of a category
    Clear {
        /// Category name or ID
        category: String,
    },
}

/// Parse `CATEGORY=AMOUNT` against the category tree
fn parse_entry(tree: &CategoryTree, entry: &str) -> MonetaResult<BudgetEntry> {
    let (category, amount) = entry.rsplit_once('=').ok_or_else(|| {
        MonetaError::Validation(format!(
            "Invalid budget '{}'. Use CATEGORY=AMOUNT",
            entry
        ))
    })?;

    let category = tree
        .find(category)
        .ok_or_else(|| MonetaError::category_not_found(category.trim()))?;
    let amount = Money::parse(amount)
        .map_err(|e| MonetaError::Validation(format!("Invalid amount for {}: {}", category.name, e)))?;

    Ok(BudgetEntry::new(category.id, amount))
}

/// Handle a budget command
pub fn handle_budget_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: BudgetCommands,
) -> MonetaResult<()> {
    let service = BudgetService::new(client);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::List => {
            let budgets = service.current_cycle()?;
            let tree = CategoryService::new(client).list()?;
            print!("{}", format_budget_table(&budgets, &tree, currency));
        }

        BudgetCommands::Set { entries } => {
            let tree = CategoryService::new(client).list()?;
            let parsed = entries
                .iter()
                .map(|e| parse_entry(&tree, e))
                .collect::<MonetaResult<Vec<_>>>()?;

            let skipped = parsed.iter().filter(|e| !e.amount.is_positive()).count();
            let saved = service.save_batch(&parsed)?;
            println!("Saved {} budgets.", saved);
            if skipped > 0 {
                println!("Skipped {} entries without a positive amount.", skipped);
            }
        }

        BudgetCommands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted budget {}", id);
        }

        BudgetCommands::Clear { category } => {
            let tree = CategoryService::new(client).list()?;
            let found = tree
                .find(&category)
                .ok_or_else(|| MonetaError::category_not_found(&category))?;
            let budgets = service.current_cycle()?;
            service.clear_category(&budgets, found.id)?;
            println!("Cleared budget for {}", found.name);
        }
    }

    Ok(())
}
