//! Category CLI commands
//!
//! Implements CLI commands for category management.

use clap::Subcommand;

use super::cycle::session_preferred_day;
use crate::api::ApiClient;
use crate::config::Settings;
use crate::display::{
    format_category_activity, format_category_details, format_category_tree, format_recommended,
};
use crate::error::MonetaResult;
use crate::models::BudgetCycle;
use crate::services::{BudgetService, CategoryService, ExpenseService, Optimistic};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List {
        /// Include current-cycle budgets
        #[arg(short, long, conflicts_with = "totals")]
        budgets: bool,
        /// Show all-time spending and the latest expense of each category
        #[arg(short, long)]
        totals: bool,
    },

    /// Show category details with this cycle's budget and spending
    Show {
        /// Category name or ID
        category: String,
    },

    /// Create one or more categories
    Create {
        /// Category names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List suggested categories you don't have yet
    Recommended {
        /// Create all of them
        #[arg(long)]
        add: bool,
    },

    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },

    /// Mark a category as fixed (excluded from top spending) or variable
    Fixed {
        /// Category name or ID
        category: String,
        /// Mark as variable instead
        #[arg(long)]
        off: bool,
    },

    /// Delete a category and its sub-categories
    Delete {
        /// Category name or ID
        category: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: CategoryCommands,
) -> MonetaResult<()> {
    let service = CategoryService::new(client);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::List { totals: true, .. } => {
            let tree = service.list()?;
            let activity = service.activity(&tree, &ExpenseService::new(client))?;
            print!("{}", format_category_activity(&activity, currency));
        }

        CategoryCommands::List { budgets, .. } => {
            let tree = service.list()?;
            let budget_map = if budgets {
                Some(BudgetService::new(client).current_cycle()?)
            } else {
                None
            };
            print!("{}", format_category_tree(&tree, budget_map.as_ref(), currency));
        }

        CategoryCommands::Show { category } => {
            let tree = service.list()?;
            let found = service.require(&tree, &category)?;
            let details = service.get(found.id)?;

            let budgets = BudgetService::new(client).current_cycle()?;
            let cycle = BudgetCycle::current(session_preferred_day(client.session()));
            let spent = ExpenseService::new(client)
                .totals_by_category(Some(&cycle))?
                .into_iter()
                .find(|t| t.category == details.name)
                .map(|t| t.total)
                .unwrap_or_default();

            print!(
                "{}",
                format_category_details(&details, budgets.get(details.id), Some(spent), currency)
            );
        }

        CategoryCommands::Create { names } => {
            let tree = service.list()?;
            let created = service.create_many(&tree, &names)?;
            for category in &created {
                println!("Created category: {} (ID: {})", category.name, category.id);
            }
        }

        CategoryCommands::Recommended { add } => {
            let tree = service.list()?;
            let missing = service.missing_recommended(&tree);

            if !add || missing.is_empty() {
                print!("{}", format_recommended(&missing));
                return Ok(());
            }

            let names: Vec<String> = missing.iter().map(|n| n.to_string()).collect();
            let created = service.create_many(&tree, &names)?;
            println!("Created {} categories:", created.len());
            for category in &created {
                println!("  - {}", category.name);
            }
        }

        CategoryCommands::Rename { category, name } => {
            let tree = service.list()?;
            let found = service.require(&tree, &category)?;
            service.rename(found, &name)?;
            println!("Renamed category: {} -> {}", found.name, name.trim());
        }

        CategoryCommands::Fixed { category, off } => {
            let tree = service.list()?;
            let id = service.require(&tree, &category)?.id;
            let mut local = Optimistic::new(tree);
            service.set_fixed(&mut local, id, !off)?;

            if let Some(updated) = local.state().get(id) {
                let kind = if updated.fixed { "fixed" } else { "variable" };
                println!("{} is now {}", updated.name, kind);
            }
        }

        CategoryCommands::Delete { category, force } => {
            let tree = service.list()?;
            let found = service.require(&tree, &category)?;
            let (id, name, children) = (found.id, found.name.clone(), found.sub_categories.len());

            if !force {
                println!("About to delete category: {} (ID: {})", name, id);
                if children > 0 {
                    println!("  This also deletes {} sub-categories.", children);
                }
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let mut local = Optimistic::new(tree);
            service.delete(&mut local, id)?;
            println!("Deleted category: {}", name);
            println!("{} categories remain.", local.state().len());
        }
    }

    Ok(())
}
