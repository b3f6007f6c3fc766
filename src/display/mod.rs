//! Display formatting for terminal output
//!
//! Functions here turn models into text. They never print; the CLI layer
//! decides where output goes.

pub mod budget;
pub mod category;
pub mod cycle;
pub mod expense;
pub mod report;

pub use budget::format_budget_table;
pub use category::{
    format_category_activity, format_category_details, format_category_tree, format_recommended,
};
pub use cycle::{format_cycle, format_cycle_list, format_user};
pub use expense::{format_day, format_expense_page, format_expense_short, format_expense_table};
