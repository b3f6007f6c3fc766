//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod budget;
pub mod category;
pub mod config;
pub mod cycle;
pub mod expense;
pub mod report;

pub use auth::{
    handle_login, handle_login_google, handle_logout, handle_signup, handle_whoami, LoginArgs,
    SignupArgs,
};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use cycle::{handle_cycle_show, handle_set_day, CycleCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::{handle_report_command, ReportCommands};
