//! Service layer for Moneta
//!
//! Services sit between the CLI and the API client: they validate input,
//! shape request payloads, and keep local state consistent with the server.

pub mod auth;
pub mod budget;
pub mod category;
pub mod cycle;
pub mod expense;
pub mod optimistic;

pub use auth::{AuthService, Credentials};
pub use budget::BudgetService;
pub use category::{CategoryActivity, CategoryService};
pub use cycle::CycleService;
pub use expense::{ExpensePage, ExpenseService};
pub use optimistic::Optimistic;
