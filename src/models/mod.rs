//! Core data models for Moneta
//!
//! This module contains the data structures exchanged with the Moneta API
//! (users, categories, budgets, expenses, aggregates) plus the budget cycle
//! calculation that scopes every date-ranged query.

pub mod budget;
pub mod category;
pub mod cycle;
pub mod expense;
pub mod ids;
pub mod money;
pub mod totals;
pub mod user;

pub use budget::{Budget, BudgetEntry, BudgetMap};
pub use category::{Category, CategoryTree, RECOMMENDED_CATEGORIES};
pub use cycle::{BudgetCycle, PreferredDay};
pub use expense::{Expense, ExpenseDraft, ExpenseQuery};
pub use ids::{BudgetId, CategoryId, ExpenseId, UserId};
pub use money::Money;
pub use totals::{CategoryTotal, DailyTotal};
pub use user::User;
