//! Reports module for Moneta
//!
//! Each report can be built from already-fetched data (`build`) or fetched
//! through the API (`generate`), and renders itself as text with
//! `format_terminal`.

pub mod breakdown;
pub mod budget_progress;
pub mod daily;
pub mod summary;
pub mod top_categories;
pub mod trends;

pub use breakdown::{Breakdown, ShareRow};
pub use budget_progress::{BudgetProgressReport, BudgetProgressRow};
pub use daily::DailySeriesReport;
pub use summary::CycleSummaryReport;
pub use top_categories::{TopCategoriesReport, TopCategoryRow};
pub use trends::{MonthlySpending, SpendingTrendsReport};
