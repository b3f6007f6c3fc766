//! Cycle Summary Report
//!
//! A one-screen overview of a budget cycle: how much has been spent, how
//! that compares to the budgets, and how many days are left.

use chrono::NaiveDate;

use super::budget_progress::BudgetProgressReport;
use crate::api::ApiClient;
use crate::display::report::{format_percentage, format_title};
use crate::error::MonetaResult;
use crate::models::{BudgetCycle, Money};
use crate::services::{CycleService, ExpenseService};

/// Cycle Summary Report
#[derive(Debug, Clone)]
pub struct CycleSummaryReport {
    pub cycle: BudgetCycle,
    pub today: NaiveDate,
    pub total_spent: Money,
    pub progress: BudgetProgressReport,
}

impl CycleSummaryReport {
    /// Fetch the current cycle's total and budget progress
    pub fn generate(client: &ApiClient, cycles: &CycleService) -> MonetaResult<Self> {
        let cycle = cycles.current_cycle();
        let total_spent = ExpenseService::new(client).total(&cycle)?;
        let progress = BudgetProgressReport::generate(client, cycles)?;
        Ok(Self {
            cycle,
            today: cycles.today(),
            total_spent,
            progress,
        })
    }

    pub fn total_budget(&self) -> Money {
        self.progress.total_budget()
    }

    /// Days left in the cycle including today; zero once the cycle is over
    /// and the full length before it starts
    pub fn days_remaining(&self) -> i64 {
        if self.today < self.cycle.start_date() {
            self.cycle.num_days()
        } else {
            ((self.cycle.end_date() - self.today).num_days() + 1).max(0)
        }
    }

    /// Budget left per remaining day, when there is budget left
    pub fn daily_allowance(&self) -> Option<Money> {
        let left = self.total_budget() - self.total_spent;
        let days = self.days_remaining();
        if !left.is_positive() || days == 0 {
            return None;
        }
        Some(Money::from_cents(left.cents() / days))
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format_title(&format!("Budget Cycle {}", self.cycle), 60);

        output.push_str(&format!(
            "Spent:           {}\n",
            self.total_spent.format_with_symbol(currency)
        ));

        let budget = self.total_budget();
        if budget.is_positive() {
            output.push_str(&format!(
                "Budgeted:        {} ({} used)\n",
                budget.format_with_symbol(currency),
                format_percentage(self.total_spent.percent_of(budget))
            ));
            output.push_str(&format!(
                "Remaining:       {}\n",
                (budget - self.total_spent).format_with_symbol(currency)
            ));
        } else {
            output.push_str("Budgeted:        (no budgets set)\n");
        }

        output.push_str(&format!("Days remaining:  {}\n", self.days_remaining()));
        if let Some(allowance) = self.daily_allowance() {
            output.push_str(&format!(
                "Per day:         {}\n",
                allowance.format_with_symbol(currency)
            ));
        }

        let over = self.progress.over_budget();
        if !over.is_empty() {
            output.push_str("\nOver budget:\n");
            for row in over {
                output.push_str(&format!(
                    "  {:<22} {} of {}\n",
                    row.category,
                    row.spent.format_with_symbol(currency),
                    row.budget.format_with_symbol(currency)
                ));
            }
        }

        output
    }
}
