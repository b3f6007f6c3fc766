//! CLI commands for reports
//!
//! Provides commands for the cycle summary and the spending reports.
//! Budgets only exist for the current cycle, so the budget-based reports
//! take no `--cycle`.

use chrono::Local;
use clap::Subcommand;

use super::cycle::session_preferred_day;
use crate::api::ApiClient;
use crate::config::Settings;
use crate::error::MonetaResult;
use crate::models::BudgetCycle;
use crate::reports::{
    Breakdown, BudgetProgressReport, CycleSummaryReport, DailySeriesReport, SpendingTrendsReport,
    TopCategoriesReport,
};
use crate::services::CycleService;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Budget, spending and remaining allowance for the current cycle
    Summary,

    /// Biggest variable-spending categories
    Top {
        /// Number of categories to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Use all recorded expenses instead of one cycle
        #[arg(long, conflicts_with = "cycle")]
        all_time: bool,
        /// Cycle: current, last, next or a date inside it (YYYY-MM-DD)
        #[arg(short, long)]
        cycle: Option<String>,
    },

    /// Monthly spending over recent months
    Trends {
        /// Number of months, including the current one
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Current-cycle budget against spending per category
    #[command(alias = "progress")]
    Budgets,

    /// Share of each category in the budget (or in spending)
    Breakdown {
        /// Break down spending instead of budgets
        #[arg(short, long)]
        spending: bool,
        /// Cycle for the spending breakdown
        #[arg(short, long, requires = "spending")]
        cycle: Option<String>,
    },

    /// Spending per day across a cycle
    Daily {
        /// Cycle: current, last, next or a date inside it (YYYY-MM-DD)
        #[arg(short, long)]
        cycle: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    client: &ApiClient,
    settings: &Settings,
    cmd: ReportCommands,
) -> MonetaResult<()> {
    let currency = settings.currency_symbol.as_str();
    let today = Local::now().date_naive();
    let cycles = CycleService::with_today(session_preferred_day(client.session()), today);
    let resolve = |cycle: Option<String>| -> MonetaResult<BudgetCycle> {
        cycles.parse_or_current(cycle.as_deref())
    };

    match cmd {
        ReportCommands::Summary => {
            let report = CycleSummaryReport::generate(client, &cycles)?;
            print!("{}", report.format_terminal(currency));
        }

        ReportCommands::Top {
            limit,
            all_time,
            cycle,
        } => {
            let cycle = if all_time { None } else { Some(resolve(cycle)?) };
            let limit = limit.unwrap_or(settings.top_categories_limit);
            let report = TopCategoriesReport::generate(client, cycle, limit)?;
            print!("{}", report.format_terminal(currency));
        }

        ReportCommands::Trends { months } => {
            let months = months.unwrap_or(settings.trend_months);
            let report = SpendingTrendsReport::generate(client, today, months)?;
            print!("{}", report.format_terminal(currency));
        }

        ReportCommands::Budgets => {
            let report = BudgetProgressReport::generate(client, &cycles)?;
            print!("{}", report.format_terminal(currency));
        }

        ReportCommands::Breakdown { spending, cycle } => {
            let report = if spending {
                Breakdown::generate_spending(client, resolve(cycle)?)?
            } else {
                Breakdown::generate_budgets(client)?
            };
            print!("{}", report.format_terminal(currency));
        }

        ReportCommands::Daily { cycle } => {
            let report = DailySeriesReport::generate(client, resolve(cycle)?)?;
            print!("{}", report.format_terminal(currency));
        }
    }

    Ok(())
}
