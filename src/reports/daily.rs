//! Daily spending series across a budget cycle

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::api::ApiClient;
use crate::display::report::{format_bar, format_title};
use crate::error::MonetaResult;
use crate::models::{BudgetCycle, DailyTotal, Money};
use crate::services::ExpenseService;

/// Daily Spending Report
#[derive(Debug, Clone)]
pub struct DailySeriesReport {
    pub cycle: BudgetCycle,
    /// One entry per day of the cycle, zero on days without spending
    pub days: Vec<DailyTotal>,
}

impl DailySeriesReport {
    /// Spread `totals` over every day of `cycle`
    pub fn build(cycle: BudgetCycle, totals: &[DailyTotal]) -> Self {
        let mut by_date: HashMap<NaiveDate, Money> = HashMap::new();
        for t in totals.iter().filter(|t| cycle.contains(t.date)) {
            *by_date.entry(t.date).or_default() += t.total;
        }

        let days = cycle
            .days()
            .map(|date| DailyTotal {
                date,
                total: by_date.get(&date).copied().unwrap_or_default(),
            })
            .collect();

        Self { cycle, days }
    }

    /// Fetch daily totals for `cycle` and build the series
    pub fn generate(client: &ApiClient, cycle: BudgetCycle) -> MonetaResult<Self> {
        let totals = ExpenseService::new(client).daily_totals(&cycle)?;
        Ok(Self::build(cycle, &totals))
    }

    pub fn total(&self) -> Money {
        self.days.iter().map(|d| d.total).sum()
    }

    /// The day with the highest spending, if any day had spending
    pub fn peak(&self) -> Option<&DailyTotal> {
        self.days
            .iter()
            .filter(|d| d.total.is_positive())
            .max_by(|a, b| a.total.cmp(&b.total).then_with(|| b.date.cmp(&a.date)))
    }

    /// Format the series for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = format_title(&format!("Daily Spending: {}", self.cycle), 60);

        if self.peak().is_none() {
            output.push_str("No spending data for this period.\n");
            return output;
        }

        let max = self.peak().map(|d| d.total.as_decimal()).unwrap_or(0.0);
        for day in &self.days {
            output.push_str(&format!(
                "{} {:>12}  {}\n",
                day.date.format("%a %d %b"),
                day.total.format_with_symbol(currency),
                format_bar(day.total.as_decimal(), max, 30)
            ));
        }
        output.push_str(&format!("\nTotal: {}\n", self.total().format_with_symbol(currency)));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferredDay;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn total(on: NaiveDate, cents: i64) -> DailyTotal {
        DailyTotal {
            date: on,
            total: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_fills_every_cycle_day() {
        let cycle = BudgetCycle::resolve(PreferredDay::new(31).unwrap(), date(2024, 2, 20));
        let report = DailySeriesReport::build(
            cycle,
            &[
                total(date(2024, 2, 3), 500),
                total(date(2024, 2, 3), 250),
                total(date(2024, 1, 31), 100),
                total(date(2024, 3, 5), 9999),
            ],
        );

        assert_eq!(report.days.len(), 29);
        assert_eq!(report.days[0].date, date(2024, 1, 31));
        assert_eq!(report.days[28].date, date(2024, 2, 28));
        assert_eq!(report.total(), Money::from_cents(850));
        assert_eq!(report.peak().unwrap().date, date(2024, 2, 3));
    }

    #[test]
    fn test_empty_series() {
        let cycle = BudgetCycle::resolve(PreferredDay::new(1).unwrap(), date(2024, 4, 2));
        let report = DailySeriesReport::build(cycle, &[]);
        assert_eq!(report.days.len(), 30);
        assert!(report.peak().is_none());
        assert!(report.format_terminal("₹").contains("No spending data"));
    }
}
