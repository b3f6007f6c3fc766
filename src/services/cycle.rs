//! Budget cycle service
//!
//! Resolves which budget cycle a command refers to, based on the user's
//! preferred start day.

use chrono::{Local, NaiveDate};

use crate::error::{MonetaError, MonetaResult};
use crate::models::{BudgetCycle, PreferredDay};

/// Service for budget cycle navigation
pub struct CycleService {
    preferred_day: PreferredDay,
    today: NaiveDate,
}

impl CycleService {
    /// Create a cycle service anchored to today's date
    pub fn new(preferred_day: PreferredDay) -> Self {
        Self::with_today(preferred_day, Local::now().date_naive())
    }

    /// Create a cycle service with an explicit "today" (useful for testing)
    pub fn with_today(preferred_day: PreferredDay, today: NaiveDate) -> Self {
        Self {
            preferred_day,
            today,
        }
    }

    pub fn preferred_day(&self) -> PreferredDay {
        self.preferred_day
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// The cycle containing today
    pub fn current_cycle(&self) -> BudgetCycle {
        self.cycle_for_date(self.today)
    }

    /// The cycle containing `date`
    pub fn cycle_for_date(&self, date: NaiveDate) -> BudgetCycle {
        BudgetCycle::resolve(self.preferred_day, date)
    }

    /// Parse a cycle reference or use the current cycle
    pub fn parse_or_current(&self, reference: Option<&str>) -> MonetaResult<BudgetCycle> {
        match reference {
            Some(s) => self.parse(s),
            None => Ok(self.current_cycle()),
        }
    }

    /// Parse a cycle reference
    ///
    /// Formats supported:
    /// - "current", "now", "this"
    /// - "last", "previous", "prev"
    /// - "next"
    /// - any date inside the cycle: "2025-01-20"
    pub fn parse(&self, s: &str) -> MonetaResult<BudgetCycle> {
        let s_lower = s.trim().to_lowercase();

        match s_lower.as_str() {
            "current" | "now" | "this" => Ok(self.current_cycle()),
            "last" | "previous" | "prev" => Ok(self.current_cycle().prev()),
            "next" => Ok(self.current_cycle().next()),
            _ => NaiveDate::parse_from_str(&s_lower, "%Y-%m-%d")
                .map(|date| self.cycle_for_date(date))
                .map_err(|_| {
                    MonetaError::Validation(format!(
                        "Invalid cycle: '{}'. Use current, last, next or YYYY-MM-DD",
                        s.trim()
                    ))
                }),
        }
    }

    /// `count` consecutive cycles ending with `last`, oldest first
    pub fn cycles_ending(&self, last: BudgetCycle, count: usize) -> Vec<BudgetCycle> {
        let mut cycles = Vec::with_capacity(count);
        let mut cycle = last;

        for _ in 0..count {
            cycles.push(cycle);
            cycle = cycle.prev();
        }

        cycles.reverse();
        cycles
    }
}
