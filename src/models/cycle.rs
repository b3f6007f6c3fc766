//! Budget cycle representation
//!
//! A budget cycle is a month-long window anchored to the user's preferred
//! start day. When the preferred day does not exist in a month (the 31st in
//! April, the 30th in February) the cycle starts on that month's last day.

use chrono::{Datelike, Local, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::{MonetaError, MonetaResult};

/// Day of the month (1-31) on which each budget cycle starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreferredDay(u32);

impl PreferredDay {
    /// Validate and wrap a preferred day
    pub fn new(day: u32) -> MonetaResult<Self> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(MonetaError::Validation(format!(
                "Budget start day must be between 1 and 31, got {}",
                day
            )))
        }
    }

    /// Get the raw day number
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PreferredDay {
    fn default() -> Self {
        Self(1)
    }
}

impl FromStr for PreferredDay {
    type Err = MonetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day: u32 = s.trim().parse().map_err(|_| {
            MonetaError::Validation(format!(
                "Invalid day entered: '{}'. Please enter a number between 1 and 31.",
                s.trim()
            ))
        })?;
        Self::new(day)
    }
}

impl fmt::Display for PreferredDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        // Only December of chrono's last year has no following month
        .unwrap_or(31)
}

/// The preferred day placed inside the month of `date_in_month`, clamped to
/// that month's length.
fn anchor_in_month(date_in_month: NaiveDate, day: PreferredDay) -> NaiveDate {
    let last = days_in_month(date_in_month.year(), date_in_month.month());
    date_in_month
        .with_day(day.get().min(last))
        .unwrap_or(date_in_month)
}

/// Some date in the month before `date`'s month
fn in_previous_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.pred_opt()
}

/// Some date in the month after `date`'s month
fn in_next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(1))
}

/// A resolved budget cycle: inclusive start and end dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BudgetCycle {
    start_date: NaiveDate,
    end_date: NaiveDate,
    preferred_day: PreferredDay,
}

impl BudgetCycle {
    /// Compute the cycle containing `reference_date`.
    ///
    /// The end date is always the day before the next cycle's (clamped)
    /// start, so consecutive cycles never overlap or leave gaps. A cycle
    /// that would reach past `NaiveDate::MIN` or `NaiveDate::MAX` is cut off
    /// at that limit.
    pub fn resolve(preferred_day: PreferredDay, reference_date: NaiveDate) -> Self {
        let mut start_date = anchor_in_month(reference_date, preferred_day);
        if reference_date < start_date {
            start_date = in_previous_month(reference_date)
                .map(|d| anchor_in_month(d, preferred_day))
                .unwrap_or(NaiveDate::MIN);
        }

        let end_date = in_next_month(start_date)
            .map(|d| anchor_in_month(d, preferred_day))
            .and_then(|next_start| next_start.pred_opt())
            .unwrap_or(NaiveDate::MAX);

        Self {
            start_date,
            end_date,
            preferred_day,
        }
    }

    /// The cycle containing today (local time)
    pub fn current(preferred_day: PreferredDay) -> Self {
        Self::resolve(preferred_day, Local::now().date_naive())
    }

    /// First day of the cycle
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the cycle (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The preferred day this cycle was resolved with
    pub fn preferred_day(&self) -> PreferredDay {
        self.preferred_day
    }

    /// Check if a date falls within this cycle
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Number of days in the cycle
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Iterate over every day of the cycle in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }

    /// Get the next cycle
    pub fn next(&self) -> Self {
        let after = self.end_date.succ_opt().unwrap_or(self.end_date);
        Self::resolve(self.preferred_day, after)
    }

    /// Get the previous cycle
    pub fn prev(&self) -> Self {
        let before = self.start_date.pred_opt().unwrap_or(self.start_date);
        Self::resolve(self.preferred_day, before)
    }

    /// `startDate` / `endDate` query parameters as the API expects them
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("startDate", self.start_date.format("%Y-%m-%d").to_string()),
            ("endDate", self.end_date.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl fmt::Display for BudgetCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

/// Resolve the budget cycle for a preferred day and reference date
pub fn resolve(preferred_day: PreferredDay, reference_date: NaiveDate) -> BudgetCycle {
    BudgetCycle::resolve(preferred_day, reference_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(d: u32) -> PreferredDay {
        PreferredDay::new(d).unwrap()
    }

    #[test]
    fn test_cycle_started_last_month() {
        let cycle = resolve(day(15), date(2024, 1, 10));
        assert_eq!(cycle.start_date(), date(2023, 12, 15));
        assert_eq!(cycle.end_date(), date(2024, 1, 14));
    }

    #[test]
    fn test_day_31_clamps_in_leap_february() {
        let cycle = resolve(day(31), date(2024, 2, 20));
        assert_eq!(cycle.start_date(), date(2024, 1, 31));
        assert_eq!(cycle.end_date(), date(2024, 2, 28));
    }

    #[test]
    fn test_day_31_on_last_day_of_february() {
        // Feb 29 is February's clamped start, so a new cycle begins that day.
        let cycle = resolve(day(31), date(2024, 2, 29));
        assert_eq!(cycle.start_date(), date(2024, 2, 29));
        assert_eq!(cycle.end_date(), date(2024, 3, 30));
    }

    #[test]
    fn test_first_of_month() {
        let cycle = resolve(day(1), date(2024, 3, 1));
        assert_eq!(cycle.start_date(), date(2024, 3, 1));
        assert_eq!(cycle.end_date(), date(2024, 3, 31));
        assert_eq!(cycle.num_days(), 31);
    }

    #[test]
    fn test_year_boundary() {
        let cycle = resolve(day(25), date(2024, 12, 31));
        assert_eq!(cycle.start_date(), date(2024, 12, 25));
        assert_eq!(cycle.end_date(), date(2025, 1, 24));
    }

    #[test]
    fn test_always_contains_reference_date() {
        for preferred in 1..=31 {
            let mut d = date(2023, 1, 1);
            while d <= date(2025, 12, 31) {
                let cycle = resolve(day(preferred), d);
                assert!(
                    cycle.contains(d),
                    "day {} date {} gave {}",
                    preferred,
                    d,
                    cycle
                );
                assert_eq!(
                    cycle.start_date().day(),
                    preferred.min(days_in_month(
                        cycle.start_date().year(),
                        cycle.start_date().month()
                    ))
                );
                d = d.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_cycles_are_contiguous() {
        for preferred in 1..=31 {
            let mut cycle = resolve(day(preferred), date(2023, 1, 1));
            for _ in 0..30 {
                let next = cycle.next();
                assert_eq!(cycle.end_date().succ_opt().unwrap(), next.start_date());
                assert_eq!(resolve(day(preferred), next.start_date()), next);
                assert_eq!(next.prev(), cycle);
                cycle = next;
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let a = resolve(day(30), date(2023, 3, 2));
        let b = resolve(day(30), date(2023, 3, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_days_iterates_whole_cycle() {
        let cycle = resolve(day(10), date(2023, 2, 15));
        let days: Vec<_> = cycle.days().collect();
        assert_eq!(days.len() as i64, cycle.num_days());
        assert_eq!(days.first(), Some(&date(2023, 2, 10)));
        assert_eq!(days.last(), Some(&date(2023, 3, 9)));
    }

    #[test]
    fn test_query_params_and_display() {
        let cycle = resolve(day(15), date(2024, 1, 10));
        let params = cycle.query_params();
        assert_eq!(params[0], ("startDate", "2023-12-15".to_string()));
        assert_eq!(params[1], ("endDate", "2024-01-14".to_string()));
        assert_eq!(cycle.to_string(), "2023-12-15..2024-01-14");
    }

    #[test]
    fn test_preferred_day_validation() {
        assert!(PreferredDay::new(0).is_err());
        assert!(PreferredDay::new(32).is_err());
        assert_eq!(PreferredDay::new(31).unwrap().get(), 31);
        assert_eq!("7".parse::<PreferredDay>().unwrap().get(), 7);
        assert!("seven".parse::<PreferredDay>().unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_at_date_range_limits() {
        for preferred in [1, 15, 31] {
            for reference in [NaiveDate::MIN, NaiveDate::MAX] {
                let cycle = resolve(day(preferred), reference);
                assert!(cycle.start_date() <= cycle.end_date(), "{}", cycle);
                assert!(cycle.contains(reference), "day {} gave {}", preferred, cycle);
            }
        }

        let last = resolve(day(31), NaiveDate::MAX);
        assert_eq!(last.start_date(), NaiveDate::MAX);
        assert_eq!(last.end_date(), NaiveDate::MAX);
        assert_eq!(last.next(), last);

        let first = resolve(day(31), NaiveDate::MIN);
        assert_eq!(first.start_date(), NaiveDate::MIN);
        assert_eq!(first.prev(), first);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
