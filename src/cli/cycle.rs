//! Budget cycle CLI commands
//!
//! `cycle show` works offline: with `--day` it needs no session at all,
//! otherwise it uses the start day cached from the last login.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::api::ApiClient;
use crate::display::{format_cycle, format_cycle_list};
use crate::error::{MonetaError, MonetaResult};
use crate::models::PreferredDay;
use crate::services::{AuthService, CycleService};
use crate::session::Session;

/// Cycle subcommands
#[derive(Subcommand)]
pub enum CycleCommands {
    /// Show the budget cycle containing a date
    Show {
        /// Budget start day (1-31); defaults to your saved start day
        #[arg(short = 'd', long)]
        day: Option<PreferredDay>,
        /// Reference date (YYYY-MM-DD), or current/last/next
        #[arg(long)]
        date: Option<String>,
        /// Also list this many cycles ending with the selected one (1-120)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u16).range(1..=120))]
        count: Option<u16>,
    },

    /// Change the day of the month your budget cycle starts on
    #[command(name = "set-day")]
    SetDay {
        /// Day of the month (1-31); shorter months use their last day
        day: PreferredDay,
    },
}

/// Preferred day from the session, or the default when not logged in
pub fn session_preferred_day(session: &Session) -> PreferredDay {
    session.user().map(|u| u.preferred_day()).unwrap_or_default()
}

/// Handle a cycle command that needs no network access
pub fn handle_cycle_show(
    session: &Session,
    day: Option<PreferredDay>,
    date: Option<&str>,
    count: Option<u16>,
) -> MonetaResult<()> {
    let today = Local::now().date_naive();
    let preferred_day = day.unwrap_or_else(|| session_preferred_day(session));
    let service = CycleService::with_today(preferred_day, today);

    let cycle = service.parse_or_current(date)?;
    print!("{}", format_cycle(&cycle, today));

    if let Some(count) = count.filter(|c| *c > 1) {
        let cycles = service.cycles_ending(cycle, usize::from(count));
        println!();
        print!("{}", format_cycle_list(&cycles, today));
    }

    Ok(())
}

/// Handle `moneta cycle set-day`
pub fn handle_set_day(client: &mut ApiClient, day: PreferredDay) -> MonetaResult<()> {
    let user = AuthService::new(client).set_budget_start_day(day)?;
    let today = Local::now().date_naive();
    let cycle = CycleService::with_today(user.preferred_day(), today).current_cycle();

    println!("Budget cycles now start on day {}.", user.preferred_day());
    print!("{}", format_cycle(&cycle, today));
    Ok(())
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> MonetaResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        MonetaError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, UserId};

    #[test]
    fn test_session_preferred_day() {
        let mut session = Session::default();
        assert_eq!(session_preferred_day(&session), PreferredDay::default());

        session.set_user(Some(User {
            id: UserId::new(1),
            name: None,
            email: "a@b.c".into(),
            budget_start_date: Some(25),
        }));
        assert_eq!(session_preferred_day(&session).get(), 25);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").unwrap_err().is_validation());
    }
}
