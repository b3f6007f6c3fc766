//! Budget cycle and profile display formatting

use chrono::NaiveDate;

use crate::models::{BudgetCycle, User};

/// Format one cycle, marking it when it contains `today`
pub fn format_cycle(cycle: &BudgetCycle, today: NaiveDate) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Budget cycle (starts on day {})\n",
        cycle.preferred_day()
    ));
    output.push_str(&format!("  Start: {}\n", cycle.start_date().format("%Y-%m-%d")));
    output.push_str(&format!("  End:   {}\n", cycle.end_date().format("%Y-%m-%d")));
    output.push_str(&format!("  Days:  {}\n", cycle.num_days()));

    if cycle.contains(today) {
        let left = (cycle.end_date() - today).num_days() + 1;
        output.push_str(&format!("  Left:  {} (including today)\n", left));
    }

    output
}

/// Format several cycles, one per line
pub fn format_cycle_list(cycles: &[BudgetCycle], today: NaiveDate) -> String {
    let mut output = String::new();
    for cycle in cycles {
        let marker = if cycle.contains(today) { "  <- current" } else { "" };
        output.push_str(&format!(
            "{}  {}  {:>2} days{}\n",
            cycle.start_date().format("%Y-%m-%d"),
            cycle.end_date().format("%Y-%m-%d"),
            cycle.num_days(),
            marker
        ));
    }
    output
}

/// Format the logged-in user's profile
pub fn format_user(user: &User) -> String {
    let mut output = String::new();
    output.push_str(&format!("Logged in as {}\n", user.display_name()));
    output.push_str(&format!("  ID:               {}\n", user.id));
    output.push_str(&format!("  Email:            {}\n", user.email));
    output.push_str(&format!(
        "  Budget start day: {}{}\n",
        user.preferred_day(),
        if user.budget_start_date.is_none() {
            " (default)"
        } else {
            ""
        }
    ));
    output
}
