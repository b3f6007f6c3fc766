//! Authenticated user profile

use serde::{Deserialize, Serialize};

use super::cycle::PreferredDay;
use super::ids::UserId;

/// The logged-in user as returned by `/users/me` and the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,

    #[serde(default)]
    pub name: Option<String>,

    pub email: String,

    /// Preferred budget start day; unset for brand-new accounts
    #[serde(default)]
    pub budget_start_date: Option<u32>,
}

impl User {
    /// The user's budget start day, falling back to the 1st when unset or
    /// outside 1-31
    pub fn preferred_day(&self) -> PreferredDay {
        self.budget_start_date
            .and_then(|day| PreferredDay::new(day).ok())
            .unwrap_or_default()
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_user() {
        let user: User = serde_json::from_str(
            r#"{"id": 3, "name": "Asha", "email": "asha@example.com", "budgetStartDate": 25}"#,
        )
        .unwrap();
        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.preferred_day().get(), 25);
        assert_eq!(user.display_name(), "Asha");
    }

    #[test]
    fn test_preferred_day_fallback() {
        let user: User =
            serde_json::from_str(r#"{"id": 3, "email": "a@b.c", "budgetStartDate": null}"#).unwrap();
        assert_eq!(user.preferred_day().get(), 1);
        assert_eq!(user.display_name(), "a@b.c");
    }
}
