//! Authentication service
//!
//! Logs in and out against the API and keeps the session's cached user in
//! step with the server.

use reqwest::Method;
use serde_json::json;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::api::ApiClient;
use crate::error::{MonetaError, MonetaResult};
use crate::models::{PreferredDay, User};

/// Email/password pair; the password is wiped from memory on drop
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    fn validate(&self) -> MonetaResult<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(MonetaError::Validation(format!(
                "Invalid email address: '{}'",
                email
            )));
        }
        if self.password.is_empty() {
            return Err(MonetaError::Validation("Password cannot be empty".into()));
        }
        Ok(())
    }
}

/// Service for login, logout and profile settings
pub struct AuthService<'a> {
    client: &'a mut ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    pub fn new(client: &'a mut ApiClient) -> Self {
        Self { client }
    }

    /// Register a new account
    pub fn signup(&mut self, name: &str, credentials: &Credentials) -> MonetaResult<()> {
        credentials.validate()?;
        if name.trim().is_empty() {
            return Err(MonetaError::Validation("Name cannot be empty".into()));
        }

        let body = json!({
            "name": name.trim(),
            "email": credentials.email.trim(),
            "password": credentials.password.as_str(),
        });
        self.client
            .send_with_cookies_unit(Method::POST, "/auth/signup", Some(body))?;
        info!("registered {}", credentials.email.trim());
        Ok(())
    }

    /// Log in with email and password
    pub fn login(&mut self, credentials: &Credentials) -> MonetaResult<User> {
        credentials.validate()?;

        let body = json!({
            "email": credentials.email.trim(),
            "password": credentials.password.as_str(),
        });
        let user: User = self
            .client
            .send_with_cookies(Method::POST, "/auth/login", Some(body))?;
        self.client.session_mut().set_user(Some(user.clone()));
        info!("logged in as {}", user.email);
        Ok(user)
    }

    /// Log in with a Google OAuth authorization code
    pub fn login_google(&mut self, code: &str) -> MonetaResult<User> {
        let code = code.trim();
        if code.is_empty() {
            return Err(MonetaError::Validation(
                "Authorization code cannot be empty".into(),
            ));
        }

        let user: User = self.client.send_with_cookies(
            Method::POST,
            "/auth/google",
            Some(json!({ "code": code })),
        )?;
        self.client.session_mut().set_user(Some(user.clone()));
        Ok(user)
    }

    /// Log out. The local session is cleared even if the server call fails.
    pub fn logout(&mut self) -> MonetaResult<()> {
        if let Err(err) = self
            .client
            .send_with_cookies_unit(Method::POST, "/auth/logout", None)
        {
            warn!("server logout failed: {}", err);
        }
        self.client.session_mut().reset();
        Ok(())
    }

    /// Fetch the current user from the server and refresh the session copy
    pub fn whoami(&mut self) -> MonetaResult<User> {
        match self.client.get::<User>("/users/me", &[]) {
            Ok(user) => {
                self.client.session_mut().set_user(Some(user.clone()));
                Ok(user)
            }
            Err(MonetaError::Unauthorized) => {
                // Stale cookies are useless; drop them
                self.client.session_mut().reset();
                Err(MonetaError::Unauthorized)
            }
            Err(err) => Err(err),
        }
    }

    /// Change the day of the month on which budget cycles start
    pub fn set_budget_start_day(&mut self, day: PreferredDay) -> MonetaResult<User> {
        let user_id = self.client.session().require_user()?.id;

        let user: User = self.client.send_with_cookies(
            Method::PATCH,
            &format!("/users/{}", user_id),
            Some(json!({ "budgetStartDate": day.get() })),
        )?;
        self.client.session_mut().set_user(Some(user.clone()));
        info!("budget start day set to {}", day);
        Ok(user)
    }
}
