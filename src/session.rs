//! Login session persistence
//!
//! The session is a plain value: loaded once at startup, handed to the
//! `ApiClient`, updated by auth responses, and written back only when it
//! changed. Nothing reads it through global state.

use serde::{Deserialize, Serialize};

use crate::config::paths::MonetaPaths;
use crate::error::{MonetaError, MonetaResult};
use crate::models::User;

/// Cookies and cached profile for the logged-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// `name=value` pairs captured from `Set-Cookie`
    #[serde(default)]
    cookies: Vec<String>,

    /// Profile returned by the last auth or `/users/me` call
    #[serde(default)]
    user: Option<User>,
}

impl Session {
    /// Load the saved session, or an empty one if none exists
    pub fn load(paths: &MonetaPaths) -> MonetaResult<Self> {
        let path = paths.session_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| MonetaError::Session(format!("Failed to read session file: {}", e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| MonetaError::Session(format!("Failed to parse session file: {}", e)))
    }

    /// Write the session to disk; an empty session removes the file
    pub fn save(&self, paths: &MonetaPaths) -> MonetaResult<()> {
        if self.is_empty() {
            return Self::clear(paths);
        }

        paths.ensure_directories()?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.session_file(), contents)
            .map_err(|e| MonetaError::Session(format!("Failed to write session file: {}", e)))
    }

    /// Delete the saved session
    pub fn clear(paths: &MonetaPaths) -> MonetaResult<()> {
        let path = paths.session_file();
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                MonetaError::Session(format!("Failed to remove session file: {}", e))
            })?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty() && self.user.is_none()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The logged-in user, or `Unauthorized`
    pub fn require_user(&self) -> MonetaResult<&User> {
        self.user.as_ref().ok_or(MonetaError::Unauthorized)
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Value for the `Cookie` request header
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            None
        } else {
            Some(self.cookies.join("; "))
        }
    }

    /// Record a `Set-Cookie` header, replacing any cookie of the same name.
    /// Returns whether the stored cookies changed.
    pub fn store_cookie(&mut self, set_cookie: &str) -> bool {
        let pair = set_cookie.split(';').next().unwrap_or("").trim();
        let Some((name, value)) = pair.split_once('=') else {
            return false;
        };
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let before = self.cookies.clone();
        self.cookies
            .retain(|c| c.split_once('=').map(|(n, _)| n) != Some(name));

        // An empty value or explicit expiry is the server deleting the cookie
        let lower = set_cookie.to_ascii_lowercase();
        let deleted = value.is_empty() || lower.contains("max-age=0");
        if !deleted {
            self.cookies.push(format!("{}={}", name, value.trim()));
        }

        self.cookies != before
    }

    /// Forget cookies and user
    pub fn reset(&mut self) {
        self.cookies.clear();
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use tempfile::TempDir;

    fn user() -> User {
        User {
            id: UserId::new(1),
            name: Some("Asha".into()),
            email: "asha@example.com".into(),
            budget_start_date: Some(15),
        }
    }

    #[test]
    fn test_store_cookie_replaces_by_name() {
        let mut session = Session::default();
        assert!(session.store_cookie("JSESSIONID=abc; Path=/; HttpOnly"));
        assert!(session.store_cookie("XSRF-TOKEN=t1; Path=/"));
        assert!(session.store_cookie("JSESSIONID=def; Path=/"));
        assert_eq!(
            session.cookie_header().unwrap(),
            "XSRF-TOKEN=t1; JSESSIONID=def"
        );
        assert!(!session.store_cookie("JSESSIONID=def; Path=/"));
    }

    #[test]
    fn test_store_cookie_deletion() {
        let mut session = Session::default();
        session.store_cookie("token=abc");
        assert!(session.store_cookie("token=; Max-Age=0; Path=/"));
        assert!(session.cookie_header().is_none());
        assert!(!session.store_cookie("garbage"));
    }

    #[test]
    fn test_require_user() {
        let mut session = Session::default();
        assert!(session.require_user().unwrap_err().is_unauthorized());
        session.set_user(Some(user()));
        assert_eq!(session.require_user().unwrap().email, "asha@example.com");
    }

    #[test]
    fn test_save_load_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MonetaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut session = Session::default();
        session.store_cookie("token=abc");
        session.set_user(Some(user()));
        session.save(&paths).unwrap();

        let loaded = Session::load(&paths).unwrap();
        assert_eq!(loaded, session);

        Session::default().save(&paths).unwrap();
        assert!(!paths.session_file().exists());
        assert!(Session::load(&paths).unwrap().is_empty());
    }
}
