//! Typed client over a `Transport`
//!
//! Attaches the session cookie to every request, captures cookies from
//! responses, and turns non-success statuses into `MonetaError`s.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::{MonetaError, MonetaResult};
use crate::session::Session;

/// Client for the Moneta REST API
pub struct ApiClient {
    transport: Box<dyn Transport>,
    session: Session,
    session_changed: bool,
}

impl ApiClient {
    /// Create a client that sends through `transport` on behalf of `session`
    pub fn new(transport: impl Transport + 'static, session: Session) -> Self {
        Self {
            transport: Box::new(transport),
            session,
            session_changed: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the session; marks it as changed
    pub fn session_mut(&mut self) -> &mut Session {
        self.session_changed = true;
        &mut self.session
    }

    /// Whether the session must be written back to disk
    pub fn session_changed(&self) -> bool {
        self.session_changed
    }

    // --------------------------------------------------------------------
    // Request helpers
    // --------------------------------------------------------------------

    /// `GET path?query`, decoding the JSON body
    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> MonetaResult<T> {
        let response = self.execute(Method::GET, path, query, None)?;
        decode(response.body)
    }

    /// `GET` a list; an empty or null body is an empty list
    pub fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> MonetaResult<Vec<T>> {
        let response = self.execute(Method::GET, path, query, None)?;
        match response.body {
            Value::Null => Ok(Vec::new()),
            body => decode(body),
        }
    }

    /// `GET` one page of a list along with the server's total item count
    pub fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> MonetaResult<(Vec<T>, Option<u64>)> {
        let response = self.execute(Method::GET, path, query, None)?;
        let total = response.total_count;
        let items = match response.body {
            Value::Null => Vec::new(),
            body => decode(body)?,
        };
        Ok((items, total))
    }

    /// `POST` a JSON body and decode the response
    pub fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> MonetaResult<T> {
        let response = self.execute(Method::POST, path, query, Some(serde_json::to_value(body)?))?;
        decode(response.body)
    }

    /// `PUT` a JSON body, ignoring the response body
    pub fn put<B: Serialize>(&self, path: &str, body: &B) -> MonetaResult<()> {
        self.execute(Method::PUT, path, &[], Some(serde_json::to_value(body)?))?;
        Ok(())
    }

    /// `DELETE path`
    pub fn delete(&self, path: &str) -> MonetaResult<()> {
        self.execute(Method::DELETE, path, &[], None)?;
        Ok(())
    }

    /// Send a request whose response may set session cookies (login,
    /// logout, profile updates) and decode the body
    pub fn send_with_cookies<T: DeserializeOwned>(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> MonetaResult<T> {
        let response = self.execute(method, path, &[], body)?;
        self.capture_cookies(&response);
        decode(response.body)
    }

    /// Like `send_with_cookies` but discards the body
    pub fn send_with_cookies_unit(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> MonetaResult<()> {
        let response = self.execute(method, path, &[], body)?;
        self.capture_cookies(&response);
        Ok(())
    }

    fn capture_cookies(&mut self, response: &ApiResponse) {
        let mut changed = false;
        for header in &response.set_cookies {
            changed |= self.session.store_cookie(header);
        }
        if changed {
            debug!("session cookies updated");
            self.session_changed = true;
        }
    }

    fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> MonetaResult<ApiResponse> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body,
            cookie: self.session.cookie_header(),
        };

        debug!("{} {}", request.method, request.path);
        let response = self.transport.send(&request)?;
        check_status(&request, response)
    }
}

/// Map non-success responses to errors, preferring the server's `message`
fn check_status(request: &ApiRequest, response: ApiResponse) -> MonetaResult<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let message = error_message(&response.body)
        .unwrap_or_else(|| format!("{} {} failed", request.method, request.path));
    warn!(
        "{} {} failed with status {}: {}",
        request.method, request.path, response.status, message
    );

    Err(match response.status {
        401 => MonetaError::Unauthorized,
        403 => MonetaError::Forbidden(message),
        404 => MonetaError::NotFound {
            entity_type: "Resource",
            identifier: request.path.clone(),
        },
        status => MonetaError::Api { status, message },
    })
}

fn error_message(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(capitalize),
        Value::String(s) if !s.is_empty() => Some(capitalize(s)),
        _ => None,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> MonetaResult<T> {
    serde_json::from_value(body)
        .map_err(|e| MonetaError::Json(format!("Unexpected response from server: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn test_attaches_cookie_and_query() {
        let mock = MockTransport::new().respond(Method::GET, "/expenses", 200, json!([]));
        let log = mock.log();
        let mut session = Session::default();
        session.store_cookie("token=abc");
        let client = ApiClient::new(mock, session);

        let expenses: Vec<Value> = client
            .get_list("/expenses", &[("page", "0".to_string())])
            .unwrap();
        assert!(expenses.is_empty());

        let sent = log.last().unwrap();
        assert_eq!(sent.cookie.as_deref(), Some("token=abc"));
        assert_eq!(sent.query_value("page"), Some("0"));
    }

    #[test]
    fn test_null_list_is_empty() {
        let mock = MockTransport::new().respond(Method::GET, "/categories", 200, Value::Null);
        let client = ApiClient::new(mock, Session::default());
        let cats: Vec<Value> = client.get_list("/categories", &[]).unwrap();
        assert!(cats.is_empty());
    }

    #[test]
    fn test_error_mapping() {
        let mock = MockTransport::new()
            .respond(Method::GET, "/users/me", 401, Value::Null)
            .respond(Method::GET, "/categories", 403, Value::Null)
            .respond(
                Method::DELETE,
                "/categories/3",
                409,
                json!({"message": "category has expenses"}),
            );
        let client = ApiClient::new(mock, Session::default());

        let err = client.get::<Value>("/users/me", &[]).unwrap_err();
        assert!(err.is_unauthorized());

        let err = client.get::<Value>("/categories", &[]).unwrap_err();
        assert!(matches!(err, MonetaError::Forbidden(_)));

        let err = client.delete("/categories/3").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Request failed with status 409: Category has expenses"
        );
    }

    #[test]
    fn test_cookie_capture_marks_session_changed() {
        let mock = MockTransport::new().respond_with(
            Method::POST,
            "/auth/login",
            ApiResponse {
                status: 200,
                body: json!({"id": 1, "email": "a@b.c"}),
                set_cookies: vec!["token=xyz; HttpOnly".into()],
                total_count: None,
            },
        );
        let mut client = ApiClient::new(mock, Session::default());
        assert!(!client.session_changed());

        let _: Value = client
            .send_with_cookies(Method::POST, "/auth/login", Some(json!({})))
            .unwrap();
        assert!(client.session_changed());
        assert_eq!(client.session().cookie_header().as_deref(), Some("token=xyz"));
    }

    #[test]
    fn test_bad_body_is_json_error() {
        let mock = MockTransport::new().respond(Method::GET, "/expenses/total", 200, json!("n/a"));
        let client = ApiClient::new(mock, Session::default());
        let err = client.get::<f64>("/expenses/total", &[]).unwrap_err();
        assert!(matches!(err, MonetaError::Json(_)));
    }
}
