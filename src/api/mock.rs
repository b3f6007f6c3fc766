//! Scripted in-memory transport for tests

use reqwest::Method;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::error::{MonetaError, MonetaResult};

enum Scripted {
    Response(ApiResponse),
    Offline,
}

/// Requests seen by a `MockTransport`, shared with the test after the
/// transport has been moved into a client
#[derive(Clone, Default)]
pub struct RequestLog(Rc<RefCell<Vec<ApiRequest>>>);

impl RequestLog {
    pub fn all(&self) -> Vec<ApiRequest> {
        self.0.borrow().clone()
    }

    pub fn last(&self) -> Option<ApiRequest> {
        self.0.borrow().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    /// Requests matching a method and path
    pub fn matching(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.0
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }
}

/// Answers each request with the first unused scripted response for the
/// same method and path
#[derive(Default)]
pub struct MockTransport {
    script: RefCell<Vec<(Method, String, Scripted)>>,
    log: RequestLog,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.respond_with(method, path, ApiResponse::new(status, body))
    }

    pub fn respond_with(self, method: Method, path: &str, response: ApiResponse) -> Self {
        self.script
            .borrow_mut()
            .push((method, path.to_string(), Scripted::Response(response)));
        self
    }

    /// Simulate a connection failure
    pub fn offline(self, method: Method, path: &str) -> Self {
        self.script
            .borrow_mut()
            .push((method, path.to_string(), Scripted::Offline));
        self
    }

    pub fn log(&self) -> RequestLog {
        self.log.clone()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> MonetaResult<ApiResponse> {
        self.log.0.borrow_mut().push(request.clone());

        let mut script = self.script.borrow_mut();
        let position = script
            .iter()
            .position(|(m, p, _)| *m == request.method && *p == request.path);

        match position.map(|i| script.remove(i)) {
            Some((_, _, Scripted::Response(response))) => Ok(response),
            Some((_, _, Scripted::Offline)) => {
                Err(MonetaError::Http("connection refused".into()))
            }
            None => Err(MonetaError::Http(format!(
                "no mock response for {} {}",
                request.method, request.path
            ))),
        }
    }
}
