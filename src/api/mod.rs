//! Moneta REST API access
//!
//! - `transport`: request/response types, the `Transport` trait and the
//!   reqwest-backed `HttpTransport`
//! - `client`: `ApiClient`, which adds session cookies and error mapping

pub mod client;
pub mod transport;

#[cfg(test)]
pub mod mock;

pub use client::ApiClient;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
