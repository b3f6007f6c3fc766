//! Moneta - terminal client for the Moneta personal-finance API
//!
//! This library provides the core functionality behind the `moneta` binary:
//! an HTTP client for the Moneta REST API, the budget-cycle calculations the
//! reports are built on, and terminal formatting.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `session`: Saved login cookies and cached profile
//! - `api`: Transport abstraction and the authenticated API client
//! - `models`: Core data models (categories, budgets, expenses, cycles)
//! - `services`: Business logic layer over the API
//! - `reports`: Cycle summary and spending reports
//! - `display`: Terminal formatting
//! - `cli`: clap command definitions and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use moneta::models::{BudgetCycle, PreferredDay};
//!
//! let cycle = BudgetCycle::current("25".parse::<PreferredDay>()?);
//! println!("{}", cycle);
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;

pub use error::{MonetaError, MonetaResult};
