//! Fincheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined
//! in the application crate: a reqwest-backed HTTP client, the system
//! clock, and the console reporter.

pub mod adapters;
pub mod reporting;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use reporting::ConsoleReporter;
