//! Reporter port

use chrono::{DateTime, Utc};
use fincheck_domain::{CheckOutcome, RunReport};

/// Port for emitting run progress.
///
/// The console adapter prints colored pass/fail lines; tests use a
/// recording implementation.
pub trait Reporter: Send {
    /// Called once before the first check with the resolved targets.
    fn started(&mut self, base_url: &str, api_base: &str, at: DateTime<Utc>);

    /// Called when a new section of checks begins.
    fn section(&mut self, title: &str);

    /// Called after every check.
    fn outcome(&mut self, outcome: &CheckOutcome);

    /// Called when a gating step fails and the run stops early.
    fn aborted(&mut self, message: &str);

    /// Called once with the final report.
    fn summary(&mut self, report: &RunReport);
}
