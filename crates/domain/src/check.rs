//! Check outcomes and run reporting.
//!
//! This module provides the types produced by the smoke suite: the
//! expectation a check holds against a status code, the outcome of a
//! single check, and the aggregate report for a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Expected status code value, range, or set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get a description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Create an exact status expectation.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }

    /// Create a one-of expectation.
    #[must_use]
    pub fn one_of(codes: impl Into<Vec<u16>>) -> Self {
        Self::OneOf(codes.into())
    }

    /// Expectation for a newly created entity (200 or 201).
    #[must_use]
    pub fn created() -> Self {
        Self::OneOf(vec![200, 201])
    }

    /// Expectation for a responsive server root (200 or 302).
    #[must_use]
    pub fn responsive() -> Self {
        Self::OneOf(vec![200, 302])
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// Result of running a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The check name (e.g., "Create account").
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Supporting details (status code, captured id, error message).
    pub details: Option<String>,
}

impl CheckOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            details: None,
        }
    }

    /// Create a passed outcome with details.
    #[must_use]
    pub fn pass_with(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            details: Some(details.into()),
        }
    }

    /// Create a failed outcome with details.
    #[must_use]
    pub fn fail(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            details: Some(details.into()),
        }
    }
}

/// Aggregate results of a suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier for this run.
    pub id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Individual check outcomes, in execution order.
    pub outcomes: Vec<CheckOutcome>,
    /// Total number of checks executed.
    pub total: usize,
    /// Number of passed checks.
    pub passed: usize,
    /// Number of failed checks.
    pub failed: usize,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
    /// Whether the run was aborted by a failed gating step.
    pub aborted: bool,
}

impl RunReport {
    /// Create a new report from collected outcomes.
    #[must_use]
    pub fn new(
        started_at: DateTime<Utc>,
        outcomes: Vec<CheckOutcome>,
        duration_ms: u64,
        aborted: bool,
    ) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed).count();
        let failed = total - passed;

        Self {
            id: Uuid::now_v7(),
            started_at,
            outcomes,
            total,
            passed,
            failed,
            duration_ms,
            aborted,
        }
    }

    /// Check if every check passed and the run completed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0 && !self.aborted
    }

    /// Get pass rate as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
