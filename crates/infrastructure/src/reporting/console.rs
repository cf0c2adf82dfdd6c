//! Console reporter.
//!
//! Prints the run as colored `✓ PASS` / `✗ FAIL` lines grouped under
//! ruled section banners, with a header naming the target and a final
//! summary banner.

use chrono::{DateTime, Utc};
use console::style;

use fincheck_application::ports::Reporter;
use fincheck_domain::{CheckOutcome, RunReport};

const RULER_WIDTH: usize = 60;

/// Reporter that writes colored progress lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Creates a console reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Globally enables or disables color output.
    pub fn set_color(enabled: bool) {
        console::set_colors_enabled(enabled);
    }

    fn ruler() -> String {
        "=".repeat(RULER_WIDTH)
    }
}

impl Reporter for ConsoleReporter {
    fn started(&mut self, base_url: &str, api_base: &str, at: DateTime<Utc>) {
        let ruler = Self::ruler();
        println!("\n{}", style(&ruler).yellow());
        println!("{}", style("FINCHECK API SMOKE SUITE").yellow());
        println!("{}", style(&ruler).yellow());
        println!("Base URL: {base_url}");
        println!("API URL: {api_base}");
        println!("Time: {}", at.format("%Y-%m-%d %H:%M:%S"));
    }

    fn section(&mut self, title: &str) {
        let ruler = Self::ruler();
        println!("\n{}", style(&ruler).blue());
        println!("{}", style(title).blue());
        println!("{}", style(&ruler).blue());
    }

    fn outcome(&mut self, outcome: &CheckOutcome) {
        let status = if outcome.passed {
            style("✓ PASS").green()
        } else {
            style("✗ FAIL").red()
        };
        println!("{status} - {}", outcome.name);
        if let Some(details) = &outcome.details {
            println!("  {details}");
        }
    }

    fn aborted(&mut self, message: &str) {
        println!("\n{}", style(message).red());
    }

    fn summary(&mut self, report: &RunReport) {
        let ruler = Self::ruler();
        println!("\n{}", style(&ruler).yellow());
        if report.all_passed() {
            println!("{}", style("SMOKE SUITE COMPLETED").green());
        } else {
            println!("{}", style("SMOKE SUITE FAILED").red());
        }
        println!(
            "{}/{} checks passed ({:.0}%) in {} ms",
            report.passed,
            report.total,
            report.pass_rate(),
            report.duration_ms
        );
        println!("{}\n", style(&ruler).yellow());
    }
}
