//! Command-line interface definition.

use clap::Parser;

use fincheck_domain::config::{DEFAULT_API_ROOT, DEFAULT_BASE_URL};

/// Smoke checks for a personal finance REST API.
///
/// Registers a throwaway user, logs in, then exercises the accounts,
/// categories, transactions, budgets, groups, analytics, and
/// currencies endpoints, printing a pass/fail line per check.
#[derive(Debug, Parser)]
#[command(name = "fincheck", version, about)]
pub struct Cli {
    /// Base URL of the target server.
    #[arg(long, env = "FINCHECK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API root mounted under the base URL.
    #[arg(long, env = "FINCHECK_API_ROOT", default_value = DEFAULT_API_ROOT)]
    pub api_root: String,

    /// Register and log in with a fixed email instead of a generated
    /// one. Requires --password.
    #[arg(long, env = "FINCHECK_EMAIL", requires = "password")]
    pub email: Option<String>,

    /// Password for --email.
    #[arg(long, env = "FINCHECK_PASSWORD", requires = "email")]
    pub password: Option<String>,

    /// Request timeout in seconds (the health check always uses 5).
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}
