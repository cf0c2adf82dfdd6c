//! Fincheck - Main entry point
//!
//! Wires the reqwest client, system clock, and console reporter into
//! the smoke runner and maps the report onto the process exit code.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser as _;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fincheck_application::SmokeRunner;
use fincheck_domain::{Credentials, RunConfig, RunReport};
use fincheck_infrastructure::{ConsoleReporter, ReqwestHttpClient, SystemClock};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli).await {
        Ok(report) if report.all_passed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!("fincheck could not start: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the configuration and adapters, then runs the suite.
async fn run(cli: Cli) -> Result<RunReport, Box<dyn std::error::Error>> {
    let mut config = RunConfig::new(&cli.base_url, &cli.api_root)?
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    if let (Some(email), Some(password)) = (cli.email, cli.password) {
        config = config.with_credentials(Credentials::new(email, password)?);
    }

    if cli.no_color {
        ConsoleReporter::set_color(false);
    }

    let client = ReqwestHttpClient::new()?;
    let runner = SmokeRunner::new(client, SystemClock::new(), ConsoleReporter::new(), config);
    Ok(runner.run().await)
}
