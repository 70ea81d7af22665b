//! Runs command handler.
//!
//! Fetches the run collection once and prints it as a table.

use crate::client::{HttpClient, RunsApi};
use crate::config::Config;
use crate::error::Result;
use crate::output::print_runs_table;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print all runs known to the backend.
pub fn runs_command(config: &Config) -> Result<()> {
    let api = HttpClient::new(&config.server_url);

    let spinner = fetch_spinner("Fetching runs...");
    let outcome = api.list_runs();
    spinner.finish_and_clear();

    let runs = outcome?;
    print_runs_table(&runs);
    Ok(())
}

/// Spinner shown while a one-shot command waits on the backend.
pub(crate) fn fetch_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
