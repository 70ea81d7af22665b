//! Show command handler.
//!
//! Fetches one run's detail and prints its summary and logs.

use super::runs::fetch_spinner;
use crate::client::{HttpClient, RunsApi};
use crate::config::Config;
use crate::error::Result;
use crate::output::print_run_detail;

/// Print the summary and log lines of the run with the given id.
pub fn show_command(config: &Config, id: i64) -> Result<()> {
    let api = HttpClient::new(&config.server_url);

    let spinner = fetch_spinner("Fetching run detail...");
    let outcome = api.run_detail(id);
    spinner.finish_and_clear();

    print_run_detail(&outcome?);
    Ok(())
}
