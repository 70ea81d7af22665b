//! Monitor command handler.
//!
//! Launches the TUI dashboard over the configured backend.

use crate::client::HttpClient;
use crate::config::Config;
use crate::error::Result;
use crate::monitor::run_monitor;
use std::sync::Arc;

/// Launch the monitor TUI.
///
/// Returns when the user quits, or with an error if the terminal cannot
/// be initialized.
pub fn monitor_command(config: &Config) -> Result<()> {
    let api = Arc::new(HttpClient::new(&config.server_url));
    run_monitor(api)
}
