//! Command handlers for the runwatch CLI.

pub mod monitor;
pub mod runs;
pub mod show;

pub use monitor::monitor_command;
pub use runs::runs_command;
pub use show::show_command;
