pub mod client;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod model;
pub mod monitor;
pub mod output;
pub mod resource;

pub use client::{HttpClient, RunsApi};
pub use config::Config;
pub use error::{Result, RunwatchError};
pub use model::{duration_of, visual_for, LogEntry, Run, RunDetail, RunStatus};
pub use resource::{Loader, Resource};
