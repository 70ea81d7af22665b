//! Monitor TUI - a read-only dashboard over the pipeline backend.
//!
//! The monitor has two screens, each a self-contained fetch-render unit:
//! - Run list: every run the backend knows about, one table row per run
//! - Run detail: one run's summary plus its task log lines
//!
//! Keyboard navigation:
//! - Arrow keys: move the selection
//! - Enter: open the selected run's detail
//! - Esc: back to the run list (re-fetching it)
//! - Q: quit

pub mod app;
pub mod views;

pub use app::{run_monitor, MonitorApp, RunDetailView, RunListView};
pub use views::View;
