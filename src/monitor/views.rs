//! View definitions for the monitor TUI.

use std::fmt;

/// The screens the monitor can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Table of all runs; the entry screen.
    RunList,
    /// Summary and logs for one run.
    RunDetail { run_id: i64 },
}

impl View {
    /// Breadcrumb trail shown in the header, labelling the current screen
    /// and the way back to the list.
    pub fn breadcrumb(&self) -> String {
        match self {
            View::RunList => "Runs".to_string(),
            View::RunDetail { run_id } => format!("Runs > Run #{run_id}"),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.breadcrumb())
    }
}
