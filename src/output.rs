//! Terminal output formatting for the one-shot commands.
//!
//! The `runs` and `show` subcommands print to stdout instead of entering
//! the TUI. They reuse the same derivation rules as the monitor (status
//! visuals, duration, local-time formatting) so both surfaces agree on
//! what a run looks like.

use crate::model::{
    duration_of, format_local_datetime, format_local_time, visual_for, Run, RunDetail, StatusTone,
};

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

use colors::*;

/// ANSI color for a status tone.
fn tone_code(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Success => GREEN,
        StatusTone::Error => RED,
        StatusTone::Info => BLUE,
    }
}

/// One formatted (uncolored) table line for a run.
///
/// Kept separate from the colored printer so it can be tested.
pub fn format_run_row(run: &Run) -> String {
    format!(
        "{:>6}  {:<28}  {:<8}  {:<19}  {:>9}",
        run.id,
        run.group_name,
        visual_for(run.status).label,
        format_local_datetime(&run.start_time),
        duration_of(run),
    )
}

/// Print an error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{RED}{BOLD}error:{RESET} {message}");
}

/// Print the run table for the `runs` command.
pub fn print_runs_table(runs: &[Run]) {
    println!(
        "{BOLD}{:>6}  {:<28}  {:<8}  {:<19}  {:>9}{RESET}",
        "ID", "GROUP", "STATUS", "STARTED", "DURATION"
    );
    for run in runs {
        let visual = visual_for(run.status);
        println!(
            "{:>6}  {:<28}  {}{:<8}{RESET}  {:<19}  {:>9}",
            run.id,
            run.group_name,
            tone_code(visual.tone),
            visual.label,
            format_local_datetime(&run.start_time),
            duration_of(run),
        );
    }
    if runs.is_empty() {
        println!("{GRAY}(no runs){RESET}");
    }
}

/// Print one run's summary and logs for the `show` command.
pub fn print_run_detail(detail: &RunDetail) {
    let run = &detail.run;
    let visual = visual_for(run.status);

    println!("{CYAN}{BOLD}Run #{}{RESET}", run.id);
    println!("  Group:   {}", run.group_name);
    println!("  Status:  {}{}{RESET}", tone_code(visual.tone), visual.label);
    println!("  Started: {}", format_local_datetime(&run.start_time));
    println!();

    println!("{BOLD}Logs ({}){RESET}", detail.logs.len());
    for log in &detail.logs {
        let mut lines = log.message.lines();
        let first = lines.next().unwrap_or("");
        println!(
            "  {GRAY}{}{RESET}  {:<16}  {}",
            format_local_time(&log.timestamp),
            log.task_name,
            first
        );
        // Continuation lines of multi-line messages, aligned under the first.
        for line in lines {
            println!("  {:>8}  {:<16}  {}", "", "", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunStatus;

    #[test]
    fn test_format_run_row_contains_derived_fields() {
        let run = Run {
            id: 3,
            group_name: "ci-pipeline".to_string(),
            status: RunStatus::Running,
            start_time: "2025-09-21T22:10:00Z".to_string(),
            end_time: None,
        };
        let row = format_run_row(&run);
        assert!(row.contains("ci-pipeline"));
        assert!(row.contains("running"));
        assert!(row.trim_end().ends_with('-')); // unfinished duration sentinel
    }
}
