//! runwatch CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command
//! handler. With no subcommand, the TUI monitor is launched.

use clap::{CommandFactory, Parser, Subcommand};
use runwatch::commands::{monitor_command, runs_command, show_command};
use runwatch::completion::{detect_shell, parse_shell_from_path, write_completion_script};
use runwatch::config::Config;
use runwatch::output::print_error;

#[derive(Parser)]
#[command(name = "runwatch")]
#[command(
    version,
    about = "Terminal dashboard for monitoring pipeline runs and their task logs",
    after_help = "EXAMPLES:
    # Open the interactive dashboard against the default backend
    runwatch

    # Point at a remote backend
    runwatch --server http://ci.internal:8080

    # One-shot: list runs, or show one run's logs
    runwatch runs
    runwatch show 42"
)]
struct Cli {
    /// Base URL of the pipeline backend (overrides config file and
    /// the RUNWATCH_SERVER environment variable)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive TUI dashboard (the default)
    Monitor,

    /// Print all runs as a table
    Runs,

    /// Print one run's summary and task logs
    Show {
        /// Run identifier
        id: i64,
    },

    /// Generate a shell completion script on stdout
    Completion {
        /// Target shell (bash, zsh, fish); detected from $SHELL if omitted
        shell: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::resolve(cli.server) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        None | Some(Commands::Monitor) => monitor_command(&config),
        Some(Commands::Runs) => runs_command(&config),
        Some(Commands::Show { id }) => show_command(&config, id),
        Some(Commands::Completion { shell }) => {
            let shell = match shell {
                Some(name) => parse_shell_from_path(&name),
                None => detect_shell(),
            };
            shell.map(|shell| {
                let mut cmd = Cli::command();
                write_completion_script(&mut cmd, shell, &mut std::io::stdout());
            })
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
