//! Shell completion support for runwatch.
//!
//! Detects the user's shell from `$SHELL` and generates a completion
//! script on stdout via `clap_complete`.

use crate::error::{Result, RunwatchError};
use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

/// Shells accepted by the `completion` subcommand.
pub const SUPPORTED_SHELLS: &[&str] = &["bash", "zsh", "fish"];

impl ShellType {
    /// Convert to the `clap_complete::Shell` type.
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the user's shell from the `$SHELL` environment variable.
pub fn detect_shell() -> Result<ShellType> {
    let shell_path = std::env::var("SHELL").map_err(|_| {
        RunwatchError::ShellCompletion(
            "$SHELL environment variable is not set. \
             Please specify your shell manually."
                .to_string(),
        )
    })?;

    parse_shell_from_path(&shell_path)
}

/// Parse a shell type from a shell path (e.g. `/bin/zsh`).
pub fn parse_shell_from_path(shell_path: &str) -> Result<ShellType> {
    let shell_name = std::path::Path::new(shell_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(shell_path);

    match shell_name {
        "bash" => Ok(ShellType::Bash),
        "zsh" => Ok(ShellType::Zsh),
        "fish" => Ok(ShellType::Fish),
        _ => Err(RunwatchError::ShellCompletion(format!(
            "Unsupported shell: '{}'. \
             Supported shells are: bash, zsh, fish.",
            shell_name
        ))),
    }
}

/// Write the completion script for `shell` to `out`.
pub fn write_completion_script<W: Write>(cmd: &mut Command, shell: ShellType, out: &mut W) {
    let name = cmd.get_name().to_string();
    generate(shell.to_clap_shell(), cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_from_absolute_path() {
        assert_eq!(parse_shell_from_path("/bin/zsh").unwrap(), ShellType::Zsh);
        assert_eq!(
            parse_shell_from_path("/usr/local/bin/fish").unwrap(),
            ShellType::Fish
        );
        assert_eq!(parse_shell_from_path("/bin/bash").unwrap(), ShellType::Bash);
    }

    #[test]
    fn test_parse_shell_bare_name() {
        assert_eq!(parse_shell_from_path("bash").unwrap(), ShellType::Bash);
    }

    #[test]
    fn test_parse_shell_unsupported() {
        let err = parse_shell_from_path("/bin/tcsh").unwrap_err();
        assert!(err.to_string().contains("tcsh"));
    }

    #[test]
    fn test_shell_display_names() {
        assert_eq!(ShellType::Zsh.to_string(), "zsh");
        assert_eq!(SUPPORTED_SHELLS.len(), 3);
    }
}
