//! Shell completion command implementation

use crate::error::{CliError, CliResult};
use crate::get_cli_command;
use clap_complete::{generate, Shell};
use std::io;

pub struct Options {
    pub shell: String,
}

/// Generate shell completion script
pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Completion generation failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let shell = parse_shell(&options.shell)?;
    let mut cmd = get_cli_command();
    generate(shell, &mut cmd, "pebble", &mut io::stdout());
    Ok(())
}

fn parse_shell(name: &str) -> CliResult<Shell> {
    if name.is_empty() {
        return Err(CliError::Message(
            "Shell name is required. Supported shells: bash, zsh, fish".to_string(),
        ));
    }
    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(CliError::Message(format!(
            "Unsupported shell: {name}. Supported shells: bash, zsh, fish"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cli_command() {
        let cmd = get_cli_command();
        assert_eq!(cmd.get_name(), "pebble");
    }

    #[test]
    fn test_parse_shell_is_case_insensitive() {
        for name in ["bash", "BASH", "Zsh", "fish"] {
            assert!(parse_shell(name).is_ok(), "shell '{name}' should parse");
        }
    }

    #[test]
    fn test_parse_shell_rejects_unsupported() {
        let result = parse_shell("powershell");
        match result {
            Err(CliError::Message(msg)) => {
                assert!(msg.contains("Unsupported shell"));
                assert!(msg.contains("powershell"));
            }
            other => panic!("expected Message error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_parse_shell_rejects_empty() {
        assert!(parse_shell("").is_err());
    }
}
