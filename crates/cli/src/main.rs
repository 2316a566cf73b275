//! Pebble CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
mod settings;
mod test_helpers;

use clap::{CommandFactory, Parser, Subcommand};
use commands::{completion, login, release, sdk};

/// Pebble CLI - Manage SDKs and publish releases to the developer portal
#[derive(Parser)]
#[command(name = "pebble")]
#[command(about = "Pebble CLI - Manage SDKs and publish releases", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage locally installed SDKs
    Sdk {
        #[command(subcommand)]
        command: SdkCommands,
    },
    /// Manage releases on the developer portal
    Release {
        #[command(subcommand)]
        command: ReleaseCommands,
    },
    /// Store a developer portal access token
    Login {
        /// Token to store; prompts if omitted
        #[arg(long)]
        token: Option<String>,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum SdkCommands {
    /// List installed and available SDKs
    List,
    /// Install the given SDK
    Install {
        /// Version to install, or 'latest' for the latest
        version: String,
    },
    /// Uninstall the given SDK
    Uninstall {
        /// Version to uninstall
        version: String,
    },
    /// Make the given, installed SDK active
    Activate {
        /// Version to make active
        version: String,
    },
}

#[derive(Subcommand)]
enum ReleaseCommands {
    /// Publish a new release to the developer portal
    Publish {
        /// Path to the PBW file to upload (defaults to build/<project>.pbw)
        pbw: Option<String>,
        /// A short string describing the release
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete the given release from the developer portal
    Delete {
        /// Release ID of the release to delete
        release_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Expose the CLI command structure for completion generation
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Sdk { command } => {
            let subcommand = match command {
                SdkCommands::List => sdk::SdkSubcommand::List,
                SdkCommands::Install { version } => sdk::SdkSubcommand::Install { version },
                SdkCommands::Uninstall { version } => sdk::SdkSubcommand::Uninstall { version },
                SdkCommands::Activate { version } => sdk::SdkSubcommand::Activate { version },
            };
            sdk::run(&sdk::Options { subcommand })
        }
        Commands::Release { command } => {
            let subcommand = match command {
                ReleaseCommands::Publish { pbw, notes } => {
                    release::ReleaseSubcommand::Publish { pbw, notes }
                }
                ReleaseCommands::Delete { release_id, force } => {
                    release::ReleaseSubcommand::Delete { release_id, force }
                }
            };
            release::run(&release::Options { subcommand })
        }
        Commands::Login { token } => login::run(&login::Options { token }),
        Commands::Completion { shell } => completion::run(&completion::Options { shell }),
    };

    std::process::exit(exit_code);
}
