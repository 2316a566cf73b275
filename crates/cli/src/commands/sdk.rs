//! SDK management command implementation

use crate::commands::block_on;
use crate::error::CliResult;
use crate::settings;
use pebble_sdk::SdkListing;

pub struct Options {
    pub subcommand: SdkSubcommand,
}

#[derive(Debug, Clone)]
pub enum SdkSubcommand {
    List,
    Install { version: String },
    Uninstall { version: String },
    Activate { version: String },
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ SDK command failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let manager = settings::sdk_manager()?;

    match &options.subcommand {
        SdkSubcommand::List => {
            let listings = block_on(manager.list())?;
            println!("Available SDKs:");
            for listing in &listings {
                println!("{}", format_listing(listing));
            }
            Ok(())
        }
        SdkSubcommand::Install { version } => {
            println!("Installing SDK...");
            let installed = block_on(manager.install(version))?;
            println!("✓ Installed SDK {installed}");
            Ok(())
        }
        SdkSubcommand::Uninstall { version } => {
            println!("Uninstalling SDK {version}...");
            manager.uninstall(version)?;
            println!("✓ Done");
            Ok(())
        }
        SdkSubcommand::Activate { version } => {
            manager.activate(version)?;
            println!("✓ SDK {version} is now active");
            Ok(())
        }
    }
}

// ` * 4.3 (beta) (active)`: star for installed, annotations in parentheses.
fn format_listing(listing: &SdkListing) -> String {
    let mut line = if listing.installed {
        " * ".to_string()
    } else {
        "   ".to_string()
    };
    line.push_str(&listing.version);
    if !listing.channel.is_empty() {
        line.push_str(&format!(" ({})", listing.channel));
    }
    if listing.active {
        line.push_str(" (active)");
    }
    line
}
