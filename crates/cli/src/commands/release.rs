//! Release command implementation
//!
//! Publish walks the whole pipeline: upload the PBW to file storage, create
//! the release record, wait for server-side validation, then publish. Every
//! step needs the bearer token, so credentials are resolved first and a
//! missing login fails before anything touches the network.

use std::env;
use std::path::PathBuf;

use dialoguer::Confirm;
use pebble_sdk::{PebbleProject, PortalClient, RetryPolicy};

use crate::commands::block_on;
use crate::error::{CliError, CliResult};
use crate::settings;

pub struct Options {
    pub subcommand: ReleaseSubcommand,
}

#[derive(Debug, Clone)]
pub enum ReleaseSubcommand {
    Publish {
        pbw: Option<String>,
        notes: Option<String>,
    },
    Delete {
        release_id: String,
        force: bool,
    },
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Release command failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    match &options.subcommand {
        ReleaseSubcommand::Publish { pbw, notes } => {
            publish(pbw.as_deref(), notes.as_deref().unwrap_or(""))
        }
        ReleaseSubcommand::Delete { release_id, force } => delete(release_id, *force),
    }
}

fn default_pbw_path() -> CliResult<PathBuf> {
    let cwd = env::current_dir()?;
    let project_name = cwd
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Message("Cannot determine the project directory name".to_string()))?
        .to_string();
    Ok(PathBuf::from("build").join(format!("{project_name}.pbw")))
}

fn publish(pbw: Option<&str>, notes: &str) -> CliResult<()> {
    let config = settings::portal_config()?;
    let project = PebbleProject::discover(&env::current_dir()?)?;

    let pbw_path = match pbw {
        Some(path) => PathBuf::from(path),
        None => default_pbw_path()?,
    };
    let storage = settings::storage_client();
    let portal = PortalClient::new(config);
    let policy = RetryPolicy::default();

    block_on(async {
        let pbw_url = storage.upload(&pbw_path).await?;
        let release_id = portal.create_release(&project.uuid, &pbw_url, notes).await?;
        println!("Created release {release_id}");

        portal
            .wait_until_ready(&project.uuid, &release_id, &policy)
            .await?;
        portal.publish_release(&project.uuid, &release_id).await?;
        println!("Published release {release_id}");
        Ok(())
    })
}

fn delete(release_id: &str, force: bool) -> CliResult<()> {
    let config = settings::portal_config()?;
    let project = PebbleProject::discover(&env::current_dir()?)?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete release {release_id} from the developer portal?"
            ))
            .default(false)
            .interact()
            .map_err(|e| CliError::Message(format!("Failed to read confirmation: {e}")))?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    let portal = PortalClient::new(config);
    block_on(portal.delete_release(&project.uuid, release_id))?;
    println!("Removed release {release_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::DirGuard;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_default_pbw_path_uses_directory_name() {
        let temp = TempDir::new().unwrap();
        let project_dir = temp.path().join("my-watchface");
        let _guard = DirGuard::new(&project_dir).unwrap();

        let path = default_pbw_path().unwrap();
        assert_eq!(path, PathBuf::from("build").join("my-watchface.pbw"));
    }
}
