//! Login command implementation

use dialoguer::Password;
use pebble_sdk::AccountStore;

use crate::error::{CliError, CliResult};

pub struct Options {
    pub token: Option<String>,
}

pub fn run(options: &Options) -> i32 {
    match run_inner(options) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("✗ Login failed");
            eprintln!("  Error: {e}");
            1
        }
    }
}

fn run_inner(options: &Options) -> CliResult<()> {
    let token = match &options.token {
        Some(token) => token.clone(),
        None => Password::new()
            .with_prompt("Developer portal access token")
            .interact()
            .map_err(|e| CliError::Message(format!("Failed to read token: {e}")))?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(CliError::Message("Token must not be empty".to_string()));
    }

    let mut account = AccountStore::load()?;
    account.set_access_token(Some(token));
    account.save()?;
    println!("✓ Logged in");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_blank_token_is_rejected() {
        let options = Options {
            token: Some("   ".to_string()),
        };
        let result = run_inner(&options);
        assert!(matches!(result, Err(CliError::Message(_))));
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_token_is_persisted_to_the_account_store() {
        let temp = TempDir::new().unwrap();
        let original_home = std::env::var("HOME").ok();
        std::env::set_var("HOME", temp.path());

        let options = Options {
            token: Some("fresh-token".to_string()),
        };
        run_inner(&options).unwrap();

        let store = AccountStore::load().unwrap();
        assert_eq!(store.access_token().as_deref(), Some("fresh-token"));

        match original_home {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
    }
}
