//! Environment-derived settings
//!
//! The only place the process environment is consulted. Everything below the
//! command layer receives explicit configuration, so tests can point the
//! tool at mock servers and scratch directories through these variables.

use std::path::PathBuf;

use pebble_sdk::{AccountStore, PortalConfig, SdkManager, StorageClient, DEFAULT_CATALOG_URL};

use crate::error::CliResult;

/// Resolve portal credentials and base URL.
///
/// Raises `AuthenticationRequired` here, before any network call, when
/// neither `PEBBLE_TOKEN` nor a stored account token is available.
pub fn portal_config() -> CliResult<PortalConfig> {
    let account = AccountStore::load()?;
    let config = PortalConfig::resolve(
        env_nonempty("PEBBLE_TOKEN"),
        env_nonempty("DEV_PORTAL_URL"),
        &account,
    )?;
    Ok(config)
}

pub fn sdk_manager() -> CliResult<SdkManager> {
    let root = match env_nonempty("PEBBLE_SDK_ROOT") {
        Some(root) => PathBuf::from(root),
        None => SdkManager::default_root()?,
    };
    let catalog_url =
        env_nonempty("PEBBLE_SDK_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
    Ok(SdkManager::new(root, catalog_url))
}

pub fn storage_client() -> StorageClient {
    match env_nonempty("PEBBLE_STORAGE_URL") {
        Some(url) => StorageClient::with_base_url(url),
        None => StorageClient::new(),
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pebble_sdk::SdkError;
    use serial_test::serial;
    use tempfile::TempDir;

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = std::env::var(key).ok();
            std::env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = std::env::var(key).ok();
            std::env::remove_var(key);
            Self { key, previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.previous {
                Some(value) => std::env::set_var(self.key, value),
                None => std::env::remove_var(self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_portal_config_without_any_token_fails() {
        let temp = TempDir::new().unwrap();
        let _home = EnvGuard::set("HOME", temp.path().to_str().unwrap());
        let _token = EnvGuard::unset("PEBBLE_TOKEN");

        let err = portal_config().unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Sdk(SdkError::AuthenticationRequired)
        ));
    }

    #[test]
    #[serial]
    fn test_portal_config_uses_env_token_and_url() {
        let temp = TempDir::new().unwrap();
        let _home = EnvGuard::set("HOME", temp.path().to_str().unwrap());
        let _token = EnvGuard::set("PEBBLE_TOKEN", "env-token");
        let _url = EnvGuard::set("DEV_PORTAL_URL", "http://portal.test");

        let config = portal_config().unwrap();
        assert_eq!(config.token, "env-token");
        assert_eq!(config.base_url, "http://portal.test");
    }

    #[test]
    #[serial]
    fn test_sdk_manager_honors_root_override() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("sdks");
        let _root = EnvGuard::set("PEBBLE_SDK_ROOT", root.to_str().unwrap());

        let manager = sdk_manager().unwrap();
        assert!(manager.list_local().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_env_nonempty_filters_blank_values() {
        let _var = EnvGuard::set("PEBBLE_TOKEN", "   ");
        assert!(env_nonempty("PEBBLE_TOKEN").is_none());
    }
}
