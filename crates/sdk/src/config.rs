/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Portal connection configuration

use crate::account::AccountStore;
use crate::error::{SdkError, SdkResult};

pub const DEFAULT_PORTAL_URL: &str = "http://dev-portal.getpebble.com";

/// Connection settings for the developer portal.
///
/// Built once at the CLI boundary and handed to [`crate::PortalClient`];
/// nothing below this struct looks at the process environment.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub token: String,
    pub base_url: String,
}

impl PortalConfig {
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            token: token.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the bearer token and portal base URL.
    ///
    /// `token_override` (the `PEBBLE_TOKEN` value, read by the caller) wins
    /// over the stored account credential. A missing token is an error raised
    /// here, before any network call is made.
    pub fn resolve(
        token_override: Option<String>,
        base_url_override: Option<String>,
        account: &AccountStore,
    ) -> SdkResult<Self> {
        let token = token_override
            .filter(|t| !t.trim().is_empty())
            .or_else(|| account.access_token())
            .ok_or(SdkError::AuthenticationRequired)?;
        let base_url = base_url_override.unwrap_or_else(|| DEFAULT_PORTAL_URL.to_string());
        Ok(Self::new(token, base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountStore;
    use tempfile::TempDir;

    fn empty_account(temp: &TempDir) -> AccountStore {
        AccountStore::load_from(temp.path().join("account.json")).unwrap()
    }

    #[test]
    fn test_resolve_prefers_token_override() {
        let temp = TempDir::new().unwrap();
        let mut account = empty_account(&temp);
        account.set_access_token(Some("stored-token".to_string()));

        let config =
            PortalConfig::resolve(Some("env-token".to_string()), None, &account).unwrap();
        assert_eq!(config.token, "env-token");
    }

    #[test]
    fn test_resolve_falls_back_to_stored_credential() {
        let temp = TempDir::new().unwrap();
        let mut account = empty_account(&temp);
        account.set_access_token(Some("stored-token".to_string()));

        let config = PortalConfig::resolve(None, None, &account).unwrap();
        assert_eq!(config.token, "stored-token");
        assert_eq!(config.base_url, DEFAULT_PORTAL_URL);
    }

    #[test]
    fn test_resolve_without_any_token_fails() {
        let temp = TempDir::new().unwrap();
        let account = empty_account(&temp);

        let result = PortalConfig::resolve(None, None, &account);
        assert!(matches!(result, Err(SdkError::AuthenticationRequired)));
    }

    #[test]
    fn test_resolve_ignores_blank_override() {
        let temp = TempDir::new().unwrap();
        let account = empty_account(&temp);

        let result = PortalConfig::resolve(Some("   ".to_string()), None, &account);
        assert!(matches!(result, Err(SdkError::AuthenticationRequired)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = PortalConfig::new("t", "http://portal.example/");
        assert_eq!(config.base_url, "http://portal.example");
    }
}
