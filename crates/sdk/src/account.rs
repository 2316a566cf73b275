/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Stored developer-portal credentials
//!
//! A single JSON file under the user's home directory. The file may contain
//! secrets, so it is written with mode 0600 on unix.

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::SdkResult;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Account {
    #[serde(default)]
    access_token: Option<String>,
}

/// On-disk account credential store (`~/.pebble/account.json`).
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
    account: Account,
}

impl AccountStore {
    pub fn default_path() -> SdkResult<PathBuf> {
        let base = BaseDirs::new().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "unable to determine home directory")
        })?;
        Ok(base.home_dir().join(".pebble").join("account.json"))
    }

    /// Load the store from its default location. A missing file is an empty
    /// store, not an error.
    pub fn load() -> SdkResult<Self> {
        Self::load_from(Self::default_path()?)
    }

    pub fn load_from(path: PathBuf) -> SdkResult<Self> {
        if !path.exists() {
            return Ok(Self {
                path,
                account: Account::default(),
            });
        }
        let raw = fs::read_to_string(&path)?;
        let account = serde_json::from_str(&raw)?;
        Ok(Self { path, account })
    }

    pub fn access_token(&self) -> Option<String> {
        self.account
            .access_token
            .as_ref()
            .filter(|t| !t.trim().is_empty())
            .cloned()
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.account.access_token = token;
    }

    pub fn save(&self) -> SdkResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let serialized = serde_json::to_string_pretty(&self.account)?;
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        file.write_all(serialized.as_bytes())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = file.metadata()?;
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }
        Ok(())
    }
}
