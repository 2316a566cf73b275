/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Local SDK installation bookkeeping and the remote version catalog
//!
//! The registry is a directory of one subdirectory per installed version,
//! each holding the downloaded archive and a small manifest. A `current`
//! file beside them names the active version. The remote catalog is
//! authoritative for what is available; the filesystem is authoritative for
//! what is installed.

use chrono::Utc;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SdkError, SdkResult};
use crate::http::check_status;

pub const DEFAULT_CATALOG_URL: &str = "https://sdk.getpebble.com";

const CURRENT_POINTER_FILE: &str = "current";
const MANIFEST_FILE: &str = "manifest.json";
const ARCHIVE_FILE: &str = "sdk-core.tar.bz2";

/// One entry of the remote version catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSdk {
    pub version: String,
    #[serde(default)]
    pub channel: String,
    pub url: String,
}

#[derive(Deserialize)]
struct Catalog {
    sdks: Vec<RemoteSdk>,
}

/// One annotated row of `pebble sdk list`.
#[derive(Debug, Clone)]
pub struct SdkListing {
    pub version: String,
    pub channel: String,
    pub installed: bool,
    pub active: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct Manifest {
    version: String,
    channel: String,
    installed_at: String,
}

pub struct SdkManager {
    root: PathBuf,
    catalog_url: String,
    http: reqwest::Client,
}

impl SdkManager {
    pub fn new(root: PathBuf, catalog_url: impl Into<String>) -> Self {
        let catalog_url: String = catalog_url.into();
        Self {
            root,
            catalog_url: catalog_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn default_root() -> SdkResult<PathBuf> {
        let base = directories::BaseDirs::new().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "unable to determine home directory",
            )
        })?;
        Ok(base.home_dir().join(".pebble-sdk").join("SDKs"))
    }

    /// Versions present in the local registry.
    pub fn list_local(&self) -> SdkResult<Vec<String>> {
        let mut versions = Vec::new();
        if !self.root.exists() {
            return Ok(versions);
        }
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    versions.push(name.to_string());
                }
            }
        }
        versions.sort();
        Ok(versions)
    }

    /// The version the `current` pointer names, if any.
    pub fn current(&self) -> SdkResult<Option<String>> {
        let path = self.root.join(CURRENT_POINTER_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)?;
        let value = value.trim().to_string();
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    pub async fn list_remote(&self) -> SdkResult<Vec<RemoteSdk>> {
        let url = format!("{}/v1/sdks", self.catalog_url);
        let response = self.http.get(&url).send().await?;
        let response = check_status(response).await?;
        let catalog: Catalog = response.json().await?;
        Ok(catalog.sdks)
    }

    /// Merged listing: the remote catalog annotated with local install
    /// state, followed by any installed versions the catalog no longer
    /// lists (so an uninstall target is always visible).
    pub async fn list(&self) -> SdkResult<Vec<SdkListing>> {
        let remote = self.list_remote().await?;
        let local = self.list_local()?;
        let current = self.current()?;
        Ok(merge_listings(remote, &local, current.as_deref()))
    }

    /// Resolve a version spec against the catalog. `"latest"` picks the
    /// highest version available at call time.
    pub async fn resolve_version(&self, spec: &str) -> SdkResult<RemoteSdk> {
        let catalog = self.list_remote().await?;
        resolve_in_catalog(catalog, spec)
    }

    /// Download and register a version. The first install also becomes the
    /// active SDK. Returns the concrete version that was installed.
    pub async fn install(&self, spec: &str) -> SdkResult<String> {
        let sdk = self.resolve_version(spec).await?;

        let response = self.http.get(&sdk.url).send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;

        let version_dir = self.root.join(&sdk.version);
        fs::create_dir_all(&version_dir)?;
        if let Err(e) = write_install(&version_dir, &bytes, &sdk) {
            // Leave no half-registered version behind.
            let _ = fs::remove_dir_all(&version_dir);
            return Err(e);
        }

        if self.current()?.is_none() {
            self.write_current(&sdk.version)?;
        }
        Ok(sdk.version)
    }

    /// Remove a version from the registry. A version that was never
    /// installed is an error, not a silent success.
    pub fn uninstall(&self, version: &str) -> SdkResult<()> {
        let version_dir = self.root.join(version);
        if !version_dir.is_dir() {
            return Err(SdkError::NotInstalled(version.to_string()));
        }
        fs::remove_dir_all(&version_dir)?;
        if self.current()?.as_deref() == Some(version) {
            fs::remove_file(self.root.join(CURRENT_POINTER_FILE))?;
        }
        Ok(())
    }

    /// Point `current` at an installed version. Activating a version that
    /// is not installed is a validation error.
    pub fn activate(&self, version: &str) -> SdkResult<()> {
        if !self.root.join(version).is_dir() {
            return Err(SdkError::NotInstalled(version.to_string()));
        }
        self.write_current(version)
    }

    fn write_current(&self, version: &str) -> SdkResult<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(CURRENT_POINTER_FILE), version)?;
        Ok(())
    }
}

fn write_install(version_dir: &Path, bytes: &[u8], sdk: &RemoteSdk) -> SdkResult<()> {
    fs::write(version_dir.join(ARCHIVE_FILE), bytes)?;
    let manifest = Manifest {
        version: sdk.version.clone(),
        channel: sdk.channel.clone(),
        installed_at: Utc::now().to_rfc3339(),
    };
    fs::write(
        version_dir.join(MANIFEST_FILE),
        serde_json::to_string_pretty(&manifest)?,
    )?;
    Ok(())
}

fn merge_listings(
    remote: Vec<RemoteSdk>,
    local: &[String],
    current: Option<&str>,
) -> Vec<SdkListing> {
    let mut listings: Vec<SdkListing> = remote
        .into_iter()
        .map(|sdk| {
            let installed = local.iter().any(|v| v == &sdk.version);
            let active = current == Some(sdk.version.as_str());
            SdkListing {
                version: sdk.version,
                channel: sdk.channel,
                installed,
                active,
            }
        })
        .collect();

    for version in local {
        if !listings.iter().any(|l| &l.version == version) {
            listings.push(SdkListing {
                version: version.clone(),
                channel: String::new(),
                installed: true,
                active: current == Some(version.as_str()),
            });
        }
    }
    listings
}

fn resolve_in_catalog(catalog: Vec<RemoteSdk>, spec: &str) -> SdkResult<RemoteSdk> {
    if spec == "latest" {
        return catalog
            .into_iter()
            .filter_map(|sdk| parse_version(&sdk.version).map(|v| (v, sdk)))
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, sdk)| sdk)
            .ok_or_else(|| SdkError::UnknownVersion("latest".to_string()));
    }
    catalog
        .into_iter()
        .find(|sdk| sdk.version == spec)
        .ok_or_else(|| SdkError::UnknownVersion(spec.to_string()))
}

// SDK versions are often two-component ("4.3"); pad before semver parsing.
fn parse_version(value: &str) -> Option<Version> {
    Version::parse(value)
        .or_else(|_| Version::parse(&format!("{value}.0")))
        .or_else(|_| Version::parse(&format!("{value}.0.0")))
        .ok()
}
