/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Project descriptor reading
//!
//! Publishing needs the application UUID, which lives in the project
//! metadata of the directory the command runs from: `appinfo.json` for
//! classic projects, `package.json` with a `pebble` section for npm-style
//! ones. Anything missing or malformed is `ProjectNotFound` - the caller is
//! simply not inside a usable project.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{SdkError, SdkResult};

#[derive(Debug, Deserialize)]
struct AppInfo {
    uuid: Option<String>,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    pebble: Option<PebbleSection>,
}

#[derive(Debug, Deserialize)]
struct PebbleSection {
    uuid: Option<String>,
}

/// The identity of the Pebble project in a directory.
#[derive(Debug, Clone)]
pub struct PebbleProject {
    pub uuid: String,
    pub name: Option<String>,
}

impl PebbleProject {
    /// Read the project descriptor from `dir`.
    pub fn discover(dir: &Path) -> SdkResult<Self> {
        let appinfo_path = dir.join("appinfo.json");
        if appinfo_path.exists() {
            let appinfo: AppInfo = read_descriptor(&appinfo_path)?;
            let uuid = require_uuid(appinfo.uuid, "appinfo.json")?;
            return Ok(Self {
                uuid,
                name: appinfo.short_name,
            });
        }

        let package_path = dir.join("package.json");
        if package_path.exists() {
            let package: PackageJson = read_descriptor(&package_path)?;
            let uuid = require_uuid(package.pebble.and_then(|p| p.uuid), "package.json")?;
            return Ok(Self {
                uuid,
                name: package.name,
            });
        }

        Err(SdkError::ProjectNotFound(
            "no appinfo.json or package.json in this directory".to_string(),
        ))
    }
}

fn read_descriptor<T: serde::de::DeserializeOwned>(path: &Path) -> SdkResult<T> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("descriptor");
    let raw = fs::read_to_string(path)
        .map_err(|e| SdkError::ProjectNotFound(format!("failed to read {file_name}: {e}")))?;
    serde_json::from_str(&raw)
        .map_err(|e| SdkError::ProjectNotFound(format!("{file_name} is not valid JSON: {e}")))
}

fn require_uuid(uuid: Option<String>, source: &str) -> SdkResult<String> {
    match uuid {
        Some(uuid) if is_valid_uuid(&uuid) => Ok(uuid),
        Some(uuid) => Err(SdkError::ProjectNotFound(format!(
            "{source} contains an invalid uuid: {uuid}"
        ))),
        None => Err(SdkError::ProjectNotFound(format!(
            "{source} does not declare a uuid"
        ))),
    }
}

/// Structural 8-4-4-4-12 check, case-insensitive hex.
fn is_valid_uuid(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    if groups.len() != 5 {
        return false;
    }
    let expected = [8, 4, 4, 4, 12];
    groups
        .iter()
        .zip(expected)
        .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit()))
}
