/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Build artifact upload client
//!
//! PBWs are not posted to the portal directly; they go to a third-party file
//! storage service first, and the portal release record references the URL
//! the service hands back.

use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::error::{SdkError, SdkResult};
use crate::http::check_status;

const DEFAULT_STORAGE_URL: &str = "https://www.filepicker.io/api/store/S3";
const STORAGE_API_KEY: &str = "Ag3QJFpN1QuueH0z0XgKUz";

#[derive(Deserialize)]
struct StoredFile {
    url: String,
}

pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
}

impl StorageClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_STORAGE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Upload a local file and return the URL it is served under.
    ///
    /// A missing file is rejected before any network traffic happens.
    pub async fn upload(&self, path: &Path) -> SdkResult<String> {
        if !path.is_file() {
            return Err(SdkError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.pbw")
            .to_string();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")?;
        let form = reqwest::multipart::Form::new().part("fileUpload", part);

        let response = self
            .http
            .post(&self.base_url)
            .query(&[("key", STORAGE_API_KEY)])
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;
        let stored: StoredFile = response.json().await?;
        Ok(stored.url)
    }
}

impl Default for StorageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_upload_returns_the_stored_url() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/store/S3")
                .query_param("key", STORAGE_API_KEY);
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"url": "https://cdn.example/stored/app.pbw", "size": 4}"#);
        });

        let temp = TempDir::new().unwrap();
        let pbw_path = temp.path().join("app.pbw");
        std::fs::write(&pbw_path, b"pbw!").unwrap();

        let client = StorageClient::with_base_url(format!("{}/api/store/S3", server.base_url()));
        let url = client.upload(&pbw_path).await.unwrap();

        assert_eq!(url, "https://cdn.example/stored/app.pbw");
        mock.assert();
    }

    #[tokio::test]
    async fn test_upload_of_missing_file_fails_before_any_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/store/S3");
            then.status(200);
        });

        let temp = TempDir::new().unwrap();
        let client = StorageClient::with_base_url(format!("{}/api/store/S3", server.base_url()));
        let err = client
            .upload(&temp.path().join("nope.pbw"))
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::Io(_)));
        assert_eq!(mock.hits(), 0);
    }

    #[tokio::test]
    async fn test_upload_surfaces_service_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/store/S3");
            then.status(403).body("bad api key");
        });

        let temp = TempDir::new().unwrap();
        let pbw_path = temp.path().join("app.pbw");
        std::fs::write(&pbw_path, b"pbw!").unwrap();

        let client = StorageClient::with_base_url(format!("{}/api/store/S3", server.base_url()));
        let err = client.upload(&pbw_path).await.unwrap_err();

        assert!(matches!(err, SdkError::Http { status: 403, .. }));
    }
}
