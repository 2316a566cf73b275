/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Developer portal release API client
//!
//! The portal exposes release records under
//! `/api/applications/{uuid}/releases`. Creating one kicks off server-side
//! validation; the client observes the outcome by polling the record until it
//! leaves `pending`. Every request carries the bearer token.

use serde::Deserialize;
use tokio::time::Instant;

use crate::config::PortalConfig;
use crate::error::{SdkError, SdkResult};
use crate::http::check_status;
use crate::retry::RetryPolicy;

/// Observed state of a release record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseStatus {
    Pending,
    Ready,
    ValidationFailed,
    Published,
    /// A status string this client does not know. Treated as non-terminal.
    Other(String),
}

impl ReleaseStatus {
    fn parse(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "ready" => Self::Ready,
            "validation_failed" => Self::ValidationFailed,
            "published" => Self::Published,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Release {
    pub id: String,
    pub status: ReleaseStatus,
    pub validation_error: Option<String>,
}

// The portal nests release payloads under a `release` key.
#[derive(Deserialize)]
struct ReleaseEnvelope {
    release: ReleaseBody,
}

#[derive(Deserialize)]
struct ReleaseBody {
    id: String,
    status: String,
    #[serde(default)]
    validation_error: Option<String>,
}

impl From<ReleaseBody> for Release {
    fn from(body: ReleaseBody) -> Self {
        Release {
            id: body.id,
            status: ReleaseStatus::parse(&body.status),
            validation_error: body.validation_error.filter(|e| !e.is_empty()),
        }
    }
}

pub struct PortalClient {
    http: reqwest::Client,
    config: PortalConfig,
}

impl PortalClient {
    pub fn new(config: PortalConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn releases_url(&self, app_uuid: &str) -> String {
        format!(
            "{}/api/applications/{}/releases",
            self.config.base_url, app_uuid
        )
    }

    /// Create a release record pointing at an uploaded PBW.
    ///
    /// A 422 means the portal has no previously published release for this
    /// application, which gets its own error so the CLI can explain the
    /// situation instead of dumping a status code.
    pub async fn create_release(
        &self,
        app_uuid: &str,
        pbw_url: &str,
        notes: &str,
    ) -> SdkResult<String> {
        let params = [("pbw_file", pbw_url), ("release-notes", notes)];
        let response = self
            .http
            .post(self.releases_url(app_uuid))
            .bearer_auth(&self.config.token)
            .form(&params)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Err(SdkError::NoPriorRelease);
        }
        let response = check_status(response).await?;
        let envelope: ReleaseEnvelope = response.json().await?;
        Ok(envelope.release.id)
    }

    pub async fn get_release(&self, app_uuid: &str, release_id: &str) -> SdkResult<Release> {
        let url = format!("{}/{}", self.releases_url(app_uuid), release_id);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.config.token)
            .send()
            .await?;
        let response = check_status(response).await?;
        let envelope: ReleaseEnvelope = response.json().await?;
        Ok(envelope.release.into())
    }

    /// Poll the release until it leaves the pending state.
    ///
    /// Returns on the first `ready`. `validation_failed` is terminal and is
    /// never retried; the server-supplied message is surfaced as
    /// [`SdkError::ValidationFailed`]. Exhausting the policy deadline yields
    /// [`SdkError::Timeout`] rather than spinning forever.
    pub async fn wait_until_ready(
        &self,
        app_uuid: &str,
        release_id: &str,
        policy: &RetryPolicy,
    ) -> SdkResult<()> {
        let started = Instant::now();
        let mut attempt = 0u32;
        loop {
            let release = self.get_release(app_uuid, release_id).await?;
            match release.status {
                ReleaseStatus::Ready => return Ok(()),
                ReleaseStatus::ValidationFailed => {
                    return Err(SdkError::ValidationFailed(
                        release
                            .validation_error
                            .unwrap_or_else(|| "no details provided by the portal".to_string()),
                    ));
                }
                _ => {}
            }

            let delay = policy.delay_for(attempt);
            if started.elapsed() + delay > policy.deadline {
                return Err(SdkError::Timeout {
                    waited_secs: started.elapsed().as_secs(),
                });
            }
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Trigger publication of a validated release.
    ///
    /// The response status is checked; a non-2xx here must not be reported
    /// to the user as a successful publish.
    pub async fn publish_release(&self, app_uuid: &str, release_id: &str) -> SdkResult<()> {
        let url = format!("{}/{}/publish", self.releases_url(app_uuid), release_id);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.token)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn delete_release(&self, app_uuid: &str, release_id: &str) -> SdkResult<()> {
        let url = format!("{}/{}", self.releases_url(app_uuid), release_id);
        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.config.token)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}
