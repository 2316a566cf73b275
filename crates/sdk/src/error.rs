/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */
use thiserror::Error;

/// Top-level error type for SDK management and release publishing
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Not logged in. Run 'pebble login' or set PEBBLE_TOKEN before using this command")]
    AuthenticationRequired,

    #[error("No Pebble project here: {0}")]
    ProjectNotFound(String),

    #[error("Release validation failed: {0}")]
    ValidationFailed(String),

    #[error("The developer portal rejected the release (HTTP 422). Have you published a release for this app before?")]
    NoPriorRelease,

    #[error("Portal request failed with HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SDK {0} is not installed")]
    NotInstalled(String),

    #[error("SDK {0} is not available in the remote catalog")]
    UnknownVersion(String),

    #[error("Gave up waiting for release validation after {waited_secs}s")]
    Timeout { waited_secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected response from server: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
