//! Pebble Tool Core Library
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! Everything the `pebble` CLI does lives here: local SDK installation
//! bookkeeping (install, uninstall, activate, merged listings) and the
//! developer-portal release workflow (upload, create, validate, publish,
//! delete). The CLI crate only parses arguments and prints.
//!
//! Components never read the process environment. Tokens, base URLs and
//! registry locations are resolved by the caller and passed in explicitly,
//! which is what makes the HTTP behavior testable against a mock server.

pub mod account;
pub mod config;
pub mod error;
mod http;
pub mod manager;
pub mod portal;
pub mod project;
pub mod retry;
pub mod storage;

pub use account::AccountStore;
pub use config::{PortalConfig, DEFAULT_PORTAL_URL};
pub use error::{SdkError, SdkResult};
pub use manager::{RemoteSdk, SdkListing, SdkManager, DEFAULT_CATALOG_URL};
pub use portal::{PortalClient, Release, ReleaseStatus};
pub use project::PebbleProject;
pub use retry::RetryPolicy;
pub use storage::StorageClient;
