//! CLI commands

pub mod completion;
pub mod login;
pub mod release;
pub mod sdk;

use crate::error::{CliError, CliResult};
use std::future::Future;

/// Run an async library operation to completion on a fresh runtime.
pub(crate) fn block_on<F, T>(future: F) -> CliResult<T>
where
    F: Future<Output = Result<T, pebble_sdk::SdkError>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Message(format!("Failed to create runtime: {e}")))?;
    rt.block_on(future).map_err(CliError::from)
}
