/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 */

//! Shared HTTP response handling

use crate::error::{SdkError, SdkResult};

const MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

/// Pass 2xx responses through; anything else becomes [`SdkError::Http`] with
/// the status code and a truncated body.
pub(crate) async fn check_status(response: reqwest::Response) -> SdkResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SdkError::Http {
        status: status.as_u16(),
        body: truncate_body(body),
    })
}

fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body;
    }
    let mut cut = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    body.truncate(cut);
    body.push_str("...(truncated)");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_is_untouched() {
        assert_eq!(truncate_body("oops".to_string()), "oops");
    }

    #[test]
    fn test_long_body_is_truncated_with_marker() {
        let body = "x".repeat(MAX_ERROR_BODY_BYTES + 100);
        let truncated = truncate_body(body);
        assert!(truncated.ends_with("...(truncated)"));
        assert!(truncated.len() < MAX_ERROR_BODY_BYTES + 20);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let body = "é".repeat(MAX_ERROR_BODY_BYTES);
        let truncated = truncate_body(body);
        assert!(truncated.ends_with("...(truncated)"));
    }
}
