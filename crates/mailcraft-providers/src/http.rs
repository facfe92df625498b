//! Shared HTTP plumbing for the provider adapters.

use std::time::Duration;

use mailcraft_core::utils::truncate_string;
use tracing::error;

use crate::error::{ProviderError, UpstreamError};

/// Longest upstream error body kept in an error message.
const MAX_ERROR_BODY: usize = 500;

/// Build a client whose timeout bounds a whole generation call.
pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Send a prepared request and return the body of a 2xx reply.
///
/// Transport failures (including timeouts and cancellation) and non-2xx
/// statuses become [`ProviderError::UpstreamCall`].
pub(crate) async fn send(
    provider: &str,
    request: reqwest::RequestBuilder,
) -> Result<String, ProviderError> {
    let response = request.send().await.map_err(|e| {
        error!(provider, error = %e, "HTTP request failed");
        ProviderError::upstream(provider, e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        error!(provider, status = %status, body = %body, "API error");
        return Err(ProviderError::upstream(
            provider,
            UpstreamError::Status {
                status: status.as_u16(),
                body: truncate_string(&body, MAX_ERROR_BODY),
            },
        ));
    }

    response.text().await.map_err(|e| {
        error!(provider, error = %e, "Failed to read response body");
        ProviderError::upstream(provider, e)
    })
}
