//! Shared HTTP client construction and response helpers.
//!
//! The host builds one [`reqwest::Client`] and hands clones of it to every
//! adapter. Adapters never build their own pool.

use std::time::Duration;

use reqwest::{Client, Response, header};

use crate::error::FetchError;

/// Idle connection lifetime in the shared pool.
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Builds the host-owned client shared by all adapters.
///
/// Timeouts are applied per attempt by the fetch context, not here.
pub fn shared_client() -> Result<Client, FetchError> {
    Ok(Client::builder()
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
        .build()?)
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Extension trait for Response handling.
pub trait ResponseExt {
    /// Check if the response indicates rate limiting.
    fn is_rate_limited(&self) -> bool;

    /// Get the Retry-After header value in seconds.
    fn retry_after_secs(&self) -> Option<u64>;

    /// Maps non-success statuses to [`FetchError`].
    fn check_status(self) -> Result<Response, FetchError>;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        self.status() == reqwest::StatusCode::TOO_MANY_REQUESTS
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    fn check_status(self) -> Result<Response, FetchError> {
        if self.is_rate_limited() {
            return Err(FetchError::RateLimited {
                retry_after: self.retry_after_secs(),
            });
        }
        if !self.status().is_success() {
            return Err(FetchError::Status {
                status: self.status().as_u16(),
                url: self.url().to_string(),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_check_status_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/busy"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
            .mount(&server)
            .await;

        let client = shared_client().unwrap();
        let response = client
            .get(format!("{}/busy", server.uri()))
            .send()
            .await
            .unwrap();

        assert!(response.is_rate_limited());
        assert!(matches!(
            response.check_status(),
            Err(FetchError::RateLimited { retry_after: Some(12) })
        ));
    }

    #[tokio::test]
    async fn test_check_status_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = shared_client().unwrap();
        let response = client
            .get(format!("{}/gone", server.uri()))
            .send()
            .await
            .unwrap();

        assert!(matches!(
            response.check_status(),
            Err(FetchError::Status { status: 404, .. })
        ));
    }
}
