//! Per-adapter fetch context.
//!
//! Bundles everything an adapter needs to talk to its vendor: the injected
//! shared client, the request policy, a rate limiter, a retry strategy,
//! a cancellation token, a clock and a log span scoped to the instance.

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::{Client, RequestBuilder, header};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{Span, debug, info_span, instrument};
use url::Url;

use crate::client::ResponseExt;
use crate::clock::Clock;
use crate::config::{ProviderConfig, RequestPolicy};
use crate::error::FetchError;
use crate::rate_limit::{DEFAULT_KEY, RateLimiter};
use crate::retry::RetryStrategy;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// Fetch Context
// ============================================================================

/// Context owned by one adapter instance.
///
/// Rate-limit state is local to the instance; two adapters never share it.
pub struct FetchContext {
    client: Client,
    base_url: Url,
    policy: RequestPolicy,
    rate_limiter: RateLimiter,
    retry: RetryStrategy,
    cancel: CancellationToken,
    clock: Clock,
    span: Span,
}

impl FetchContext {
    /// Creates a builder for an adapter of `provider`.
    pub fn builder(provider: &'static str, client: Client) -> FetchContextBuilder {
        FetchContextBuilder::new(provider, client)
    }

    /// Vendor origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Timing policy.
    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    /// Clock used for "today".
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Cancellation token for this instance.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Log span scoped to this instance.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Resolves `path` against the vendor origin.
    pub fn url(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{path}: {e}")))
    }

    /// GETs `url` as text under rate limiting, timeout and retry.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        self.send_with_policy(|| {
            self.client
                .get(url.clone())
                .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
        })
        .await
    }

    /// GETs `url` with query parameters and decodes a JSON body.
    ///
    /// A body that does not parse is returned as [`FetchError::Json`] and is
    /// not retried.
    #[instrument(skip(self, query), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let body = self
            .send_with_policy(|| {
                self.client
                    .get(url.clone())
                    .query(query)
                    .header(header::ACCEPT, "application/json")
            })
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_with_policy<F>(&self, build: F) -> Result<String, FetchError>
    where
        F: Fn() -> RequestBuilder,
    {
        let build = &build;
        self.retry
            .run(&self.cancel, move || async move {
                self.rate_limiter.acquire(DEFAULT_KEY).await;
                let request = build().header(header::USER_AGENT, &self.policy.user_agent);
                let timeout = self.policy.request_timeout;

                let attempt = async {
                    let response = request.send().await?.check_status()?;
                    Ok::<_, FetchError>(response.text().await?)
                };

                match tokio::time::timeout(timeout, attempt).await {
                    Ok(result) => result,
                    Err(_) => Err(FetchError::Timeout(timeout)),
                }
            })
            .await
            .inspect(|body| debug!(bytes = body.len(), "Response received"))
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("base_url", &self.base_url.as_str())
            .field("policy", &self.policy)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a [`FetchContext`].
pub struct FetchContextBuilder {
    provider: &'static str,
    client: Client,
    config: ProviderConfig,
    default_base_url: &'static str,
    cancel: Option<CancellationToken>,
    clock: Clock,
}

impl FetchContextBuilder {
    fn new(provider: &'static str, client: Client) -> Self {
        Self {
            provider,
            client,
            config: ProviderConfig::new(),
            default_base_url: "",
            cancel: None,
            clock: Clock::System,
        }
    }

    /// Sets the adapter configuration.
    #[must_use]
    pub fn config(mut self, config: &ProviderConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Sets the vendor's public origin, used unless `base_url` is configured.
    #[must_use]
    pub fn default_base_url(mut self, url: &'static str) -> Self {
        self.default_base_url = url;
        self
    }

    /// Ties this context to a host token. The context gets a child token.
    #[must_use]
    pub fn cancellation(mut self, parent: &CancellationToken) -> Self {
        self.cancel = Some(parent.child_token());
        self
    }

    /// Overrides the clock.
    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Validates the configuration and builds the context.
    pub fn build(self) -> Result<FetchContext, FetchError> {
        let policy = RequestPolicy::from_config(&self.config)?;
        let base_url = self.config.base_url(self.default_base_url)?;
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        let span = info_span!("provider", provider = self.provider, instance);

        Ok(FetchContext {
            client: self.client,
            base_url,
            rate_limiter: RateLimiter::new(policy.min_request_interval),
            retry: RetryStrategy::new(policy.max_retries, policy.retry_delay),
            policy,
            cancel: self.cancel.unwrap_or_default(),
            clock: self.clock,
            span,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::keys;
    use serde_json::Value;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context(server: &MockServer, config: ProviderConfig) -> FetchContext {
        FetchContext::builder("test", reqwest::Client::new())
            .config(&config.with(keys::BASE_URL, server.uri()))
            .default_base_url("https://example.invalid")
            .build()
            .unwrap()
    }

    fn fast() -> ProviderConfig {
        ProviderConfig::new()
            .with(keys::MIN_REQUEST_INTERVAL, 0.0)
            .with(keys::RETRY_DELAY, 0.0)
    }

    #[tokio::test]
    async fn test_get_json_with_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items"))
            .and(query_param("location", "53703"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server, fast());
        let url = ctx.url("/api/items").unwrap();
        let body: Value = ctx.get_json(&url, &[("location", "53703")]).await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_server_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server, fast());
        let url = ctx.url("/broken").unwrap();
        let err = ctx.get_text(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_rate_limited_is_retried_then_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/busy"))
            .respond_with(ResponseTemplate::new(429))
            .expect(3)
            .mount(&server)
            .await;

        let ctx = context(&server, fast().with(keys::MAX_RETRIES, 2));
        let url = ctx.url("/busy").unwrap();
        let err = ctx.get_text(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_per_attempt_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let ctx = context(
            &server,
            fast()
                .with(keys::REQUEST_TIMEOUT, 0.05)
                .with(keys::MAX_RETRIES, 0),
        );
        let url = ctx.url("/slow").unwrap();
        let err = ctx.get_text(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_bad_json_is_not_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(&server, fast());
        let url = ctx.url("/json").unwrap();
        let err = ctx.get_json::<Value>(&url, &[]).await.unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }

    #[tokio::test]
    async fn test_cancelled_context() {
        let server = MockServer::start().await;
        let parent = CancellationToken::new();
        let ctx = FetchContext::builder("test", reqwest::Client::new())
            .config(&fast().with(keys::BASE_URL, server.uri()))
            .cancellation(&parent)
            .build()
            .unwrap();

        parent.cancel();
        let url = ctx.url("/anything").unwrap();
        assert!(matches!(ctx.get_text(&url).await, Err(FetchError::Cancelled)));
    }

    #[test]
    fn test_invalid_config_fails_build() {
        let result = FetchContext::builder("test", reqwest::Client::new())
            .config(&ProviderConfig::new().with(keys::MAX_RETRIES, -2))
            .default_base_url("https://example.com")
            .build();
        assert!(matches!(result, Err(FetchError::Config(_))));
    }
}
