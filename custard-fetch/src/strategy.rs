//! Flavor extraction strategy trait and types.
//!
//! A strategy is one way of deriving today's flavor from a vendor's
//! upstream. Adapters with several (a JSON lookup, a heading heuristic,
//! an embedded script payload) run them in priority order through a
//! [`FlavorPipeline`](crate::pipeline::FlavorPipeline).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use custard_core::FlavorInfo;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::context::FetchContext;
use crate::error::FetchError;

// ============================================================================
// Source Kind
// ============================================================================

/// The kind of upstream a strategy reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Structured JSON endpoint
    JsonApi,
    /// Server-rendered HTML scanned with selectors or text heuristics
    HtmlHeuristic,
    /// JSON state blob embedded in a script tag
    EmbeddedJson,
    /// Page listing flavors by date
    Calendar,
}

impl SourceKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::JsonApi => "JSON API",
            Self::HtmlHeuristic => "HTML",
            Self::EmbeddedJson => "Embedded JSON",
            Self::Calendar => "Calendar",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Fetch Result
// ============================================================================

/// The result of a successful extraction.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The extracted flavor.
    pub flavor: FlavorInfo,
    /// The strategy that succeeded.
    pub strategy_id: String,
    /// The kind of source used.
    pub kind: SourceKind,
}

impl FetchResult {
    /// Creates a new fetch result.
    pub fn new(flavor: FlavorInfo, strategy_id: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            flavor,
            strategy_id: strategy_id.into(),
            kind,
        }
    }
}

// ============================================================================
// Flavor Request
// ============================================================================

/// One "current flavor" query, shared by every strategy in a pipeline run.
///
/// Pages are memoized per URL, so strategies reading the same page issue a
/// single request between them. Failures are memoized too when the error
/// can be copied.
pub struct FlavorRequest<'a> {
    ctx: &'a FetchContext,
    store_id: &'a str,
    pages: Mutex<HashMap<Url, Result<Arc<str>, FetchError>>>,
}

impl<'a> FlavorRequest<'a> {
    /// Creates a request for `store_id`.
    pub fn new(ctx: &'a FetchContext, store_id: &'a str) -> Self {
        Self {
            ctx,
            store_id,
            pages: Mutex::new(HashMap::new()),
        }
    }

    /// The adapter's fetch context.
    pub fn ctx(&self) -> &'a FetchContext {
        self.ctx
    }

    /// The store being queried.
    pub fn store_id(&self) -> &'a str {
        self.store_id
    }

    /// Fetches `url` as text, once per request.
    pub async fn page(&self, url: &Url) -> Result<Arc<str>, FetchError> {
        let mut pages = self.pages.lock().await;
        match pages.get(url) {
            Some(Ok(body)) => {
                debug!(url = %url, "Using memoized page");
                return Ok(Arc::clone(body));
            }
            Some(Err(error)) => {
                if let Some(error) = error.try_clone() {
                    debug!(url = %url, "Using memoized page failure");
                    return Err(error);
                }
            }
            None => {}
        }

        match self.ctx.get_text(url).await {
            Ok(body) => {
                let body: Arc<str> = body.into();
                pages.insert(url.clone(), Ok(Arc::clone(&body)));
                Ok(body)
            }
            Err(error) => {
                if let Some(copy) = error.try_clone() {
                    pages.insert(url.clone(), Err(copy));
                }
                Err(error)
            }
        }
    }
}

impl fmt::Debug for FlavorRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlavorRequest")
            .field("store_id", &self.store_id)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Flavor Strategy Trait
// ============================================================================

/// A strategy for extracting today's flavor.
///
/// ## Implementing a Strategy
///
/// ```ignore
/// struct HeadingStrategy;
///
/// #[async_trait]
/// impl FlavorStrategy for HeadingStrategy {
///     fn id(&self) -> &str {
///         "vendor.heading"
///     }
///
///     fn kind(&self) -> SourceKind {
///         SourceKind::HtmlHeuristic
///     }
///
///     async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
///         let url = req.ctx().url("/")?;
///         let page = req.page(&url).await?;
///         parse_heading(&page)
///     }
/// }
/// ```
#[async_trait]
pub trait FlavorStrategy: Send + Sync {
    /// Unique identifier, `{provider}.{method}`.
    fn id(&self) -> &str;

    /// The kind of source this strategy reads.
    fn kind(&self) -> SourceKind;

    /// Quick, offline check of whether this strategy applies to the request.
    async fn is_available(&self, _req: &FlavorRequest<'_>) -> bool {
        true
    }

    /// Extracts the flavor.
    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError>;

    /// Whether to try the next strategy after `error`.
    ///
    /// Transport failures, cancellation and a "closed" answer stop the
    /// pipeline; extraction misses fall through.
    fn should_fallback(&self, error: &FetchError) -> bool {
        !(error.is_transport()
            || matches!(error, FetchError::Cancelled | FetchError::FlavorClosed(_)))
    }

    /// Priority of this strategy (higher = try first).
    fn priority(&self) -> u32 {
        match self.kind() {
            SourceKind::JsonApi => 100,
            SourceKind::Calendar => 90,
            SourceKind::HtmlHeuristic => 80,
            SourceKind::EmbeddedJson => 60,
        }
    }
}

// ============================================================================
// Strategy Info
// ============================================================================

/// Information about a strategy (for reporting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Strategy ID.
    pub id: String,
    /// Source kind.
    pub kind: SourceKind,
    /// Priority.
    pub priority: u32,
}

impl StrategyInfo {
    /// Creates strategy info from a strategy implementation.
    pub fn from_strategy(strategy: &dyn FlavorStrategy) -> Self {
        Self {
            id: strategy.id().to_string(),
            kind: strategy.kind(),
            priority: strategy.priority(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ProviderConfig, keys};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Miss;

    #[async_trait]
    impl FlavorStrategy for Miss {
        fn id(&self) -> &str {
            "test.miss"
        }

        fn kind(&self) -> SourceKind {
            SourceKind::EmbeddedJson
        }

        async fn extract(&self, _req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
            Err(FetchError::extraction("nothing"))
        }
    }

    #[test]
    fn test_default_fallback_policy() {
        assert!(Miss.should_fallback(&FetchError::extraction("missing")));
        assert!(Miss.should_fallback(&FetchError::Status { status: 404, url: String::new() }));
        assert!(!Miss.should_fallback(&FetchError::FlavorClosed("Closed today".into())));
        assert!(!Miss.should_fallback(&FetchError::Cancelled));
        assert!(!Miss.should_fallback(&FetchError::RateLimited { retry_after: None }));
    }

    #[test]
    fn test_strategy_info() {
        let info = StrategyInfo::from_strategy(&Miss);
        assert_eq!(info.id, "test.miss");
        assert_eq!(info.priority, 60);
        assert_eq!(info.kind.to_string(), "Embedded JSON");
    }

    #[tokio::test]
    async fn test_pages_are_memoized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restaurants/madison"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h2>Turtle</h2>"))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = FetchContext::builder("test", reqwest::Client::new())
            .config(
                &ProviderConfig::new()
                    .with(keys::BASE_URL, server.uri())
                    .with(keys::MIN_REQUEST_INTERVAL, 0.0),
            )
            .build()
            .unwrap();
        let req = FlavorRequest::new(&ctx, "madison");
        let url = ctx.url("/restaurants/madison").unwrap();

        let first = req.page(&url).await.unwrap();
        let second = req.page(&url).await.unwrap();
        assert_eq!(&*first, "<h2>Turtle</h2>");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failed_pages_are_memoized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/restaurants/gone"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = FetchContext::builder("test", reqwest::Client::new())
            .config(
                &ProviderConfig::new()
                    .with(keys::BASE_URL, server.uri())
                    .with(keys::MIN_REQUEST_INTERVAL, 0.0),
            )
            .build()
            .unwrap();
        let req = FlavorRequest::new(&ctx, "gone");
        let url = ctx.url("/restaurants/gone").unwrap();

        for _ in 0..2 {
            let err = req.page(&url).await.unwrap_err();
            assert!(matches!(err, FetchError::Status { status: 404, .. }));
        }
    }
}
