//! Ordered strategy pipeline.
//!
//! The pipeline takes a list of flavor strategies and executes them in
//! priority order until one succeeds or one refuses fallback.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use crate::error::FetchError;
use crate::strategy::{FetchResult, FlavorRequest, FlavorStrategy, SourceKind, StrategyInfo};

// ============================================================================
// Fetch Attempt
// ============================================================================

/// Record of a single strategy attempt.
#[derive(Debug, Clone)]
pub struct FetchAttempt {
    /// The strategy ID that was attempted.
    pub strategy_id: String,
    /// The kind of source used.
    pub kind: SourceKind,
    /// Whether the attempt succeeded.
    pub success: bool,
    /// Error if the attempt failed.
    pub error: Option<String>,
    /// How long the attempt took.
    pub duration: Duration,
}

impl FetchAttempt {
    /// Creates a successful attempt record.
    pub fn success(strategy_id: impl Into<String>, kind: SourceKind, duration: Duration) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            success: true,
            error: None,
            duration,
        }
    }

    /// Creates a failed attempt record.
    pub fn failure(
        strategy_id: impl Into<String>,
        kind: SourceKind,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            kind,
            success: false,
            error: Some(error.into()),
            duration,
        }
    }
}

// ============================================================================
// Fetch Outcome
// ============================================================================

/// The outcome of a pipeline execution.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The result (success or final error).
    pub result: Result<FetchResult, FetchError>,
    /// All attempts made.
    pub attempts: Vec<FetchAttempt>,
    /// Total duration of all attempts.
    pub duration: Duration,
}

impl FetchOutcome {
    /// Returns true if the fetch succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the number of strategies that were tried.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Returns the successful strategy ID, if any.
    pub fn successful_strategy(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|r| r.strategy_id.as_str())
    }

    /// Returns all errors that occurred, in attempt order.
    pub fn errors(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref())
            .collect()
    }
}

// ============================================================================
// Flavor Pipeline
// ============================================================================

/// Flavor strategies tried in priority order.
#[derive(Default)]
pub struct FlavorPipeline {
    strategies: Vec<Box<dyn FlavorStrategy>>,
}

impl FlavorPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline with the given strategies.
    pub fn with_strategies(strategies: Vec<Box<dyn FlavorStrategy>>) -> Self {
        let mut pipeline = Self { strategies };
        pipeline.sort_by_priority();
        pipeline
    }

    /// Adds a strategy to the pipeline.
    pub fn add_strategy(&mut self, strategy: Box<dyn FlavorStrategy>) {
        self.strategies.push(strategy);
        self.sort_by_priority();
    }

    /// Highest priority first; the sort is stable for equal priorities.
    fn sort_by_priority(&mut self) {
        self.strategies.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Returns the number of strategies in the pipeline.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Returns information about all strategies, in execution order.
    pub fn strategy_info(&self) -> Vec<StrategyInfo> {
        self.strategies
            .iter()
            .map(|s| StrategyInfo::from_strategy(s.as_ref()))
            .collect()
    }

    /// Execute the pipeline, trying strategies in order until one succeeds.
    #[instrument(skip(self, req), fields(store_id = %req.store_id(), strategies = self.strategies.len()))]
    pub async fn execute(&self, req: &FlavorRequest<'_>) -> FetchOutcome {
        let start = Instant::now();
        let mut attempts = Vec::new();

        if self.strategies.is_empty() {
            return FetchOutcome {
                result: Err(FetchError::AllStrategiesFailed),
                attempts,
                duration: start.elapsed(),
            };
        }

        debug!(count = self.strategies.len(), "Executing flavor pipeline");

        for strategy in &self.strategies {
            let strategy_id = strategy.id();
            let kind = strategy.kind();

            if !strategy.is_available(req).await {
                debug!(strategy = %strategy_id, "Strategy not available, skipping");
                attempts.push(FetchAttempt::failure(
                    strategy_id,
                    kind,
                    "Not available",
                    Duration::ZERO,
                ));
                continue;
            }

            let attempt_start = Instant::now();
            debug!(strategy = %strategy_id, "Executing strategy");

            match strategy.extract(req).await {
                Ok(flavor) => {
                    let duration = attempt_start.elapsed();
                    info!(
                        strategy = %strategy_id,
                        flavor = %flavor.name,
                        duration = ?duration,
                        "Strategy succeeded"
                    );

                    attempts.push(FetchAttempt::success(strategy_id, kind, duration));

                    return FetchOutcome {
                        result: Ok(FetchResult::new(flavor, strategy_id, kind)),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(error) => {
                    let duration = attempt_start.elapsed();
                    debug!(
                        strategy = %strategy_id,
                        error = %error,
                        duration = ?duration,
                        "Strategy failed"
                    );

                    attempts.push(FetchAttempt::failure(
                        strategy_id,
                        kind,
                        error.to_string(),
                        duration,
                    ));

                    if !strategy.should_fallback(&error) {
                        debug!(strategy = %strategy_id, "Strategy indicates no fallback");
                        return FetchOutcome {
                            result: Err(error),
                            attempts,
                            duration: start.elapsed(),
                        };
                    }
                }
            }
        }

        warn!(attempts = attempts.len(), "All strategies failed");
        FetchOutcome {
            result: Err(FetchError::AllStrategiesFailed),
            attempts,
            duration: start.elapsed(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FetchContext;
    use async_trait::async_trait;
    use custard_core::FlavorInfo;

    struct MockSuccessStrategy {
        id: String,
        available: bool,
        priority: u32,
    }

    impl MockSuccessStrategy {
        fn new(id: &str, available: bool) -> Self {
            Self {
                id: id.to_string(),
                available,
                priority: 50,
            }
        }

        fn with_priority(mut self, priority: u32) -> Self {
            self.priority = priority;
            self
        }
    }

    #[async_trait]
    impl FlavorStrategy for MockSuccessStrategy {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> SourceKind {
            SourceKind::HtmlHeuristic
        }

        async fn is_available(&self, _req: &FlavorRequest<'_>) -> bool {
            self.available
        }

        async fn extract(&self, _req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
            Ok(FlavorInfo::new(format!("Flavor from {}", self.id)).unwrap())
        }

        fn priority(&self) -> u32 {
            self.priority
        }
    }

    struct MockFailStrategy {
        id: String,
        error: fn() -> FetchError,
        priority: u32,
    }

    impl MockFailStrategy {
        fn new(id: &str, error: fn() -> FetchError) -> Self {
            Self {
                id: id.to_string(),
                error,
                priority: 100,
            }
        }
    }

    #[async_trait]
    impl FlavorStrategy for MockFailStrategy {
        fn id(&self) -> &str {
            &self.id
        }

        fn kind(&self) -> SourceKind {
            SourceKind::JsonApi
        }

        async fn extract(&self, _req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
            Err((self.error)())
        }

        fn priority(&self) -> u32 {
            self.priority
        }
    }

    fn ctx() -> FetchContext {
        FetchContext::builder("test", reqwest::Client::new())
            .default_base_url("https://example.com")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_pipeline() {
        let ctx = ctx();
        let req = FlavorRequest::new(&ctx, "store");
        let outcome = FlavorPipeline::new().execute(&req).await;

        assert!(!outcome.is_success());
        assert!(matches!(outcome.result, Err(FetchError::AllStrategiesFailed)));
    }

    #[tokio::test]
    async fn test_fallback_on_extraction_miss() {
        let pipeline = FlavorPipeline::with_strategies(vec![
            Box::new(MockSuccessStrategy::new("test.second", true).with_priority(50)),
            Box::new(MockFailStrategy::new("test.first", || FetchError::extraction("no field"))),
        ]);
        let ctx = ctx();
        let req = FlavorRequest::new(&ctx, "store");
        let outcome = pipeline.execute(&req).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(outcome.successful_strategy(), Some("test.second"));
        assert_eq!(outcome.errors(), vec!["Extraction failed: no field"]);
    }

    #[tokio::test]
    async fn test_closed_stops_pipeline() {
        let pipeline = FlavorPipeline::with_strategies(vec![
            Box::new(MockFailStrategy::new("test.first", || {
                FetchError::FlavorClosed("Closed for the season".into())
            })),
            Box::new(MockSuccessStrategy::new("test.second", true)),
        ]);
        let ctx = ctx();
        let req = FlavorRequest::new(&ctx, "store");
        let outcome = pipeline.execute(&req).await;

        assert!(matches!(outcome.result, Err(FetchError::FlavorClosed(_))));
        assert_eq!(outcome.attempts_count(), 1);
    }

    #[tokio::test]
    async fn test_skip_unavailable() {
        let pipeline = FlavorPipeline::with_strategies(vec![
            Box::new(MockSuccessStrategy::new("test.unavailable", false).with_priority(100)),
            Box::new(MockSuccessStrategy::new("test.available", true).with_priority(50)),
        ]);
        let ctx = ctx();
        let req = FlavorRequest::new(&ctx, "store");
        let outcome = pipeline.execute(&req).await;

        assert_eq!(outcome.successful_strategy(), Some("test.available"));
        assert_eq!(outcome.result.unwrap().flavor.name, "Flavor from test.available");
    }

    #[tokio::test]
    async fn test_all_fail() {
        let pipeline = FlavorPipeline::with_strategies(vec![
            Box::new(MockFailStrategy::new("test.a", || FetchError::extraction("a"))),
            Box::new(MockFailStrategy::new("test.b", || FetchError::extraction("b"))),
        ]);
        let ctx = ctx();
        let req = FlavorRequest::new(&ctx, "store");
        let outcome = pipeline.execute(&req).await;

        assert!(matches!(outcome.result, Err(FetchError::AllStrategiesFailed)));
        assert_eq!(outcome.attempts_count(), 2);
        assert_eq!(pipeline.strategy_info().len(), 2);
    }
}
