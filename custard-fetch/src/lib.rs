// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Custard Fetch
//!
//! Shared request plumbing and extraction helpers for custard providers.
//!
//! ## Request Policy
//!
//! Every adapter talks to its vendor through a [`FetchContext`], which
//! composes, per request:
//!
//! - [`RateLimiter`] - minimum gap between dispatches
//! - a per-attempt timeout from [`RequestPolicy`]
//! - [`RetryStrategy`] - linear backoff on transport failures, cancellable
//!
//! This is the only place waiting and retry policy is defined.
//!
//! ## Extraction
//!
//! - [`strategy::FlavorStrategy`] - One way of finding today's flavor
//! - [`pipeline::FlavorPipeline`] - Runs strategies in priority order
//! - [`html`] - Selector, text and embedded-script helpers
//! - [`json`] - Path lookups and a bounded location-shaped tree walk
//!
//! ## Example
//!
//! ```ignore
//! use custard_fetch::{FetchContext, FlavorPipeline, FlavorRequest, ProviderConfig};
//!
//! let ctx = FetchContext::builder("kopps", client)
//!     .config(&ProviderConfig::new())
//!     .default_base_url("https://www.kopps.com")
//!     .build()?;
//!
//! let pipeline = FlavorPipeline::with_strategies(vec![Box::new(CalendarStrategy)]);
//! let outcome = pipeline.execute(&FlavorRequest::new(&ctx, "kopps-glendale")).await;
//! ```

// Core modules
pub mod client;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod html;
pub mod json;
pub mod pipeline;
pub mod rate_limit;
pub mod retry;
pub mod strategy;

// Errors
pub use error::FetchError;

// Request plumbing
pub use client::{ResponseExt, shared_client};
pub use clock::Clock;
pub use config::{ProviderConfig, RequestPolicy};
pub use context::{FetchContext, FetchContextBuilder};
pub use rate_limit::RateLimiter;
pub use retry::RetryStrategy;

// Strategy & Pipeline
pub use pipeline::{FetchAttempt, FetchOutcome, FlavorPipeline};
pub use strategy::{FetchResult, FlavorRequest, FlavorStrategy, SourceKind, StrategyInfo};
