//! Provider descriptor system.
//!
//! A descriptor contains all the static configuration for a vendor:
//! - Metadata (display name, website, how locations are discovered)
//! - A factory that builds a configured adapter

use std::fmt;
use std::sync::Arc;

use custard_core::{FlavorProvider, ProviderError, ProviderKind};
use custard_fetch::{Clock, FetchContext, ProviderConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Builds an adapter from host-supplied construction inputs.
pub type ProviderFactory = fn(&ProviderSetup) -> Result<Arc<dyn FlavorProvider>, ProviderError>;

/// Complete descriptor for a vendor.
pub struct ProviderDescriptor {
    /// Vendor identifier.
    pub kind: ProviderKind,
    /// Display metadata.
    pub metadata: ProviderMetadata,
    /// Adapter constructor.
    pub factory: ProviderFactory,
}

impl ProviderDescriptor {
    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        self.metadata.display_name
    }

    /// Returns the stable provider id.
    pub fn provider_id(&self) -> &'static str {
        self.kind.provider_id()
    }

    /// Builds an adapter instance.
    pub fn create(&self, setup: &ProviderSetup) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
        (self.factory)(setup)
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("kind", &self.kind)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// How a vendor's store locations are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSource {
    /// Searched remotely against the vendor's locator.
    Remote,
    /// A small table compiled into the adapter.
    Fixed,
}

impl LocationSource {
    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Remote => "remote search",
            Self::Fixed => "fixed list",
        }
    }
}

/// Static vendor information.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderMetadata {
    /// Human-readable vendor name.
    pub display_name: &'static str,
    /// Vendor's public website.
    pub website: &'static str,
    /// How locations are found.
    pub location_source: LocationSource,
    /// Whether the adapter can report a forward schedule.
    pub supports_upcoming: bool,
}

// ============================================================================
// Provider Setup
// ============================================================================

/// Everything the host hands an adapter at construction.
///
/// The HTTP client is the host's shared pool; adapters clone the handle
/// and never build their own.
#[derive(Debug, Clone)]
pub struct ProviderSetup {
    /// Shared HTTP client.
    pub client: Client,
    /// Adapter configuration.
    pub config: ProviderConfig,
    /// Host cancellation token. Adapters derive a child token from it.
    pub cancel: CancellationToken,
    /// Clock used for date-based extraction.
    pub clock: Clock,
}

impl ProviderSetup {
    /// Creates a setup with a fresh cancellation token and the system clock.
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        Self {
            client,
            config,
            cancel: CancellationToken::new(),
            clock: Clock::System,
        }
    }

    /// Ties the adapter to a host cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: &CancellationToken) -> Self {
        self.cancel = cancel.clone();
        self
    }

    /// Overrides the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the fetch context for an adapter of `kind`.
    pub fn context(
        &self,
        kind: ProviderKind,
        default_base_url: &'static str,
    ) -> Result<FetchContext, ProviderError> {
        Ok(FetchContext::builder(kind.provider_id(), self.client.clone())
            .config(&self.config)
            .default_base_url(default_base_url)
            .cancellation(&self.cancel)
            .clock(self.clock)
            .build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use custard_fetch::config::keys;

    #[test]
    fn test_invalid_config_is_config_error() {
        let setup = ProviderSetup::new(
            Client::new(),
            ProviderConfig::new().with(keys::MAX_RETRIES, "three"),
        );
        let err = setup
            .context(ProviderKind::Kopps, "https://www.kopps.com")
            .unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }

    #[test]
    fn test_base_url_override() {
        let setup = ProviderSetup::new(
            Client::new(),
            ProviderConfig::new().with(keys::BASE_URL, "http://127.0.0.1:9000"),
        );
        let ctx = setup
            .context(ProviderKind::Oscars, "https://www.oscarscustard.com")
            .unwrap();
        assert_eq!(ctx.base_url().as_str(), "http://127.0.0.1:9000/");
    }
}
