//! CLI command implementations.

pub mod check;
pub mod config;
pub mod flavor;
pub mod location;
pub mod providers;
pub mod search;
pub mod upcoming;
pub mod watch;

use std::sync::Arc;

use anyhow::{Result, bail};
use custard_core::{FlavorProvider, ProviderKind};
use custard_fetch::ProviderConfig;
use custard_fetch::config::keys;
use custard_providers::{Discovery, ProviderRegistry, ProviderSetup};
use reqwest::Client;
use tokio_util::sync::CancellationToken;

// ============================================================================
// Host
// ============================================================================

/// Resources owned by the CLI and shared by every adapter it builds: one
/// connection pool and one cancellation token.
#[derive(Clone)]
pub struct Host {
    client: Client,
    cancel: CancellationToken,
}

impl Host {
    /// Builds the shared client.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(custard_fetch::shared_client()?))
    }

    /// Uses an existing client.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            cancel: CancellationToken::new(),
        }
    }

    /// Token every adapter built by this host observes.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Builds an adapter on the shared client.
    pub fn provider(
        &self,
        kind: ProviderKind,
        options: &ProviderConfig,
    ) -> Result<Arc<dyn FlavorProvider>> {
        Ok(ProviderRegistry::create(
            kind.provider_id(),
            self.client.clone(),
            options,
            &self.cancel,
        )?)
    }

    /// Builds the search and confirm flow on the shared client.
    pub fn discovery(&self, options: ProviderConfig) -> Discovery {
        Discovery::new(
            ProviderSetup::new(self.client.clone(), options).with_cancellation(&self.cancel),
        )
    }
}

/// Resolves a vendor id such as `culvers`.
pub fn parse_kind(provider_id: &str) -> Result<ProviderKind> {
    match ProviderKind::from_provider_id(provider_id) {
        Some(kind) => Ok(kind),
        None => {
            let known: Vec<_> = ProviderRegistry::kinds()
                .iter()
                .map(ProviderKind::provider_id)
                .collect();
            bail!(
                "Unknown provider: {provider_id} (expected one of {})",
                known.join(", ")
            )
        }
    }
}

/// Adapter options from command-line flags.
pub fn provider_options(zip: Option<&str>) -> ProviderConfig {
    match zip {
        Some(zip) => ProviderConfig::new().with(keys::ZIP_CODE, zip),
        None => ProviderConfig::new(),
    }
}
