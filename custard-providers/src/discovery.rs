//! Interactive location discovery.
//!
//! Drives the search, lookup and connection check a host runs before it
//! saves a configured location.

use std::sync::Arc;

use custard_core::{FlavorProvider, LocationInfo, LocationKey, ProviderError, ProviderKind};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::descriptor::{LocationSource, ProviderSetup};
use crate::registry::ProviderRegistry;

/// Shortest search term sent to a remote locator.
pub const MIN_SEARCH_TERM_LENGTH: usize = 2;

/// Discovery failures.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The term is too short for a remote search.
    #[error("Search term must be at least {min} characters")]
    TermTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// The adapter failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A location the host may save.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedLocation {
    /// Vendor.
    pub provider: ProviderKind,
    /// The resolved location.
    pub location: LocationInfo,
    /// Whether today's flavor could be read.
    pub flavor_ok: bool,
}

impl ConfirmedLocation {
    /// Permanent identity of the confirmed location.
    pub fn key(&self) -> LocationKey {
        LocationKey::new(self.provider, &self.location.store_id)
    }
}

/// Search and confirm flow over the registered vendors.
#[derive(Debug, Clone)]
pub struct Discovery {
    setup: ProviderSetup,
}

impl Discovery {
    /// Creates a discovery flow building adapters from `setup`.
    pub fn new(setup: ProviderSetup) -> Self {
        Self { setup }
    }

    fn provider(&self, kind: ProviderKind) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
        ProviderRegistry::create_with(kind.provider_id(), &self.setup)
    }

    /// Searches `kind`'s locations.
    ///
    /// Fixed-table vendors accept any term, including an empty one. Remote
    /// vendors need at least [`MIN_SEARCH_TERM_LENGTH`] characters.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        kind: ProviderKind,
        term: &str,
        state: Option<&str>,
    ) -> Result<Vec<LocationInfo>, DiscoveryError> {
        let remote = ProviderRegistry::get(kind)
            .is_some_and(|d| d.metadata.location_source == LocationSource::Remote);
        if remote && term.trim().chars().count() < MIN_SEARCH_TERM_LENGTH {
            return Err(DiscoveryError::TermTooShort {
                min: MIN_SEARCH_TERM_LENGTH,
            });
        }

        let locations = self.provider(kind)?.search_locations(term, state).await;
        debug!(count = locations.len(), "Search finished");
        Ok(locations)
    }

    /// Resolves `store_id` and checks that a flavor can be read for it.
    #[instrument(skip(self))]
    pub async fn confirm(
        &self,
        kind: ProviderKind,
        store_id: &str,
    ) -> Result<ConfirmedLocation, DiscoveryError> {
        let provider = self.provider(kind)?;
        let location = provider.get_location_by_id(store_id).await?;
        let flavor_ok = provider.test_connection(&location.store_id).await;
        info!(store_id = %location.store_id, flavor_ok, "Location confirmed");

        Ok(ConfirmedLocation {
            provider: kind,
            location,
            flavor_ok,
        })
    }
}
