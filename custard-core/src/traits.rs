//! Trait definitions for custard.
//!
//! [`FlavorProvider`] is the uniform contract every vendor adapter satisfies.
//! Hosts hold adapters as `Box<dyn FlavorProvider>` and never see vendor
//! specifics.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ProviderError;
use crate::models::{FlavorInfo, LocationInfo, ProviderKind, ScheduledFlavor};

/// Default look-ahead for [`FlavorProvider::get_upcoming_flavors`].
pub const DEFAULT_UPCOMING_DAYS: usize = 7;

/// A vendor adapter.
///
/// Implementors are responsible for:
/// - Listing and resolving the vendor's store locations
/// - Fetching today's flavor for a store
/// - Optionally reporting upcoming scheduled flavors
///
/// Search and upcoming-flavor queries are best-effort: they return an empty
/// list on any failure. Single-store queries report failures through
/// [`ProviderError`].
#[async_trait]
pub trait FlavorProvider: Send + Sync {
    /// Returns the vendor this adapter serves.
    fn kind(&self) -> ProviderKind;

    /// Human-readable vendor name.
    fn provider_name(&self) -> &str {
        self.kind().display_name()
    }

    /// Stable lowercase vendor id.
    fn provider_id(&self) -> &str {
        self.kind().provider_id()
    }

    /// Finds stores matching a free-text term, optionally restricted to a state.
    async fn search_locations(&self, term: &str, state: Option<&str>) -> Vec<LocationInfo>;

    /// Resolves a single store by id.
    async fn get_location_by_id(&self, store_id: &str) -> Result<LocationInfo, ProviderError>;

    /// Fetches today's flavor for a store.
    async fn get_current_flavor(&self, store_id: &str) -> Result<FlavorInfo, ProviderError>;

    /// Returns scheduled flavors for up to `days` days, ascending by date.
    ///
    /// Vendors that publish no schedule return an empty list.
    async fn get_upcoming_flavors(&self, _store_id: &str, _days: usize) -> Vec<ScheduledFlavor> {
        Vec::new()
    }

    /// Returns true iff today's flavor can be fetched right now.
    async fn test_connection(&self, store_id: &str) -> bool {
        match self.get_current_flavor(store_id).await {
            Ok(_) => true,
            Err(e) => {
                debug!(provider = %self.kind(), store_id, error = %e, "Connection test failed");
                false
            }
        }
    }
}
