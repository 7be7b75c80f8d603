//! Culver's provider implementation.
//!
//! Locations come from the restaurant locator. Today's flavor is tried, in
//! order, from the locator record, the restaurant page's label heading and
//! the restaurant page's `__NEXT_DATA__` payload. A locator flavor reading
//! "closed" ends the search.
//!
//! A store id missing from a successful locator search is unknown. When the
//! locator itself cannot be reached, the location is built from the slug.
//!
//! Config: `zip_code` narrows the locator search to the store's area; when
//! absent the city and state are read from the store slug.

pub mod api;
mod descriptor;
pub mod strategies;

use async_trait::async_trait;
use custard_core::{FlavorInfo, FlavorProvider, LocationInfo, ProviderError, ProviderKind};
use custard_fetch::{FetchContext, FetchError, FlavorPipeline};
use tracing::{Instrument, debug, warn};

use crate::descriptor::ProviderSetup;
use crate::extract;

pub use descriptor::culvers_descriptor;
pub use strategies::{CulversHeadingStrategy, CulversLocatorStrategy, CulversNextDataStrategy};

/// Culver's adapter.
pub struct CulversProvider {
    ctx: FetchContext,
    zip_code: Option<String>,
    pipeline: FlavorPipeline,
}

impl CulversProvider {
    /// Creates an adapter from host-supplied inputs.
    pub fn new(setup: &ProviderSetup) -> Result<Self, ProviderError> {
        let ctx = setup.context(ProviderKind::Culvers, api::BASE_URL)?;
        let zip_code = setup.config.zip_code()?.map(str::to_string);
        let pipeline = FlavorPipeline::with_strategies(vec![
            Box::new(CulversLocatorStrategy::new(zip_code.clone())),
            Box::new(CulversHeadingStrategy),
            Box::new(CulversNextDataStrategy),
        ]);
        Ok(Self {
            ctx,
            zip_code,
            pipeline,
        })
    }

    async fn lookup(&self, slug: &str) -> Result<Option<LocationInfo>, FetchError> {
        let Some(query) = api::search_query(slug, self.zip_code.as_deref()) else {
            return Ok(None);
        };
        let response = api::geosearch(&self.ctx, &query).await?;
        Ok(api::parse_locations(&response, self.ctx.base_url())
            .into_iter()
            .find(|location| location.store_id == slug))
    }
}

#[async_trait]
impl FlavorProvider for CulversProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Culvers
    }

    async fn search_locations(&self, term: &str, state: Option<&str>) -> Vec<LocationInfo> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        async {
            match api::geosearch(&self.ctx, term).await {
                Ok(response) => api::parse_locations(&response, self.ctx.base_url())
                    .into_iter()
                    .filter(|location| state.is_none_or(|s| location.matches_state(s)))
                    .collect(),
                Err(error) => {
                    warn!(term, error = %error, "Location search failed");
                    Vec::new()
                }
            }
        }
        .instrument(self.ctx.span().clone())
        .await
    }

    async fn get_location_by_id(&self, store_id: &str) -> Result<LocationInfo, ProviderError> {
        let slug = store_id.trim();
        if !api::is_valid_slug(slug) {
            return Err(ProviderError::location_not_found(store_id));
        }

        async {
            match self.lookup(slug).await {
                Ok(Some(location)) => Ok(location),
                Ok(None) => {
                    debug!(slug, "Store not in locator results");
                    Err(ProviderError::location_not_found(slug))
                }
                Err(FetchError::Cancelled) => Err(ProviderError::from(FetchError::Cancelled)),
                Err(error) => {
                    // Locator unreachable: the slug still names the store.
                    debug!(slug, error = %error, "Locator lookup failed, using slug");
                    api::synthesize_location(slug, self.ctx.base_url())
                        .ok_or_else(|| ProviderError::location_not_found(slug))
                }
            }
        }
        .instrument(self.ctx.span().clone())
        .await
    }

    async fn get_current_flavor(&self, store_id: &str) -> Result<FlavorInfo, ProviderError> {
        let slug = store_id.trim();
        if !api::is_valid_slug(slug) {
            return Err(ProviderError::location_not_found(store_id));
        }

        extract::current_flavor(&self.pipeline, &self.ctx, slug)
            .instrument(self.ctx.span().clone())
            .await
    }
}
