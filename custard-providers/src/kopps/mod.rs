//! Kopp's Frozen Custard provider implementation.
//!
//! Kopp's publishes a month of flavors on one page, keyed by day of month.
//! All stores serve the same flavors, so the store id only selects the
//! location record.

mod descriptor;
pub mod locations;
pub mod parser;
mod strategies;

use async_trait::async_trait;
use chrono::Days;
use custard_core::{
    FlavorInfo, FlavorProvider, LocationInfo, ProviderError, ProviderKind, ScheduledFlavor,
};
use custard_fetch::{FetchContext, FetchError, FlavorPipeline, clock};
use tracing::{Instrument, debug};

use crate::descriptor::ProviderSetup;
use crate::{extract, fixed};

pub use descriptor::kopps_descriptor;
pub use strategies::{FLAVOR_PREVIEW_PATH, KoppsCalendarStrategy};

/// Public origin.
pub const BASE_URL: &str = "https://www.kopps.com";

/// Kopp's adapter.
pub struct KoppsProvider {
    ctx: FetchContext,
    pipeline: FlavorPipeline,
}

impl KoppsProvider {
    /// Creates an adapter from host-supplied inputs.
    pub fn new(setup: &ProviderSetup) -> Result<Self, ProviderError> {
        Ok(Self {
            ctx: setup.context(ProviderKind::Kopps, BASE_URL)?,
            pipeline: FlavorPipeline::with_strategies(vec![Box::new(KoppsCalendarStrategy)]),
        })
    }

    async fn tomorrow(&self) -> Result<Option<ScheduledFlavor>, FetchError> {
        let url = self.ctx.url(FLAVOR_PREVIEW_PATH)?;
        let page = self.ctx.get_text(&url).await?;
        let Some(name) = parser::parse_tomorrow(&page)? else {
            return Ok(None);
        };

        let Some(date) = self.ctx.clock().today().checked_add_days(Days::new(1)) else {
            return Ok(None);
        };
        let mut flavor = FlavorInfo::new(name).map_err(|e| FetchError::extraction(e.to_string()))?;
        if let Some(midnight) = clock::local_midnight(date) {
            flavor = flavor.with_available_date(midnight);
        }
        Ok(Some(ScheduledFlavor::new(date, flavor)))
    }
}

#[async_trait]
impl FlavorProvider for KoppsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Kopps
    }

    async fn search_locations(&self, term: &str, state: Option<&str>) -> Vec<LocationInfo> {
        fixed::search(locations::LOCATIONS, term, state)
    }

    async fn get_location_by_id(&self, store_id: &str) -> Result<LocationInfo, ProviderError> {
        fixed::lookup(locations::LOCATIONS, store_id)
    }

    async fn get_current_flavor(&self, store_id: &str) -> Result<FlavorInfo, ProviderError> {
        fixed::lookup(locations::LOCATIONS, store_id)?;
        extract::current_flavor(&self.pipeline, &self.ctx, store_id)
            .instrument(self.ctx.span().clone())
            .await
    }

    async fn get_upcoming_flavors(&self, store_id: &str, days: usize) -> Vec<ScheduledFlavor> {
        if days == 0 || fixed::lookup(locations::LOCATIONS, store_id).is_err() {
            return Vec::new();
        }

        async {
            match self.tomorrow().await {
                Ok(entry) => entry.into_iter().take(days).collect(),
                Err(error) => {
                    debug!(error = %error, "Upcoming flavors unavailable");
                    Vec::new()
                }
            }
        }
        .instrument(self.ctx.span().clone())
        .await
    }
}
