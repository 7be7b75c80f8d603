//! Leduc's Frozen Custard provider implementation.
//!
//! A single store in Wales, WI. Today's flavor comes from the home page;
//! the forward schedule from the flavor calendar page.

mod descriptor;
pub mod locations;
pub mod parser;
mod strategies;

use async_trait::async_trait;
use custard_core::{
    FlavorInfo, FlavorProvider, LocationInfo, ProviderError, ProviderKind, ScheduledFlavor,
};
use custard_fetch::{FetchContext, FetchError, FlavorPipeline};
use tracing::{Instrument, debug};

use crate::descriptor::ProviderSetup;
use crate::{extract, fixed};

pub use descriptor::leducs_descriptor;
pub use strategies::{
    FLAVOR_SELECTORS, LeducsDatedStrategy, LeducsSelectorStrategy, date_label, parse_dated,
    parse_selectors,
};

/// Public origin.
pub const BASE_URL: &str = "https://www.leducscustard.com";

/// Path of the flavor calendar.
pub const FLAVOR_CALENDAR_PATH: &str = "/flavor-calendar";

/// Leduc's adapter.
pub struct LeducsProvider {
    ctx: FetchContext,
    pipeline: FlavorPipeline,
}

impl LeducsProvider {
    /// Creates an adapter from host-supplied inputs.
    pub fn new(setup: &ProviderSetup) -> Result<Self, ProviderError> {
        Ok(Self {
            ctx: setup.context(ProviderKind::Leducs, BASE_URL)?,
            pipeline: FlavorPipeline::with_strategies(vec![
                Box::new(LeducsDatedStrategy),
                Box::new(LeducsSelectorStrategy),
            ]),
        })
    }

    async fn calendar(&self, days: usize) -> Result<Vec<ScheduledFlavor>, FetchError> {
        let url = self.ctx.url(FLAVOR_CALENDAR_PATH)?;
        let page = self.ctx.get_text(&url).await?;
        parser::parse_calendar(&page, self.ctx.clock().today(), days)
    }
}

#[async_trait]
impl FlavorProvider for LeducsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Leducs
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
            self.calendar(days).await.unwrap_or_else(|error| {
                debug!(error = %error, "Upcoming flavors unavailable");
                Vec::new()
            })
        }
        .instrument(self.ctx.span().clone())
        .await
    }
}
