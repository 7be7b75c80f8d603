//! Goodberry's Frozen Custard provider implementation.
//!
//! Nine North Carolina stores share one home-page flavor of the day.

mod descriptor;
pub mod locations;
mod strategies;

use async_trait::async_trait;
use custard_core::{FlavorInfo, FlavorProvider, LocationInfo, ProviderError, ProviderKind};
use custard_fetch::{FetchContext, FlavorPipeline};
use tracing::Instrument;

use crate::descriptor::ProviderSetup;
use crate::{extract, fixed};

pub use descriptor::goodberrys_descriptor;
pub use strategies::{
    GoodberrysBlockStrategy, GoodberrysClassStrategy, parse_block, parse_fotd_class,
};

/// Public origin.
pub const BASE_URL: &str = "https://goodberrys.com";

/// Goodberry's adapter.
pub struct GoodberrysProvider {
    ctx: FetchContext,
    pipeline: FlavorPipeline,
}

impl GoodberrysProvider {
    /// Creates an adapter from host-supplied inputs.
    pub fn new(setup: &ProviderSetup) -> Result<Self, ProviderError> {
        Ok(Self {
            ctx: setup.context(ProviderKind::Goodberrys, BASE_URL)?,
            pipeline: FlavorPipeline::with_strategies(vec![
                Box::new(GoodberrysBlockStrategy),
                Box::new(GoodberrysClassStrategy),
            ]),
        })
    }
}

#[async_trait]
impl FlavorProvider for GoodberrysProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Goodberrys
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
}
