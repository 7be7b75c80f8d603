//! Oscar's Frozen Custard provider implementation.

mod descriptor;
pub mod locations;
mod strategies;

use async_trait::async_trait;
use custard_core::{FlavorInfo, FlavorProvider, LocationInfo, ProviderError, ProviderKind};
use custard_fetch::{FetchContext, FlavorPipeline};
use tracing::Instrument;

use crate::descriptor::ProviderSetup;
use crate::{extract, fixed};

pub use descriptor::oscars_descriptor;
pub use strategies::{OscarsHeadingStrategy, parse_home};

/// Public origin.
pub const BASE_URL: &str = "https://www.oscarscustard.com";

/// Oscar's adapter.
pub struct OscarsProvider {
    ctx: FetchContext,
    pipeline: FlavorPipeline,
}

impl OscarsProvider {
    /// Creates an adapter from host-supplied inputs.
    pub fn new(setup: &ProviderSetup) -> Result<Self, ProviderError> {
        Ok(Self {
            ctx: setup.context(ProviderKind::Oscars, BASE_URL)?,
            pipeline: FlavorPipeline::with_strategies(vec![Box::new(OscarsHeadingStrategy)]),
        })
    }
}

#[async_trait]
impl FlavorProvider for OscarsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Oscars
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
