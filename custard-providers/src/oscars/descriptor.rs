//! Oscar's provider descriptor.

use std::sync::Arc;

use custard_core::{FlavorProvider, ProviderError, ProviderKind};

use super::{BASE_URL, OscarsProvider};
use crate::descriptor::{LocationSource, ProviderDescriptor, ProviderMetadata, ProviderSetup};

/// Descriptor for Oscar's Frozen Custard.
pub fn oscars_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        kind: ProviderKind::Oscars,
        metadata: ProviderMetadata {
            display_name: ProviderKind::Oscars.display_name(),
            website: BASE_URL,
            location_source: LocationSource::Fixed,
            supports_upcoming: false,
        },
        factory: create,
    }
}

fn create(setup: &ProviderSetup) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
    Ok(Arc::new(OscarsProvider::new(setup)?))
}
