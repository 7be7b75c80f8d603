//! Culver's provider descriptor.

use std::sync::Arc;

use custard_core::{FlavorProvider, ProviderError, ProviderKind};

use super::CulversProvider;
use super::api::BASE_URL;
use crate::descriptor::{LocationSource, ProviderDescriptor, ProviderMetadata, ProviderSetup};

/// Descriptor for Culver's.
pub fn culvers_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        kind: ProviderKind::Culvers,
        metadata: ProviderMetadata {
            display_name: ProviderKind::Culvers.display_name(),
            website: BASE_URL,
            location_source: LocationSource::Remote,
            supports_upcoming: false,
        },
        factory: create,
    }
}

fn create(setup: &ProviderSetup) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
    Ok(Arc::new(CulversProvider::new(setup)?))
}
