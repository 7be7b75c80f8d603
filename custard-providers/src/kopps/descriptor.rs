//! Kopp's provider descriptor.

use std::sync::Arc;

use custard_core::{FlavorProvider, ProviderError, ProviderKind};

use super::{BASE_URL, KoppsProvider};
use crate::descriptor::{LocationSource, ProviderDescriptor, ProviderMetadata, ProviderSetup};

/// Descriptor for Kopp's Frozen Custard.
pub fn kopps_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        kind: ProviderKind::Kopps,
        metadata: ProviderMetadata {
            display_name: ProviderKind::Kopps.display_name(),
            website: BASE_URL,
            location_source: LocationSource::Fixed,
            supports_upcoming: true,
        },
        factory: create,
    }
}

fn create(setup: &ProviderSetup) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
    Ok(Arc::new(KoppsProvider::new(setup)?))
}
