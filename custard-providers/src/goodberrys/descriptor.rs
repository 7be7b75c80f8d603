//! Goodberry's provider descriptor.

use std::sync::Arc;

use custard_core::{FlavorProvider, ProviderError, ProviderKind};

use super::{BASE_URL, GoodberrysProvider};
use crate::descriptor::{LocationSource, ProviderDescriptor, ProviderMetadata, ProviderSetup};

/// Descriptor for Goodberry's Frozen Custard.
pub fn goodberrys_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        kind: ProviderKind::Goodberrys,
        metadata: ProviderMetadata {
            display_name: ProviderKind::Goodberrys.display_name(),
            website: BASE_URL,
            location_source: LocationSource::Fixed,
            supports_upcoming: false,
        },
        factory: create,
    }
}

fn create(setup: &ProviderSetup) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
    Ok(Arc::new(GoodberrysProvider::new(setup)?))
}
