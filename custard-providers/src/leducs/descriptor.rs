//! Leduc's provider descriptor.

use std::sync::Arc;

use custard_core::{FlavorProvider, ProviderError, ProviderKind};

use super::{BASE_URL, LeducsProvider};
use crate::descriptor::{LocationSource, ProviderDescriptor, ProviderMetadata, ProviderSetup};

/// Descriptor for Leduc's Frozen Custard.
pub fn leducs_descriptor() -> ProviderDescriptor {
    ProviderDescriptor {
        kind: ProviderKind::Leducs,
        metadata: ProviderMetadata {
            display_name: ProviderKind::Leducs.display_name(),
            website: BASE_URL,
            location_source: LocationSource::Fixed,
            supports_upcoming: true,
        },
        factory: create,
    }
}

fn create(setup: &ProviderSetup) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
    Ok(Arc::new(LeducsProvider::new(setup)?))
}
