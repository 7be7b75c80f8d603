//! Provider registry for managing all provider descriptors.
//!
//! The registry provides static access to every vendor's descriptor and is
//! the factory hosts use to build adapters by provider id.

use std::sync::{Arc, OnceLock};

use custard_core::{FlavorProvider, ProviderError, ProviderKind};
use custard_fetch::ProviderConfig;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::culvers::culvers_descriptor;
use crate::descriptor::{ProviderDescriptor, ProviderSetup};
use crate::goodberrys::goodberrys_descriptor;
use crate::kopps::kopps_descriptor;
use crate::leducs::leducs_descriptor;
use crate::oscars::oscars_descriptor;

// ============================================================================
// Static Registry
// ============================================================================

/// Static storage for all provider descriptors.
static DESCRIPTORS: OnceLock<Vec<ProviderDescriptor>> = OnceLock::new();

/// Initializes all provider descriptors, remote-search vendors first.
fn init_descriptors() -> Vec<ProviderDescriptor> {
    vec![
        culvers_descriptor(),
        kopps_descriptor(),
        oscars_descriptor(),
        goodberrys_descriptor(),
        leducs_descriptor(),
    ]
}

// ============================================================================
// Provider Registry
// ============================================================================

/// Global registry of all provider descriptors.
///
/// The registry is initialized lazily on first access and provides
/// thread-safe access to provider configurations.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors.
    pub fn all() -> &'static [ProviderDescriptor] {
        DESCRIPTORS.get_or_init(init_descriptors)
    }

    /// Gets a provider descriptor by kind.
    pub fn get(kind: ProviderKind) -> Option<&'static ProviderDescriptor> {
        Self::all().iter().find(|d| d.kind == kind)
    }

    /// Gets a provider descriptor by provider id.
    pub fn get_by_id(provider_id: &str) -> Option<&'static ProviderDescriptor> {
        let kind = provider_id.parse::<ProviderKind>().ok()?;
        Self::get(kind)
    }

    /// Returns the number of registered providers.
    pub fn count() -> usize {
        Self::all().len()
    }

    /// Returns all provider kinds.
    pub fn kinds() -> Vec<ProviderKind> {
        Self::all().iter().map(|d| d.kind).collect()
    }

    /// Builds an adapter for `provider_id`.
    ///
    /// An unknown id or an invalid configuration is [`ProviderError::Config`].
    pub fn create(
        provider_id: &str,
        client: Client,
        config: &ProviderConfig,
        cancel: &CancellationToken,
    ) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
        let setup = ProviderSetup::new(client, config.clone()).with_cancellation(cancel);
        Self::create_with(provider_id, &setup)
    }

    /// Builds an adapter for `provider_id` from a prepared setup.
    pub fn create_with(
        provider_id: &str,
        setup: &ProviderSetup,
    ) -> Result<Arc<dyn FlavorProvider>, ProviderError> {
        let descriptor = Self::get_by_id(provider_id)
            .ok_or_else(|| ProviderError::Config(format!("unknown provider: {provider_id}")))?;
        debug!(provider = descriptor.provider_id(), "Creating provider");
        descriptor.create(setup)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::LocationSource;
    use custard_fetch::config::keys;

    #[test]
    fn test_registry_all_providers() {
        assert_eq!(ProviderRegistry::count(), ProviderKind::all().len());
    }

    #[test]
    fn test_registry_get_all_kinds() {
        for kind in ProviderKind::all() {
            let desc = ProviderRegistry::get(*kind);
            assert!(desc.is_some(), "Should find provider {kind:?}");
            assert_eq!(desc.unwrap().kind, *kind);
            assert_eq!(desc.unwrap().display_name(), kind.display_name());
        }
    }

    #[test]
    fn test_get_by_id() {
        assert_eq!(
            ProviderRegistry::get_by_id("kopps").unwrap().kind,
            ProviderKind::Kopps
        );
        assert!(ProviderRegistry::get_by_id("dairy-queen").is_none());
    }

    #[test]
    fn test_location_sources() {
        let remote: Vec<_> = ProviderRegistry::all()
            .iter()
            .filter(|d| d.metadata.location_source == LocationSource::Remote)
            .map(|d| d.kind)
            .collect();
        assert_eq!(remote, vec![ProviderKind::Culvers]);
    }

    #[test]
    fn test_create_by_id() {
        let provider = ProviderRegistry::create(
            "oscars",
            Client::new(),
            &ProviderConfig::new(),
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(provider.provider_id(), "oscars");
        assert_eq!(provider.provider_name(), "Oscar's Frozen Custard");
    }

    #[test]
    fn test_create_unknown_or_misconfigured() {
        let cancel = CancellationToken::new();
        let err = ProviderRegistry::create("nope", Client::new(), &ProviderConfig::new(), &cancel)
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::Config(_)));

        let bad = ProviderConfig::new().with(keys::REQUEST_TIMEOUT, -1.0);
        let err = ProviderRegistry::create("culvers", Client::new(), &bad, &cancel)
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::Config(_)));
    }
}
