//! Provider-related types.
//!
//! - [`ProviderKind`] - Closed set of supported vendors
//! - [`LocationKey`] - Permanent identity of a configured location

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported flavor-of-the-day vendors.
///
/// The serialized form is the provider id. It is embedded in persisted
/// location keys and must never change for a shipped variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Culver's (nationwide chain, JSON locator + restaurant pages)
    Culvers,
    /// Kopp's Frozen Custard (Milwaukee area, monthly calendar page)
    Kopps,
    /// Oscar's Frozen Custard (Milwaukee area)
    Oscars,
    /// Goodberry's Frozen Custard (North Carolina)
    Goodberrys,
    /// Leduc's Frozen Custard (Wales, WI)
    Leducs,
}

impl ProviderKind {
    /// Returns the stable lowercase machine identifier.
    pub fn provider_id(&self) -> &'static str {
        match self {
            Self::Culvers => "culvers",
            Self::Kopps => "kopps",
            Self::Oscars => "oscars",
            Self::Goodberrys => "goodberrys",
            Self::Leducs => "leducs",
        }
    }

    /// Returns the human-readable vendor name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Culvers => "Culver's",
            Self::Kopps => "Kopp's Frozen Custard",
            Self::Oscars => "Oscar's Frozen Custard",
            Self::Goodberrys => "Goodberry's Frozen Custard",
            Self::Leducs => "Leduc's Frozen Custard",
        }
    }

    /// Returns all provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::Culvers,
            Self::Kopps,
            Self::Oscars,
            Self::Goodberrys,
            Self::Leducs,
        ]
    }

    /// Looks up a kind by provider id.
    pub fn from_provider_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.provider_id() == id)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider_id())
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['\'', ' '], "");
        Self::from_provider_id(&normalized).ok_or_else(|| CoreError::ProviderNotFound(s.to_string()))
    }
}

// ============================================================================
// Location Key
// ============================================================================

/// Permanent identity of one configured store: vendor plus vendor-scoped id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationKey {
    /// Vendor.
    pub provider: ProviderKind,
    /// Vendor-scoped store id.
    pub store_id: String,
}

impl LocationKey {
    /// Creates a new key.
    pub fn new(provider: ProviderKind, store_id: impl Into<String>) -> Self {
        Self {
            provider,
            store_id: store_id.into(),
        }
    }

    /// Returns the host-facing unique id, `{provider_id}_{store_id}`.
    pub fn unique_id(&self) -> String {
        format!("{}_{}", self.provider.provider_id(), self.store_id)
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider.provider_id(), self.store_id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_provider_ids_are_lowercase_tokens() {
        for kind in ProviderKind::all() {
            let id = kind.provider_id();
            assert!(!id.is_empty());
            assert!(!id.chars().any(char::is_whitespace), "{id} has whitespace");
            assert_eq!(id, id.to_lowercase());
        }
    }

    #[test]
    fn test_provider_ids_are_unique() {
        let ids: HashSet<_> = ProviderKind::all().iter().map(ProviderKind::provider_id).collect();
        assert_eq!(ids.len(), ProviderKind::all().len());
    }

    #[test]
    fn test_from_str_accepts_display_variants() {
        assert_eq!("culvers".parse::<ProviderKind>().unwrap(), ProviderKind::Culvers);
        assert_eq!("Kopp's".parse::<ProviderKind>().unwrap(), ProviderKind::Kopps);
        assert_eq!(" LEDUCS ".parse::<ProviderKind>().unwrap(), ProviderKind::Leducs);
        assert!("dairy-queen".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_location_key_unique_id() {
        let key = LocationKey::new(ProviderKind::Kopps, "kopps-glendale");
        assert_eq!(key.unique_id(), "kopps_kopps-glendale");
        assert_eq!(key.to_string(), "kopps/kopps-glendale");
    }
}
