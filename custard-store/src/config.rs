//! Configuration management.
//!
//! The config file lists the locations a host polls, each with its own
//! adapter options, plus general settings.
//!
//! ```json
//! {
//!   "general": { "update_interval_minutes": 30, "log_level": "info" },
//!   "locations": [
//!     {
//!       "provider": "culvers",
//!       "store_id": "madison-wi-mineral-point-rd",
//!       "name": "Culver's - Madison",
//!       "options": { "zip_code": "53717" }
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use custard_core::{LocationKey, ProviderKind};
use custard_fetch::ProviderConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json, save_json};

/// Poll interval used when none is configured, in minutes.
pub const DEFAULT_UPDATE_INTERVAL_MINUTES: u64 = 30;

/// Accepted poll intervals, in minutes.
pub const UPDATE_INTERVAL_RANGE: RangeInclusive<u64> = 5..=1440;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Configured locations, in display order.
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Poll interval for locations without their own, in minutes.
    #[serde(default = "default_update_interval")]
    pub update_interval_minutes: u64,
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// One configured location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    /// Vendor.
    pub provider: ProviderKind,
    /// Vendor-scoped store id.
    pub store_id: String,
    /// Display name chosen at setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Poll interval override, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval_minutes: Option<u64>,
    /// Adapter options.
    #[serde(default)]
    pub options: ProviderConfig,
}

fn default_update_interval() -> u64 {
    DEFAULT_UPDATE_INTERVAL_MINUTES
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            update_interval_minutes: default_update_interval(),
            log_level: default_log_level(),
        }
    }
}

fn check_interval(minutes: u64, what: &str) -> Result<(), StoreError> {
    if UPDATE_INTERVAL_RANGE.contains(&minutes) {
        Ok(())
    } else {
        Err(StoreError::Config(format!(
            "{what}: update interval {minutes} minutes is outside {}..={}",
            UPDATE_INTERVAL_RANGE.start(),
            UPDATE_INTERVAL_RANGE.end()
        )))
    }
}

// ============================================================================
// Location Entry
// ============================================================================

impl LocationEntry {
    /// Creates an entry with default options.
    pub fn new(provider: ProviderKind, store_id: impl Into<String>) -> Self {
        Self {
            provider,
            store_id: store_id.into(),
            name: None,
            update_interval_minutes: None,
            options: ProviderConfig::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the poll interval override.
    #[must_use]
    pub fn with_interval(mut self, minutes: u64) -> Self {
        self.update_interval_minutes = Some(minutes);
        self
    }

    /// Sets the adapter options.
    #[must_use]
    pub fn with_options(mut self, options: ProviderConfig) -> Self {
        self.options = options;
        self
    }

    /// Permanent identity of this location.
    pub fn key(&self) -> LocationKey {
        LocationKey::new(self.provider, &self.store_id)
    }

    /// The configured name, or the vendor and store id.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", self.provider.display_name(), self.store_id),
        }
    }

    /// Poll interval for this entry.
    pub fn update_interval(&self, general: &GeneralConfig) -> Duration {
        let minutes = self
            .update_interval_minutes
            .unwrap_or(general.update_interval_minutes);
        Duration::from_secs(minutes * 60)
    }
}

// ============================================================================
// Config
// ============================================================================

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads and validates configuration. A missing file is the default
    /// configuration.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !tokio::fs::try_exists(path).await? {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let config: Config = load_json(path).await?;
        config.validate()?;

        info!(
            path = %path.display(),
            locations = config.locations.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Validates and saves configuration.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        self.validate()?;
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks intervals and that no location appears twice.
    pub fn validate(&self) -> Result<(), StoreError> {
        check_interval(self.general.update_interval_minutes, "general")?;

        let mut seen = HashSet::new();
        for entry in &self.locations {
            let id = entry.key().unique_id();
            if entry.store_id.trim().is_empty() {
                return Err(StoreError::Config(format!(
                    "{} location has an empty store id",
                    entry.provider.provider_id()
                )));
            }
            if let Some(minutes) = entry.update_interval_minutes {
                check_interval(minutes, &id)?;
            }
            if !seen.insert(id.clone()) {
                return Err(StoreError::DuplicateLocation(id));
            }
        }
        Ok(())
    }

    /// The entry with this unique id (`{provider_id}_{store_id}`).
    pub fn find(&self, unique_id: &str) -> Option<&LocationEntry> {
        self.locations
            .iter()
            .find(|entry| entry.key().unique_id() == unique_id)
    }

    /// Adds a location.
    pub fn add_location(&mut self, entry: LocationEntry) -> Result<(), StoreError> {
        let id = entry.key().unique_id();
        if self.find(&id).is_some() {
            return Err(StoreError::DuplicateLocation(id));
        }
        if let Some(minutes) = entry.update_interval_minutes {
            check_interval(minutes, &id)?;
        }
        debug!(location = %id, "Adding location");
        self.locations.push(entry);
        Ok(())
    }

    /// Removes and returns the location with this unique id.
    pub fn remove_location(&mut self, unique_id: &str) -> Result<LocationEntry, StoreError> {
        let index = self
            .locations
            .iter()
            .position(|entry| entry.key().unique_id() == unique_id)
            .ok_or_else(|| StoreError::LocationNotFound(unique_id.to_string()))?;
        Ok(self.locations.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use custard_fetch::config::keys;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.general.update_interval_minutes, 30);
        assert_eq!(config.general.log_level, "info");
        assert!(config.locations.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_location_entry_json() {
        let json = r#"{
            "locations": [
                {"provider": "culvers", "store_id": "madison-wi-mineral-point-rd",
                 "options": {"zip_code": "53717"}},
                {"provider": "kopps", "store_id": "kopps-glendale", "update_interval_minutes": 60}
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let culvers = &config.locations[0];
        assert_eq!(culvers.provider, ProviderKind::Culvers);
        assert_eq!(culvers.options.zip_code().unwrap(), Some("53717"));
        assert_eq!(
            culvers.update_interval(&config.general),
            Duration::from_secs(30 * 60)
        );
        assert_eq!(
            config.locations[1].update_interval(&config.general),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn test_validate_interval_bounds() {
        let mut config = Config::default();
        config.general.update_interval_minutes = 4;
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));

        config.general.update_interval_minutes = 1440;
        assert!(config.validate().is_ok());

        config
            .locations
            .push(LocationEntry::new(ProviderKind::Kopps, "kopps-glendale").with_interval(1441));
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut config = Config::default();
        config
            .add_location(LocationEntry::new(ProviderKind::Oscars, "oscars-franklin"))
            .unwrap();
        let err = config
            .add_location(LocationEntry::new(ProviderKind::Oscars, "oscars-franklin"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateLocation(id) if id == "oscars_oscars-franklin"));

        // Same store id under another vendor is a different location.
        config
            .add_location(LocationEntry::new(ProviderKind::Kopps, "oscars-franklin"))
            .unwrap();

        config
            .locations
            .push(LocationEntry::new(ProviderKind::Oscars, "oscars-franklin"));
        assert!(matches!(
            config.validate(),
            Err(StoreError::DuplicateLocation(_))
        ));
    }

    #[test]
    fn test_remove_location() {
        let mut config = Config::default();
        config
            .add_location(
                LocationEntry::new(ProviderKind::Leducs, "leducs-wales").with_name("Leduc's"),
            )
            .unwrap();

        assert!(config.find("leducs_leducs-wales").is_some());
        let removed = config.remove_location("leducs_leducs-wales").unwrap();
        assert_eq!(removed.display_name(), "Leduc's");
        assert!(matches!(
            config.remove_location("leducs_leducs-wales"),
            Err(StoreError::LocationNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("custard").join("config.json");

        assert_eq!(Config::load_from(&path).await.unwrap(), Config::default());

        let mut config = Config::default();
        config
            .add_location(
                LocationEntry::new(ProviderKind::Culvers, "madison-wi-mineral-point-rd")
                    .with_options(ProviderConfig::new().with(keys::ZIP_CODE, "53717")),
            )
            .unwrap();
        config.save_to(&path).await.unwrap();

        let loaded = Config::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"general": {"update_interval_minutes": 1}}"#)
            .await
            .unwrap();

        assert!(matches!(
            Config::load_from(&path).await,
            Err(StoreError::Config(_))
        ));
    }
}
