//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use custard_core::{FlavorInfo, LocationKey, ScheduledFlavor};
use custard_providers::ProviderDescriptor;
use custard_store::{LocationEntry, LocationStatus, UpdateState, native_value};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

// ============================================================================
// Output Types
// ============================================================================

/// Vendor info output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfoOutput {
    pub id: String,
    pub display_name: String,
    pub website: String,
    pub location_source: String,
    pub supports_upcoming: bool,
}

/// Today's flavor at one location, as a host entity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorOutput {
    pub unique_id: String,
    pub state: String,
    pub attributes: Map<String, Value>,
}

/// One upcoming day.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledOutput {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub flavor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A saved location.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryOutput {
    pub unique_id: String,
    pub provider: String,
    pub store_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_interval_minutes: Option<u64>,
}

/// A polled location.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOutput {
    pub unique_id: String,
    pub flavor: String,
    #[serde(flatten)]
    pub update: UpdateState,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_datetime_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A check result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutput {
    pub unique_id: String,
    pub ok: bool,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_date<S>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&date.format("%Y-%m-%d").to_string())
}

#[allow(clippy::ref_option)]
fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the vendor list.
    pub fn format_providers(&self, providers: &[ProviderDescriptor]) -> Result<String> {
        let outputs: Vec<ProviderInfoOutput> = providers
            .iter()
            .map(|desc| ProviderInfoOutput {
                id: desc.provider_id().to_string(),
                display_name: desc.display_name().to_string(),
                website: desc.metadata.website.to_string(),
                location_source: desc.metadata.location_source.label().to_string(),
                supports_upcoming: desc.metadata.supports_upcoming,
            })
            .collect();

        self.format(&outputs)
    }

    /// Formats today's flavor with its host attributes.
    pub fn format_flavor(
        &self,
        key: &LocationKey,
        flavor: Option<&FlavorInfo>,
        attributes: Map<String, Value>,
    ) -> Result<String> {
        self.format(&FlavorOutput {
            unique_id: key.unique_id(),
            state: native_value(flavor).to_string(),
            attributes,
        })
    }

    /// Formats an upcoming schedule.
    pub fn format_upcoming(&self, schedule: &[ScheduledFlavor]) -> Result<String> {
        let outputs: Vec<ScheduledOutput> = schedule
            .iter()
            .map(|entry| ScheduledOutput {
                date: entry.date,
                flavor: entry.flavor.name.clone(),
                description: entry.flavor.description.clone(),
            })
            .collect();

        self.format(&outputs)
    }

    /// Formats saved locations.
    pub fn format_entries(&self, entries: &[LocationEntry]) -> Result<String> {
        let outputs: Vec<EntryOutput> = entries.iter().map(entry_to_output).collect();
        self.format(&outputs)
    }

    /// Formats one polled location.
    pub fn format_status(&self, key: &LocationKey, status: &LocationStatus) -> Result<String> {
        self.format(&StatusOutput {
            unique_id: key.unique_id(),
            flavor: native_value(status.flavor.as_ref()).to_string(),
            update: status.state.clone(),
            updated_at: status.updated_at,
        })
    }

    /// Formats a check result.
    pub fn format_check(&self, key: &LocationKey, ok: bool) -> Result<String> {
        self.format(&CheckOutput {
            unique_id: key.unique_id(),
            ok,
        })
    }
}

fn entry_to_output(entry: &LocationEntry) -> EntryOutput {
    EntryOutput {
        unique_id: entry.key().unique_id(),
        provider: entry.provider.provider_id().to_string(),
        store_id: entry.store_id.clone(),
        name: entry.display_name(),
        update_interval_minutes: entry.update_interval_minutes,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_entry_output() {
        let entry = LocationEntry::new(custard_core::ProviderKind::Kopps, "kopps-glendale");
        let output = entry_to_output(&entry);
        assert_eq!(output.unique_id, "kopps_kopps-glendale");
        assert_eq!(output.provider, "kopps");
        assert!(output.update_interval_minutes.is_none());
    }
}
