//! Store location types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::region;

/// Latitude/longitude pair. Vendors supply both or neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A single physical store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// Vendor-scoped identifier, stable across queries.
    pub store_id: String,
    /// Store name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State, as the vendor writes it (code or full name).
    pub state: String,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Weekday name to display hours.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<BTreeMap<String, String>>,
    /// Store page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    /// Map position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl LocationInfo {
    /// Creates a location with the required fields.
    pub fn new(
        store_id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            zip_code: None,
            phone: None,
            hours: None,
            website_url: None,
            coordinates: None,
        }
    }

    /// Sets the postal code.
    pub fn with_zip_code(mut self, zip: impl Into<String>) -> Self {
        self.zip_code = Some(zip.into());
        self
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the hours table.
    pub fn with_hours(mut self, hours: BTreeMap<String, String>) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Sets the website URL.
    pub fn with_website_url(mut self, url: impl Into<String>) -> Self {
        self.website_url = Some(url.into());
        self
    }

    /// Sets both coordinates.
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self
    }

    /// Latitude, if known.
    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    /// Longitude, if known.
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }

    /// Human-readable label, `"{name} - {city}, {state}"`.
    pub fn display_name(&self) -> String {
        format!("{} - {}, {}", self.name, self.city, self.state)
    }

    /// Case-insensitive substring match of `term` against name, city and address.
    ///
    /// A blank term matches everything.
    pub fn matches_term(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.city, &self.address]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Whether this location is in `state`, given as a code or a full name.
    pub fn matches_state(&self, state: &str) -> bool {
        region::same_state(&self.state, state)
    }
}
