//! Compiled-in location tables for vendors with only a few stores.

use std::collections::BTreeMap;

use custard_core::{LocationInfo, ProviderError};

/// One row of a fixed location table.
#[derive(Debug, Clone, Copy)]
pub struct StoreRecord {
    /// Vendor-scoped id.
    pub store_id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Street address.
    pub address: &'static str,
    /// City.
    pub city: &'static str,
    /// State code.
    pub state: &'static str,
    /// Postal code.
    pub zip_code: Option<&'static str>,
    /// Phone number.
    pub phone: Option<&'static str>,
    /// Opening hours by lowercase weekday.
    pub hours: Option<&'static [(&'static str, &'static str)]>,
    /// Store page.
    pub website_url: Option<&'static str>,
}

impl StoreRecord {
    /// Converts the row to a [`LocationInfo`].
    pub fn to_location(&self) -> LocationInfo {
        let mut location =
            LocationInfo::new(self.store_id, self.name, self.address, self.city, self.state);
        if let Some(zip) = self.zip_code {
            location = location.with_zip_code(zip);
        }
        if let Some(phone) = self.phone {
            location = location.with_phone(phone);
        }
        if let Some(hours) = self.hours {
            let hours: BTreeMap<String, String> = hours
                .iter()
                .map(|(day, open)| ((*day).to_string(), (*open).to_string()))
                .collect();
            location = location.with_hours(hours);
        }
        if let Some(url) = self.website_url {
            location = location.with_website_url(url);
        }
        location
    }
}

/// Rows matching `term` (name, city or address) and the optional state filter.
///
/// A blank term matches every row.
pub fn search(table: &[StoreRecord], term: &str, state: Option<&str>) -> Vec<LocationInfo> {
    table
        .iter()
        .map(StoreRecord::to_location)
        .filter(|location| location.matches_term(term))
        .filter(|location| state.is_none_or(|s| location.matches_state(s)))
        .collect()
}

/// The row with `store_id`, or [`ProviderError::LocationNotFound`].
pub fn lookup(table: &[StoreRecord], store_id: &str) -> Result<LocationInfo, ProviderError> {
    table
        .iter()
        .find(|record| record.store_id == store_id)
        .map(StoreRecord::to_location)
        .ok_or_else(|| ProviderError::location_not_found(store_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[StoreRecord] = &[
        StoreRecord {
            store_id: "a-madison",
            name: "A - Madison",
            address: "1 Main St.",
            city: "Madison",
            state: "WI",
            zip_code: Some("53703"),
            phone: None,
            hours: Some(&[("monday", "11am-9pm")]),
            website_url: None,
        },
        StoreRecord {
            store_id: "a-raleigh",
            name: "A - Raleigh",
            address: "2 Oak Ave.",
            city: "Raleigh",
            state: "NC",
            zip_code: None,
            phone: Some("(919) 555-0100"),
            hours: None,
            website_url: None,
        },
    ];

    #[test]
    fn test_search_term_and_state() {
        assert_eq!(search(TABLE, "", None).len(), 2);
        assert_eq!(search(TABLE, "OAK", None)[0].store_id, "a-raleigh");
        assert_eq!(search(TABLE, "", Some("wisconsin"))[0].store_id, "a-madison");
        assert!(search(TABLE, "madison", Some("NC")).is_empty());
    }

    #[test]
    fn test_lookup() {
        let location = lookup(TABLE, "a-madison").unwrap();
        assert_eq!(location.zip_code.as_deref(), Some("53703"));
        assert_eq!(location.hours.unwrap()["monday"], "11am-9pm");

        let err = lookup(TABLE, "a-nowhere").unwrap_err();
        assert!(matches!(err, ProviderError::LocationNotFound { .. }));
    }
}
