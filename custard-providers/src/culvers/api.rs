//! Culver's restaurant locator.
//!
//! The locator answers a free-text geosearch with `data.geofences[]`, one
//! record per restaurant:
//!
//! ```json
//! {
//!   "description": "Madison, WI - Mineral Point Rd",
//!   "metadata": {
//!     "slug": "madison-wi-mineral-point-rd",
//!     "street": "7102 Mineral Point Rd",
//!     "city": "Madison",
//!     "state": "WI",
//!     "postalCode": "53717",
//!     "flavorOfDayName": "Turtle"
//!   },
//!   "geometryCenter": { "coordinates": [-89.51, 43.06] }
//! }
//! ```

use custard_core::{LocationInfo, region};
use custard_fetch::json::{self, DEFAULT_MAX_DEPTH};
use custard_fetch::{FetchContext, FetchError};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

/// Public origin.
pub const BASE_URL: &str = "https://www.culvers.com";

/// Locator endpoint.
pub const LOCATOR_PATH: &str = "/api/locator/getLocations";

/// Search radius, in meters (25 miles).
pub const SEARCH_RADIUS_METERS: u32 = 40_233;

/// Maximum records per search.
pub const SEARCH_LIMIT: u32 = 25;

// ============================================================================
// Requests
// ============================================================================

/// Runs a locator search around `location` (a zip code or "city, st").
#[instrument(skip(ctx))]
pub async fn geosearch(ctx: &FetchContext, location: &str) -> Result<Value, FetchError> {
    let url = ctx.url(LOCATOR_PATH)?;
    let radius = SEARCH_RADIUS_METERS.to_string();
    let limit = SEARCH_LIMIT.to_string();
    ctx.get_json(
        &url,
        &[
            ("location", location),
            ("radius", radius.as_str()),
            ("limit", limit.as_str()),
            ("layer", ""),
        ],
    )
    .await
}

/// The search text that should find `slug`.
///
/// A remembered zip code wins. Otherwise the city and state are read from
/// the slug: `madison-wi-mineral-point-rd` searches "madison, wi".
pub fn search_query(slug: &str, zip_code: Option<&str>) -> Option<String> {
    if let Some(zip) = zip_code.map(str::trim).filter(|z| !z.is_empty()) {
        return Some(zip.to_string());
    }
    let parts = SlugParts::parse(slug)?;
    Some(match parts.state {
        Some(state) => format!("{}, {}", parts.city.join(" "), state.to_ascii_lowercase()),
        None => parts.city.join(" "),
    })
}

// ============================================================================
// Response Mapping
// ============================================================================

/// Restaurant records in a locator response.
///
/// Falls back to a bounded search for location-shaped objects when the
/// response no longer has `data.geofences`.
pub fn records(response: &Value) -> Vec<&Value> {
    if let Some(geofences) = json::at(response, &["data", "geofences"]).and_then(Value::as_array) {
        return geofences.iter().collect();
    }
    debug!("No data.geofences in locator response, scanning for location records");
    json::find_location_like(response, DEFAULT_MAX_DEPTH)
}

/// Record fields live under `metadata` in geofences and at the top level
/// in records found by the structural scan.
fn fields(record: &Value) -> &Value {
    record.get("metadata").unwrap_or(record)
}

fn record_slug(record: &Value) -> Option<String> {
    let fields = fields(record);
    ["slug", "id", "storeId", "number"]
        .iter()
        .find_map(|key| match fields.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Maps one record to a location.
pub fn parse_record(record: &Value, base: &Url) -> Result<LocationInfo, FetchError> {
    let slug = record_slug(record).ok_or_else(|| FetchError::extraction("record has no slug"))?;
    let fields = fields(record);
    let city = json::str_at(fields, &["city"])
        .ok_or_else(|| FetchError::extraction(format!("record {slug} has no city")))?;
    let state = json::str_at(fields, &["state"])
        .ok_or_else(|| FetchError::extraction(format!("record {slug} has no state")))?;
    let street = json::str_at(fields, &["street"])
        .or_else(|| json::str_at(fields, &["address"]))
        .unwrap_or_default();

    let name = match json::str_at(record, &["description"]) {
        Some(description) => format!("Culver's - {description}"),
        None => format!("Culver's - {city}"),
    };

    let mut location = LocationInfo::new(&slug, name, street, city, state)
        .with_website_url(restaurant_url(base, &slug)?.to_string());

    if let Some(zip) = json::str_at(fields, &["postalCode"]) {
        location = location.with_zip_code(zip);
    }

    let lon_lat = json::at(record, &["geometryCenter", "coordinates"])
        .and_then(Value::as_array)
        .and_then(|c| Some((json::value_as_f64(c.first()?)?, json::value_as_f64(c.get(1)?)?)));
    if let Some((longitude, latitude)) = lon_lat {
        location = location.with_coordinates(latitude, longitude);
    }

    Ok(location)
}

/// Maps every well-formed record. Malformed records are logged and skipped.
pub fn parse_locations(response: &Value, base: &Url) -> Vec<LocationInfo> {
    records(response)
        .into_iter()
        .filter_map(|record| match parse_record(record, base) {
            Ok(location) => Some(location),
            Err(error) => {
                warn!(error = %error, "Skipping malformed locator record");
                None
            }
        })
        .collect()
}

/// The record for `slug`.
pub fn find_record<'a>(response: &'a Value, slug: &str) -> Option<&'a Value> {
    records(response)
        .into_iter()
        .find(|record| record_slug(record).as_deref() == Some(slug))
}

/// Today's flavor name carried on a locator record.
pub fn flavor_name(record: &Value) -> Option<&str> {
    json::str_at(fields(record), &["flavorOfDayName"])
}

/// The restaurant page for `slug`.
pub fn restaurant_url(base: &Url, slug: &str) -> Result<Url, FetchError> {
    base.join(&format!("/restaurants/{slug}"))
        .map_err(|e| FetchError::InvalidUrl(format!("restaurants/{slug}: {e}")))
}

// ============================================================================
// Slugs
// ============================================================================

/// City, state and street words read out of a restaurant slug.
#[derive(Debug, PartialEq, Eq)]
struct SlugParts<'a> {
    city: Vec<&'a str>,
    state: Option<&'a str>,
    street: Vec<&'a str>,
}

impl<'a> SlugParts<'a> {
    /// Splits on `-`. The first two-letter word after the city that names a
    /// state is the state.
    fn parse(slug: &'a str) -> Option<Self> {
        let words: Vec<&str> = slug.trim().split('-').filter(|w| !w.is_empty()).collect();
        if words.len() < 2 {
            return None;
        }
        let state_at = words
            .iter()
            .skip(1)
            .position(|w| w.len() == 2 && region::state_code(w).is_some())
            .map(|i| i + 1);

        Some(match state_at {
            Some(i) => Self {
                city: words[..i].to_vec(),
                state: Some(words[i]),
                street: words[i + 1..].to_vec(),
            },
            None => Self {
                city: words,
                state: None,
                street: Vec::new(),
            },
        })
    }
}

/// Whether `slug` is shaped like a restaurant slug.
pub fn is_valid_slug(slug: &str) -> bool {
    SlugParts::parse(slug).is_some()
}

fn title_case(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A best-effort location built from the slug alone.
pub fn synthesize_location(slug: &str, base: &Url) -> Option<LocationInfo> {
    let parts = SlugParts::parse(slug)?;
    let city = title_case(&parts.city);
    let state = parts.state.map(str::to_ascii_uppercase).unwrap_or_default();
    let street = title_case(&parts.street);
    let url = restaurant_url(base, slug.trim()).ok()?;

    Some(
        LocationInfo::new(slug.trim(), format!("Culver's - {city}"), street, city, state)
            .with_website_url(url.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse(BASE_URL).unwrap()
    }

    fn sample() -> Value {
        json!({
            "data": {
                "geofences": [
                    {
                        "description": "Madison, WI - Mineral Point Rd",
                        "metadata": {
                            "slug": "madison-wi-mineral-point-rd",
                            "street": "7102 Mineral Point Rd",
                            "city": "Madison",
                            "state": "WI",
                            "postalCode": "53717",
                            "flavorOfDayName": "Turtle"
                        },
                        "geometryCenter": {"coordinates": [-89.51, 43.06]}
                    },
                    {"description": "broken", "metadata": {"city": "Nowhere"}},
                    {
                        "description": "Verona, WI",
                        "metadata": {
                            "slug": "verona",
                            "street": "1 Main St",
                            "city": "Verona",
                            "state": "WI"
                        }
                    }
                ]
            }
        })
    }

    #[test]
    fn test_parse_locations_skips_malformed() {
        let locations = parse_locations(&sample(), &base());
        assert_eq!(locations.len(), 2);

        let madison = &locations[0];
        assert_eq!(madison.store_id, "madison-wi-mineral-point-rd");
        assert_eq!(madison.name, "Culver's - Madison, WI - Mineral Point Rd");
        assert_eq!(madison.zip_code.as_deref(), Some("53717"));
        assert_eq!(madison.latitude(), Some(43.06));
        assert_eq!(madison.longitude(), Some(-89.51));
        assert_eq!(
            madison.website_url.as_deref(),
            Some("https://www.culvers.com/restaurants/madison-wi-mineral-point-rd")
        );
        assert!(locations[1].coordinates.is_none());
    }

    #[test]
    fn test_structural_fallback() {
        let response = json!({
            "result": {
                "restaurants": [
                    {"slug": "sun-prairie", "city": "Sun Prairie", "state": "WI", "street": "1 Broadway"}
                ]
            }
        });
        let locations = parse_locations(&response, &base());
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].name, "Culver's - Sun Prairie");
    }

    #[test]
    fn test_find_record_and_flavor() {
        let response = sample();
        let record = find_record(&response, "madison-wi-mineral-point-rd").unwrap();
        assert_eq!(flavor_name(record), Some("Turtle"));
        assert!(find_record(&response, "elsewhere").is_none());
    }

    #[test]
    fn test_search_query() {
        assert_eq!(
            search_query("madison-wi-mineral-point-rd", None).as_deref(),
            Some("madison, wi")
        );
        assert_eq!(
            search_query("sun-prairie-wi-main-st", None).as_deref(),
            Some("sun prairie, wi")
        );
        assert_eq!(
            search_query("madison-wi-mineral-point-rd", Some("53717")).as_deref(),
            Some("53717")
        );
        assert_eq!(search_query("madison", None), None);
    }

    #[test]
    fn test_synthesize_location() {
        let location = synthesize_location("madison-wi-mineral-point-rd", &base()).unwrap();
        assert_eq!(location.city, "Madison");
        assert_eq!(location.state, "WI");
        assert_eq!(location.address, "Mineral Point Rd");
        assert_eq!(location.name, "Culver's - Madison");

        assert!(synthesize_location("", &base()).is_none());
        assert!(synthesize_location("---", &base()).is_none());
        assert!(!is_valid_slug("madison"));
    }
}
