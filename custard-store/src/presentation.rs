//! Rendering a location's flavor as a value plus attributes.

use custard_core::FlavorInfo;
use serde_json::{Map, Value};

/// Value shown when no flavor has been read.
pub const UNKNOWN_FLAVOR: &str = "Unknown";

/// The observable value: the flavor name, or [`UNKNOWN_FLAVOR`].
pub fn native_value(flavor: Option<&FlavorInfo>) -> &str {
    flavor.map_or(UNKNOWN_FLAVOR, |f| f.name.as_str())
}

/// Auxiliary attributes. Absent fields are left out; the date is ISO-8601.
pub fn attributes(
    flavor: Option<&FlavorInfo>,
    provider_name: &str,
    store_id: &str,
) -> Map<String, Value> {
    let mut attrs = Map::new();
    attrs.insert("provider".into(), provider_name.into());
    attrs.insert("location_id".into(), store_id.into());

    let Some(flavor) = flavor else {
        return attrs;
    };

    attrs.insert("name".into(), flavor.name.clone().into());
    if let Some(description) = &flavor.description {
        attrs.insert("description".into(), description.clone().into());
    }
    if let Some(ingredients) = &flavor.ingredients {
        attrs.insert("ingredients".into(), ingredients.clone().into());
    }
    if let Some(allergens) = &flavor.allergens {
        attrs.insert("allergens".into(), allergens.clone().into());
    }
    if let Some(price) = &flavor.price {
        attrs.insert("pricing".into(), price.clone().into());
    }
    if let Some(date) = flavor.available_date {
        attrs.insert("available_date".into(), date.to_rfc3339().into());
    }
    if let Some(image_url) = &flavor.image_url {
        attrs.insert("image_url".into(), image_url.clone().into());
    }
    if let Some(nutrition) = &flavor.nutrition_info {
        let nutrition: Map<String, Value> = nutrition
            .iter()
            .map(|(label, value)| (label.clone(), value.clone().into()))
            .collect();
        attrs.insert("nutrition_info".into(), nutrition.into());
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    #[test]
    fn test_native_value() {
        let flavor = FlavorInfo::new("Turtle").unwrap();
        assert_eq!(native_value(Some(&flavor)), "Turtle");
        assert_eq!(native_value(None), "Unknown");
    }

    #[test]
    fn test_attributes_only_present_fields() {
        let flavor = FlavorInfo::new("Turtle").unwrap().with_description("Pecans and caramel");
        let attrs = attributes(Some(&flavor), "Kopp's Frozen Custard", "kopps-glendale");

        assert_eq!(attrs["name"], "Turtle");
        assert_eq!(attrs["provider"], "Kopp's Frozen Custard");
        assert_eq!(attrs["location_id"], "kopps-glendale");
        assert_eq!(attrs["description"], "Pecans and caramel");
        for absent in [
            "ingredients",
            "allergens",
            "pricing",
            "available_date",
            "image_url",
            "nutrition_info",
        ] {
            assert!(!attrs.contains_key(absent), "{absent} should be absent");
        }
    }

    #[test]
    fn test_attributes_all_fields() {
        let at = Utc.with_ymd_and_hms(2025, 6, 15, 17, 30, 0).unwrap();
        let flavor = FlavorInfo::new("Mint Explosion")
            .unwrap()
            .with_ingredients(vec!["Mint custard".into(), "OREO pieces".into()])
            .with_allergens(vec!["Milk".into(), "Wheat".into()])
            .with_price("$4.29")
            .with_available_date(at)
            .with_image_url("https://cdn.culvers.com/mint.png")
            .with_nutrition_info(BTreeMap::from([("Calories".to_string(), "360".to_string())]));

        let attrs = attributes(Some(&flavor), "Culver's", "madison-wi-mineral-point-rd");
        assert_eq!(attrs["pricing"], "$4.29");
        assert_eq!(attrs["available_date"], "2025-06-15T17:30:00+00:00");
        assert_eq!(attrs["ingredients"][1], "OREO pieces");
        assert_eq!(attrs["nutrition_info"]["Calories"], "360");
    }

    #[test]
    fn test_attributes_without_flavor() {
        let attrs = attributes(None, "Oscar's Frozen Custard", "oscars-franklin");
        assert_eq!(attrs.len(), 2);
        assert!(!attrs.contains_key("name"));
    }
}
