//! Flavor types.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

// ============================================================================
// Flavor Info
// ============================================================================

/// The result of a single "current flavor" query.
///
/// Only `name` is guaranteed; every other field is best-effort and
/// depends on what the vendor publishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorInfo {
    /// Display name of the flavor. Never empty.
    pub name: String,
    /// Marketing description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ingredients in vendor order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// Allergens in vendor order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// The vendor's "as of" time; usually the query time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_date: Option<DateTime<Utc>>,
    /// Price in the vendor's own format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Nutrition label to value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_info: Option<BTreeMap<String, String>>,
}

impl FlavorInfo {
    /// Creates a flavor with only a name.
    ///
    /// The name is trimmed. Returns an error if nothing is left.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CoreError::InvalidData("flavor name is empty".to_string()));
        }
        Ok(Self {
            name,
            description: None,
            ingredients: None,
            allergens: None,
            image_url: None,
            available_date: None,
            price: None,
            nutrition_info: None,
        })
    }

    /// Sets the description, ignoring blank text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.trim().is_empty() {
            self.description = Some(description.trim().to_string());
        }
        self
    }

    /// Sets the ingredients.
    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = Some(ingredients);
        self
    }

    /// Sets the allergens.
    pub fn with_allergens(mut self, allergens: Vec<String>) -> Self {
        self.allergens = Some(allergens);
        self
    }

    /// Sets the image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Sets the availability timestamp.
    pub fn with_available_date(mut self, at: DateTime<Utc>) -> Self {
        self.available_date = Some(at);
        self
    }

    /// Sets the price.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Sets the nutrition info.
    pub fn with_nutrition_info(mut self, info: BTreeMap<String, String>) -> Self {
        self.nutrition_info = Some(info);
        self
    }

    /// Converts to the attribute-mapping form.
    ///
    /// Absent fields are omitted and `available_date` is an ISO-8601 string.
    pub fn to_attributes(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct of strings always serializes to an object.
            _ => Map::new(),
        }
    }

    /// Rebuilds a flavor from its attribute-mapping form.
    pub fn from_attributes(attributes: &Map<String, Value>) -> Result<Self, CoreError> {
        let flavor: FlavorInfo = serde_json::from_value(Value::Object(attributes.clone()))?;
        if flavor.name.trim().is_empty() {
            return Err(CoreError::InvalidData("flavor name is empty".to_string()));
        }
        Ok(flavor)
    }
}

// ============================================================================
// Scheduled Flavor
// ============================================================================

/// A flavor the vendor has scheduled for a future day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledFlavor {
    /// Calendar day the flavor is served.
    pub date: NaiveDate,
    /// The flavor.
    pub flavor: FlavorInfo,
}

impl ScheduledFlavor {
    /// Creates a new scheduled flavor.
    pub fn new(date: NaiveDate, flavor: FlavorInfo) -> Self {
        Self { date, flavor }
    }
}

// ============================================================================
// Tests
// ============================================================================
