//! Culver's flavor strategies.
//!
//! 1. `culvers.locator` - the locator record's flavor field
//! 2. `culvers.heading` - the `h2` preceding the "Today's Flavor of the Day" label
//! 3. `culvers.next_data` - the restaurant page's `__NEXT_DATA__` payload

use async_trait::async_trait;
use custard_core::FlavorInfo;
use custard_fetch::html::{self, element_text, normalize_quotes, parse_selector};
use custard_fetch::json;
use custard_fetch::{FetchError, FlavorRequest, FlavorStrategy, SourceKind};
use scraper::{ElementRef, Html};
use tracing::{debug, instrument};

use super::api;
use crate::extract;

const FLAVOR_LABEL: &str = "today's flavor of the day";
const NEXT_DATA_SCRIPT: &str = "__NEXT_DATA__";
const NEXT_DATA_FLAVOR: &[&str] = &["props", "pageProps", "restaurant", "FlavorOfTheDay"];

// ============================================================================
// Locator
// ============================================================================

/// Reads `flavorOfDayName` from the store's locator record.
pub struct CulversLocatorStrategy {
    zip_code: Option<String>,
}

impl CulversLocatorStrategy {
    /// Creates the strategy, searching by `zip_code` when known.
    pub fn new(zip_code: Option<String>) -> Self {
        Self { zip_code }
    }
}

#[async_trait]
impl FlavorStrategy for CulversLocatorStrategy {
    fn id(&self) -> &str {
        "culvers.locator"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::JsonApi
    }

    #[instrument(skip(self, req), fields(store_id = %req.store_id()))]
    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let query = api::search_query(req.store_id(), self.zip_code.as_deref())
            .ok_or_else(|| FetchError::extraction("no search location for store"))?;
        debug!(query = %query, "Searching locator for store");

        let response = api::geosearch(req.ctx(), &query).await?;
        let record = api::find_record(&response, req.store_id())
            .ok_or_else(|| FetchError::extraction("store not in locator results"))?;
        let name = api::flavor_name(record)
            .ok_or_else(|| FetchError::extraction("locator record has no flavor"))?;

        if name.to_lowercase().contains("closed") {
            return Err(FetchError::FlavorClosed(name.to_string()));
        }

        Ok(extract::accept(name)?.with_available_date(req.ctx().clock().now_utc()))
    }
}

// ============================================================================
// Restaurant Page
// ============================================================================

/// Reads the heading just above the "Today's Flavor of the Day" label.
pub struct CulversHeadingStrategy;

#[async_trait]
impl FlavorStrategy for CulversHeadingStrategy {
    fn id(&self) -> &str {
        "culvers.heading"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::HtmlHeuristic
    }

    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let url = api::restaurant_url(req.ctx().base_url(), req.store_id())?;
        let page = req.page(&url).await?;
        Ok(parse_heading(&page)?.with_available_date(req.ctx().clock().now_utc()))
    }
}

/// Reads the restaurant page's embedded Next.js state.
pub struct CulversNextDataStrategy;

#[async_trait]
impl FlavorStrategy for CulversNextDataStrategy {
    fn id(&self) -> &str {
        "culvers.next_data"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::EmbeddedJson
    }

    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let url = api::restaurant_url(req.ctx().base_url(), req.store_id())?;
        let page = req.page(&url).await?;
        Ok(parse_next_data(&page)?.with_available_date(req.ctx().clock().now_utc()))
    }
}

// ============================================================================
// Parsers
// ============================================================================

fn is_flavor_label(element: ElementRef<'_>) -> bool {
    normalize_quotes(&element_text(element)).eq_ignore_ascii_case(FLAVOR_LABEL)
}

/// Finds the label heading and reads the nearest preceding `h2` sibling.
pub fn parse_heading(page: &str) -> Result<FlavorInfo, FetchError> {
    let document = Html::parse_document(page);
    let headings = parse_selector("h2, h3, h4")?;

    let label = document
        .select(&headings)
        .find(|h| is_flavor_label(*h))
        .ok_or_else(|| FetchError::extraction("no flavor-of-the-day label"))?;

    let flavor = label
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "h2")
        .ok_or_else(|| FetchError::extraction("no heading before flavor label"))?;

    extract::accept(&element_text(flavor))
}

/// Reads `FlavorOfTheDay` out of `script#__NEXT_DATA__`.
pub fn parse_next_data(page: &str) -> Result<FlavorInfo, FetchError> {
    let document = Html::parse_document(page);
    let state = html::embedded_json(&document, NEXT_DATA_SCRIPT)?;
    let record = json::at(&state, NEXT_DATA_FLAVOR)
        .ok_or_else(|| FetchError::extraction("no FlavorOfTheDay in page state"))?;
    let name = json::str_at(record, &["Name"])
        .ok_or_else(|| FetchError::extraction("FlavorOfTheDay has no Name"))?;

    let mut flavor = extract::accept(name)?;
    if let Some(description) = json::str_at(record, &["Description"]) {
        flavor = flavor.with_description(description);
    }
    if let Some(image) =
        json::str_at(record, &["ImageUrl"]).or_else(|| json::str_at(record, &["FlavorImageUrl"]))
    {
        flavor = flavor.with_image_url(image);
    }
    Ok(flavor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADING_PAGE: &str = r#"<html><body><div class="fotd">
        <h2>Salted Caramel Pecan</h2>
        <p>Vanilla custard swirled with caramel.</p>
        <h3>Today’s Flavor of the Day</h3>
    </div></body></html>"#;

    const NEXT_DATA_PAGE: &str = r#"<html><body>
        <script id="__NEXT_DATA__" type="application/json">
        {"props": {"pageProps": {"restaurant": {"FlavorOfTheDay": {
            "Name": "Mint Explosion",
            "Description": "Mint custard with OREO pieces.",
            "FlavorImageUrl": "https://cdn.culvers.com/mint.png"
        }}}}}
        </script></body></html>"#;

    #[test]
    fn test_parse_heading() {
        let flavor = parse_heading(HEADING_PAGE).unwrap();
        assert_eq!(flavor.name, "Salted Caramel Pecan");
    }

    #[test]
    fn test_parse_heading_missing_label() {
        let err = parse_heading("<h2>Turtle</h2><h3>Hours</h3>").unwrap_err();
        assert!(err.is_extraction());
    }

    #[test]
    fn test_parse_next_data() {
        let flavor = parse_next_data(NEXT_DATA_PAGE).unwrap();
        assert_eq!(flavor.name, "Mint Explosion");
        assert_eq!(flavor.description.as_deref(), Some("Mint custard with OREO pieces."));
        assert_eq!(flavor.image_url.as_deref(), Some("https://cdn.culvers.com/mint.png"));
    }

    #[test]
    fn test_parse_next_data_wrong_shape() {
        let page = r#"<script id="__NEXT_DATA__">{"props": {"pageProps": {}}}</script>"#;
        assert!(parse_next_data(page).unwrap_err().is_extraction());
        assert!(parse_next_data(HEADING_PAGE).unwrap_err().is_extraction());
    }

    #[test]
    fn test_priorities() {
        assert_eq!(CulversLocatorStrategy::new(None).priority(), 100);
        assert_eq!(CulversHeadingStrategy.priority(), 80);
        assert_eq!(CulversNextDataStrategy.priority(), 60);
    }
}
