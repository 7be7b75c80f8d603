//! Oscar's flavor strategy.
//!
//! The home page announces the day's flavor in a heading such as
//! `SUNDAY, SEPTEMBER 28: CHOCOLATE COVERED CHERRY`.

use async_trait::async_trait;
use custard_core::FlavorInfo;
use custard_fetch::html::{element_text, parse_selector};
use custard_fetch::{FetchError, FlavorRequest, FlavorStrategy, SourceKind};
use scraper::Html;

use crate::extract;

const WEEKDAYS: &[&str] = &[
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

/// Heading tags scanned, in order.
const HEADING_TAGS: &[&str] = &["h5", "h4", "h3"];

/// Reads the dated flavor heading on the home page.
pub struct OscarsHeadingStrategy;

#[async_trait]
impl FlavorStrategy for OscarsHeadingStrategy {
    fn id(&self) -> &str {
        "oscars.heading"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::HtmlHeuristic
    }

    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let url = req.ctx().url("/")?;
        let page = req.page(&url).await?;
        Ok(parse_home(&page)?.with_available_date(req.ctx().clock().now_utc()))
    }
}

/// Flavor named after the first colon of a weekday heading.
fn flavor_after_weekday(text: &str) -> Option<&str> {
    let upper = text.to_uppercase();
    if !WEEKDAYS.iter().any(|day| upper.contains(day)) {
        return None;
    }
    let (_, flavor) = text.split_once(':')?;
    Some(flavor.trim()).filter(|f| !f.is_empty())
}

/// Finds the first weekday heading carrying a plausible flavor.
pub fn parse_home(page: &str) -> Result<FlavorInfo, FetchError> {
    let document = Html::parse_document(page);
    for tag in HEADING_TAGS {
        let selector = parse_selector(tag)?;
        let found = document.select(&selector).find_map(|heading| {
            let text = element_text(heading);
            flavor_after_weekday(&text).and_then(|name| extract::accept(name).ok())
        });
        if let Some(flavor) = found {
            return Ok(flavor);
        }
    }
    Err(FetchError::extraction("no dated flavor heading on home page"))
}
