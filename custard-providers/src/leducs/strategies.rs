//! Leduc's flavor strategies.
//!
//! 1. `leducs.dated` - text beside today's date ("Sep 27") on the home page
//! 2. `leducs.selectors` - well-known flavor class and id names

use async_trait::async_trait;
use chrono::NaiveDate;
use custard_core::FlavorInfo;
use custard_fetch::html::{element_text, parse_selector};
use custard_fetch::{FetchError, FlavorRequest, FlavorStrategy, SourceKind};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::extract;

/// Selectors tried by [`LeducsSelectorStrategy`], in order.
pub const FLAVOR_SELECTORS: &[&str] = &[
    ".flavor-of-day",
    ".todays-flavor",
    ".current-flavor",
    "[id*=flavor]",
    "[class*=flavor]",
    "[id*=today]",
    "[class*=today]",
];

/// Ancestors of a date text node searched for the flavor text.
const CONTAINER_DEPTH: usize = 2;

/// Shortest and longest accepted text beside a date, in characters.
const DATED_NAME_LEN: std::ops::Range<usize> = 3..50;

/// Reads the text beside today's date.
pub struct LeducsDatedStrategy;

#[async_trait]
impl FlavorStrategy for LeducsDatedStrategy {
    fn id(&self) -> &str {
        "leducs.dated"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Calendar
    }

    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let url = req.ctx().url("/")?;
        let page = req.page(&url).await?;
        let clock = req.ctx().clock();
        Ok(parse_dated(&page, clock.today())?.with_available_date(clock.now_utc()))
    }
}

/// Reads the first plausible flavor-classed element.
pub struct LeducsSelectorStrategy;

#[async_trait]
impl FlavorStrategy for LeducsSelectorStrategy {
    fn id(&self) -> &str {
        "leducs.selectors"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::HtmlHeuristic
    }

    async fn extract(&self, req: &FlavorRequest<'_>) -> Result<FlavorInfo, FetchError> {
        let url = req.ctx().url("/")?;
        let page = req.page(&url).await?;
        Ok(parse_selectors(&page)?.with_available_date(req.ctx().clock().now_utc()))
    }
}

/// The label Leduc's prints for `date`, e.g. "Sep 27".
pub fn date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Finds a text node naming `today` and takes the first plausible sibling
/// text within its nearest containers.
pub fn parse_dated(page: &str, today: NaiveDate) -> Result<FlavorInfo, FetchError> {
    let label = date_label(today);
    let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&label)))
        .map_err(|e| FetchError::extraction(e.to_string()))?;
    let document = Html::parse_document(page);

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        if !pattern.is_match(text) {
            continue;
        }

        let containers = node.ancestors().filter_map(ElementRef::wrap).take(CONTAINER_DEPTH);
        for container in containers {
            let found = container
                .text()
                .map(str::trim)
                .filter(|segment| !pattern.is_match(segment))
                .filter(|segment| DATED_NAME_LEN.contains(&segment.chars().count()))
                .find_map(|segment| extract::accept(segment).ok());
            if let Some(flavor) = found {
                return Ok(flavor);
            }
        }
    }

    Err(FetchError::extraction(format!("no flavor beside {label}")))
}

/// First element matching [`FLAVOR_SELECTORS`] with plausible text.
pub fn parse_selectors(page: &str) -> Result<FlavorInfo, FetchError> {
    let document = Html::parse_document(page);
    for selector in FLAVOR_SELECTORS {
        let selector = parse_selector(selector)?;
        if let Some(flavor) = document
            .select(&selector)
            .find_map(|element| extract::accept(&element_text(element)).ok())
        {
            return Ok(flavor);
        }
    }
    Err(FetchError::extraction("no flavor-classed element"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    #[test]
    fn test_date_label() {
        assert_eq!(date_label(sep(7)), "Sep 7");
        assert_eq!(date_label(sep(27)), "Sep 27");
    }

    #[test]
    fn test_parse_dated_nested_spans() {
        let page = r#"<div class="calendar">
            <div class="day"><span>Sep 2</span><span>Turtle</span></div>
            <div class="day"><span>Sep 27</span><span>Cookies &amp; Cream</span></div>
        </div>"#;
        assert_eq!(parse_dated(page, sep(27)).unwrap().name, "Cookies & Cream");
        assert_eq!(parse_dated(page, sep(2)).unwrap().name, "Turtle");
        assert!(parse_dated(page, sep(3)).unwrap_err().is_extraction());
    }

    #[test]
    fn test_parse_selectors() {
        let page = r#"<h2 class="todays-flavor-title">Today's Flavor</h2>
            <p class="todays-flavor">Black Raspberry</p>"#;
        assert_eq!(parse_selectors(page).unwrap().name, "Black Raspberry");
        assert!(parse_selectors("<p>Welcome</p>").is_err());
    }
}
