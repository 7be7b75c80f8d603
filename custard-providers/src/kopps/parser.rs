//! Kopp's flavor preview page parser.
//!
//! The page lists the month, one `div` per day with the day-of-month as
//! its id:
//!
//! ```html
//! <div id="15">
//!   <h3 class="h5 fw-black text-uppercase mb-0">Butter Pecan</h3>
//!   <h3 class="h5 fw-black text-uppercase mb-0">Grasshopper Fudge</h3>
//! </div>
//! ```
//!
//! A separate "Tomorrow" section lists the next day's flavors as `<p>`
//! siblings of its heading, each name in a `<strong>`.

use custard_core::FlavorInfo;
use custard_fetch::FetchError;
use custard_fetch::html::{element_text, is_plausible_flavor_name, parse_selector};
use scraper::{ElementRef, Html};
use tracing::debug;

/// Joins the flavors of one day.
pub const FLAVOR_SEPARATOR: &str = " & ";

const FLAVOR_HEADING: &str = "h3.h5.fw-black.text-uppercase.mb-0";

/// Flavors listed under the element whose id is `day`.
pub fn parse_day(page: &str, day: u32) -> Result<FlavorInfo, FetchError> {
    let document = Html::parse_document(page);
    let day_selector = parse_selector(&format!(r#"[id="{day}"]"#))?;
    let heading = parse_selector(FLAVOR_HEADING)?;

    let entry = document
        .select(&day_selector)
        .next()
        .ok_or_else(|| FetchError::extraction(format!("no calendar entry for day {day}")))?;

    let names: Vec<String> = entry
        .select(&heading)
        .map(element_text)
        .filter(|name| is_plausible_flavor_name(name))
        .collect();

    if names.is_empty() {
        return Err(FetchError::extraction(format!(
            "calendar entry for day {day} has no flavors"
        )));
    }
    debug!(day, count = names.len(), "Parsed calendar day");

    FlavorInfo::new(names.join(FLAVOR_SEPARATOR)).map_err(|e| FetchError::extraction(e.to_string()))
}

/// Flavors under the "Tomorrow" heading, joined, if the section exists.
pub fn parse_tomorrow(page: &str) -> Result<Option<String>, FetchError> {
    let document = Html::parse_document(page);
    let headings = parse_selector("h1, h2, h3, h4, h5, h6")?;
    let strong = parse_selector("strong")?;

    let Some(section) = document
        .select(&headings)
        .find(|h| element_text(*h).to_uppercase().contains("TOMORROW"))
    else {
        return Ok(None);
    };

    let mut names = Vec::new();
    for paragraph in section
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "p")
    {
        match paragraph.select(&strong).next() {
            Some(name) => names.push(element_text(name)),
            None => break,
        }
    }

    names.retain(|name| is_plausible_flavor_name(name));
    Ok((!names.is_empty()).then(|| names.join(FLAVOR_SEPARATOR)))
}
