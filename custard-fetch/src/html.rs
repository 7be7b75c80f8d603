//! HTML extraction helpers.
//!
//! [`scraper::Html`] is not `Send`, so parsing stays inside synchronous
//! functions that take the page text and return owned values.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::error::FetchError;

/// Longest text accepted as a flavor name, in characters.
pub const MAX_FLAVOR_NAME_LEN: usize = 100;

/// Compiles a CSS selector.
pub fn parse_selector(selector: &str) -> Result<Selector, FetchError> {
    Selector::parse(selector).map_err(|e| FetchError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Element text with whitespace runs collapsed and ends trimmed.
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Collapses whitespace runs to single spaces and trims.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces typographic apostrophes and quotes with ASCII ones.
pub fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{2018}', '\u{2019}', '\u{02BC}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
}

/// Parses the JSON body of `<script id="{script_id}">`.
pub fn embedded_json(document: &Html, script_id: &str) -> Result<Value, FetchError> {
    let selector = parse_selector(&format!("script#{script_id}"))?;
    let script = document
        .select(&selector)
        .next()
        .ok_or_else(|| FetchError::extraction(format!("no script#{script_id} in page")))?;
    let body = script.text().collect::<String>();
    Ok(serde_json::from_str(body.trim())?)
}

/// Whether `text` could plausibly be a flavor name.
///
/// Rejects empty text, label text still containing "flavor", and anything
/// longer than [`MAX_FLAVOR_NAME_LEN`].
pub fn is_plausible_flavor_name(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty()
        && !text.to_lowercase().contains("flavor")
        && text.chars().count() <= MAX_FLAVOR_NAME_LEN
}

/// First element under `selector` whose text is a plausible flavor name.
pub fn first_plausible(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .map(element_text)
        .find(|text| is_plausible_flavor_name(text))
}
