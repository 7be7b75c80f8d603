//! Leduc's flavor calendar parser.
//!
//! Calendar entries read `Sep 27: Cookies & Cream`. Entries carry no year;
//! a month and day already past this year belong to next year.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, Month, NaiveDate};
use custard_core::ScheduledFlavor;
use custard_fetch::{FetchError, clock};
use custard_fetch::html::collapse_whitespace;
use regex::Regex;
use scraper::Html;
use tracing::debug;

use crate::extract;

/// Pattern for "Sep 27: Cookies & Cream"
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]{2})\s+(\d{1,2})\s*:\s*(.+)$").expect("Invalid regex")
});

/// Resolves a year-less month and day to the next occurrence on or after `today`.
pub fn next_occurrence(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    let year = if (month, day) < (today.month(), today.day()) {
        today.year() + 1
    } else {
        today.year()
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_entry(text: &str, today: NaiveDate) -> Option<ScheduledFlavor> {
    let caps = ENTRY_RE.captures(text)?;
    let month = caps[1].parse::<Month>().ok()?.number_from_month();
    let day = caps[2].parse().ok()?;
    let date = next_occurrence(month, day, today)?;
    let flavor = extract::accept(&caps[3]).ok()?;
    let flavor = match clock::local_midnight(date) {
        Some(available) => flavor.with_available_date(available),
        None => flavor,
    };
    Some(ScheduledFlavor::new(date, flavor))
}

/// Upcoming entries from `today`, ascending, at most `days` of them.
pub fn parse_calendar(
    page: &str,
    today: NaiveDate,
    days: usize,
) -> Result<Vec<ScheduledFlavor>, FetchError> {
    let document = Html::parse_document(page);
    let mut by_date: BTreeMap<NaiveDate, ScheduledFlavor> = BTreeMap::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let text = collapse_whitespace(text);
        if let Some(entry) = parse_entry(&text, today) {
            by_date.entry(entry.date).or_insert(entry);
        }
    }

    debug!(entries = by_date.len(), "Parsed flavor calendar");
    Ok(by_date
        .into_values()
        .filter(|entry| entry.date >= today)
        .take(days)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_occurrence_rolls_year() {
        let today = date(2025, 12, 30);
        assert_eq!(next_occurrence(12, 31, today), Some(date(2025, 12, 31)));
        assert_eq!(next_occurrence(1, 2, today), Some(date(2026, 1, 2)));
        assert_eq!(next_occurrence(12, 30, today), Some(date(2025, 12, 30)));
        assert_eq!(next_occurrence(2, 30, today), None);
    }

    #[test]
    fn test_parse_calendar() {
        let page = r#"<ul class="flavor-calendar">
            <li>Jan 2: Butter Pecan</li>
            <li>Dec 31: Cookies &amp; Cream</li>
            <li>Dec 30: Turtle</li>
            <li>Dec 30: Duplicate</li>
            <li>Dec 31 Grand Opening</li>
            <li>Jan 1: Flavor of the Day</li>
        </ul>"#;
        let entries = parse_calendar(page, date(2025, 12, 30), 7).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.flavor.name.as_str()).collect();
        assert_eq!(names, vec!["Turtle", "Cookies & Cream", "Butter Pecan"]);
        assert_eq!(entries[2].date, date(2026, 1, 2));

        let available = entries[2].flavor.available_date.unwrap();
        assert_eq!(available.with_timezone(&chrono::Local).date_naive(), date(2026, 1, 2));

        let truncated = parse_calendar(page, date(2025, 12, 30), 2).unwrap();
        assert_eq!(truncated.len(), 2);
    }

    #[test]
    fn test_parse_calendar_no_entries() {
        assert!(parse_calendar("<p>Closed for the season</p>", date(2025, 6, 1), 7)
            .unwrap()
            .is_empty());
    }
}
