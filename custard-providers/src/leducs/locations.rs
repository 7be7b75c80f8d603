//! Leduc's store.

use crate::fixed::StoreRecord;

const HOURS: &[(&str, &str)] = &[
    ("monday", "11:00AM-9:00PM"),
    ("tuesday", "11:00AM-9:00PM"),
    ("wednesday", "11:00AM-9:00PM"),
    ("thursday", "11:00AM-9:00PM"),
    ("friday", "11:00AM-9:00PM"),
    ("saturday", "11:00AM-9:00PM"),
    ("sunday", "11:00AM-9:00PM"),
];

/// Leduc's only store.
pub const LOCATIONS: &[StoreRecord] = &[StoreRecord {
    store_id: "leducs-wales",
    name: "Leduc's Frozen Custard",
    address: "240 W. Summit Ave.",
    city: "Wales",
    state: "WI",
    zip_code: Some("53183"),
    phone: Some("(262) 968-2894"),
    hours: Some(HOURS),
    website_url: Some(super::BASE_URL),
}];
