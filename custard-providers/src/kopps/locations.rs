//! Kopp's stores.

use crate::fixed::StoreRecord;

const HOURS: &[(&str, &str)] = &[
    ("monday", "10:30am-10pm"),
    ("tuesday", "10:30am-10pm"),
    ("wednesday", "10:30am-10pm"),
    ("thursday", "10:30am-10pm"),
    ("friday", "10:30am-11pm"),
    ("saturday", "10:30am-11pm"),
    ("sunday", "10:30am-10pm"),
];

/// All Kopp's stores.
pub const LOCATIONS: &[StoreRecord] = &[
    StoreRecord {
        store_id: "kopps-greenfield",
        name: "Kopp's Frozen Custard - Greenfield",
        address: "7631 W. Layton Ave.",
        city: "Greenfield",
        state: "WI",
        zip_code: Some("53220"),
        phone: Some("(414) 281-2700"),
        hours: Some(HOURS),
        website_url: None,
    },
    StoreRecord {
        store_id: "kopps-brookfield",
        name: "Kopp's Frozen Custard - Brookfield",
        address: "18880 W. Bluemound Rd.",
        city: "Brookfield",
        state: "WI",
        zip_code: Some("53045"),
        phone: Some("(262) 792-2800"),
        hours: Some(HOURS),
        website_url: None,
    },
    StoreRecord {
        store_id: "kopps-glendale",
        name: "Kopp's Frozen Custard - Glendale",
        address: "5373 N. Port Washington Rd.",
        city: "Glendale",
        state: "WI",
        zip_code: Some("53217"),
        phone: Some("(414) 354-9800"),
        hours: Some(HOURS),
        website_url: None,
    },
];
