//! Oscar's stores.

use crate::fixed::StoreRecord;

/// All Oscar's stores.
pub const LOCATIONS: &[StoreRecord] = &[
    StoreRecord {
        store_id: "oscars-west-allis",
        name: "Oscar's Frozen Custard - West Allis",
        address: "2362 S. 108th St.",
        city: "Milwaukee",
        state: "WI",
        zip_code: Some("53227"),
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "oscars-franklin",
        name: "Oscar's Frozen Custard - Franklin",
        address: "7041 South 27th St.",
        city: "Franklin",
        state: "WI",
        zip_code: Some("53132"),
        phone: None,
        hours: None,
        website_url: None,
    },
];
