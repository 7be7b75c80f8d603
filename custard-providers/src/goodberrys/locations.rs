//! Goodberry's stores.

use crate::fixed::StoreRecord;

/// All Goodberry's stores.
pub const LOCATIONS: &[StoreRecord] = &[
    StoreRecord {
        store_id: "goodberrys-southern-pines",
        name: "Goodberry's - Southern Pines",
        address: "231 Carolina Green Pkwy",
        city: "Southern Pines",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "goodberrys-raleigh-spring-forest",
        name: "Goodberry's - Raleigh (Spring Forest)",
        address: "2421 Spring Forest Rd.",
        city: "Raleigh",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "goodberrys-raleigh-strickland",
        name: "Goodberry's - Raleigh (Strickland Rd)",
        address: "9700 Strickland Rd.",
        city: "Raleigh",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "goodberrys-raleigh-clark-ave",
        name: "Goodberry's - Raleigh (Clark Ave)",
        address: "2042 Clark Ave.",
        city: "Raleigh",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "goodberrys-cary-kildaire-farm",
        name: "Goodberry's - Cary (Kildaire Farm Rd)",
        address: "1146 Kildaire Farm Rd.",
        city: "Cary",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "goodberrys-cary-davis-dr",
        name: "Goodberry's - Cary (Davis Dr)",
        address: "2325 Davis Dr.",
        city: "Cary",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "goodberrys-garner",
        name: "Goodberry's - Garner",
        address: "1407 Garner Station Blvd.",
        city: "Garner",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "goodberrys-wake-forest",
        name: "Goodberry's - Wake Forest",
        address: "11736 Retail Dr.",
        city: "Wake Forest",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
    StoreRecord {
        store_id: "goodberrys-durham",
        name: "Goodberry's - Durham",
        address: "3906 N. Roxboro St.",
        city: "Durham",
        state: "NC",
        zip_code: None,
        phone: None,
        hours: None,
        website_url: None,
    },
];
