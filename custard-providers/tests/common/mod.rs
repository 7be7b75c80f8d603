//! Shared fixtures for adapter tests.

#![allow(dead_code)]

use chrono::{Local, TimeZone};
use custard_fetch::config::keys;
use custard_fetch::{Clock, ProviderConfig};
use custard_providers::ProviderSetup;
use wiremock::MockServer;

/// Config pointing an adapter at `server` with no waiting.
pub fn config(server: &MockServer) -> ProviderConfig {
    ProviderConfig::new()
        .with(keys::BASE_URL, server.uri())
        .with(keys::MIN_REQUEST_INTERVAL, 0.0)
        .with(keys::RETRY_DELAY, 0.0)
        .with(keys::MAX_RETRIES, 1)
}

/// Setup for an adapter talking to `server`.
pub fn setup(server: &MockServer) -> ProviderSetup {
    ProviderSetup::new(reqwest::Client::new(), config(server))
}

/// Setup pinned to local noon on the given day.
pub fn setup_on(server: &MockServer, year: i32, month: u32, day: u32) -> ProviderSetup {
    let at = Local
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("unambiguous local time");
    setup(server).with_clock(Clock::Fixed(at))
}

/// Setup whose requests cannot connect.
pub fn unreachable() -> ProviderSetup {
    let config = ProviderConfig::new()
        .with(keys::BASE_URL, "http://127.0.0.1:9")
        .with(keys::MIN_REQUEST_INTERVAL, 0.0)
        .with(keys::RETRY_DELAY, 0.0)
        .with(keys::MAX_RETRIES, 0);
    ProviderSetup::new(reqwest::Client::new(), config)
}
