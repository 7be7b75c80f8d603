//! Date-driven vendors against a mocked origin.

mod common;

use chrono::{Local, NaiveDate, NaiveTime};
use custard_core::{FlavorProvider, ProviderError};
use custard_providers::{KoppsProvider, LeducsProvider};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KOPPS_PAGE: &str = r#"<html><body>
    <h2>Tomorrow</h2>
    <p><strong>Mint Chip</strong></p>
    <p><strong>Turtle</strong></p>
    <h2>June</h2>
    <div id="14">
      <h3 class="h5 fw-black text-uppercase mb-0">Butter Pecan</h3>
    </div>
    <div id="15">
      <h3 class="h5 fw-black text-uppercase mb-0">A</h3>
      <h3 class="h5 fw-black text-uppercase mb-0">B</h3>
    </div>
</body></html>"#;

const LEDUCS_HOME: &str = r#"<html><body>
    <div class="calendar">
      <div class="day"><span>Jun 1</span><span>Cherry Amaretto</span></div>
      <div class="day"><span>Jun 15</span><span>Butter Pecan</span></div>
    </div>
</body></html>"#;

const LEDUCS_CALENDAR: &str = r#"<html><body><ul>
    <li>Jun 1: Cherry Amaretto</li>
    <li>Jun 15: Butter Pecan</li>
    <li>Jun 16: Turtle</li>
    <li>Jun 16: Something Else</li>
    <li>Jun 20: Mint Oreo</li>
    <li>Our hours: 11am - 10pm</li>
</ul></body></html>"#;

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

// ============================================================================
// Kopp's
// ============================================================================

#[tokio::test]
async fn test_kopps_joins_todays_flavors() {
    let server = MockServer::start().await;
    serve(&server, "/flavor-preview", KOPPS_PAGE).await;
    let provider = KoppsProvider::new(&common::setup_on(&server, 2025, 6, 15)).unwrap();

    let flavor = provider.get_current_flavor("kopps-glendale").await.unwrap();
    assert_eq!(flavor.name, "A & B");
}

#[tokio::test]
async fn test_kopps_missing_day() {
    let server = MockServer::start().await;
    serve(&server, "/flavor-preview", KOPPS_PAGE).await;
    let provider = KoppsProvider::new(&common::setup_on(&server, 2025, 6, 30)).unwrap();

    let err = provider.get_current_flavor("kopps-glendale").await.unwrap_err();
    assert!(matches!(err, ProviderError::FlavorNotAvailable { .. }));
}

#[tokio::test]
async fn test_kopps_unknown_store_skips_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(KOPPS_PAGE))
        .expect(0)
        .mount(&server)
        .await;
    let provider = KoppsProvider::new(&common::setup_on(&server, 2025, 6, 15)).unwrap();

    let err = provider.get_current_flavor("kopps-mequon").await.unwrap_err();
    assert!(matches!(err, ProviderError::LocationNotFound { .. }));
    assert!(provider.get_upcoming_flavors("kopps-mequon", 7).await.is_empty());
}

#[tokio::test]
async fn test_kopps_upcoming_is_tomorrow() {
    let server = MockServer::start().await;
    serve(&server, "/flavor-preview", KOPPS_PAGE).await;
    let provider = KoppsProvider::new(&common::setup_on(&server, 2025, 6, 15)).unwrap();

    let upcoming = provider.get_upcoming_flavors("kopps-brookfield", 7).await;
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].date, june(16));
    assert_eq!(upcoming[0].flavor.name, "Mint Chip & Turtle");

    let available = upcoming[0].flavor.available_date.unwrap().with_timezone(&Local);
    assert_eq!(available.date_naive(), june(16));
    assert_eq!(available.time(), NaiveTime::MIN);

    assert!(provider.get_upcoming_flavors("kopps-brookfield", 0).await.is_empty());
}

#[tokio::test]
async fn test_kopps_upcoming_failure_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let provider = KoppsProvider::new(&common::setup_on(&server, 2025, 6, 15)).unwrap();

    assert!(provider.get_upcoming_flavors("kopps-brookfield", 7).await.is_empty());
}

// ============================================================================
// Leduc's
// ============================================================================

#[tokio::test]
async fn test_leducs_reads_todays_date() {
    let server = MockServer::start().await;
    serve(&server, "/", LEDUCS_HOME).await;
    let provider = LeducsProvider::new(&common::setup_on(&server, 2025, 6, 15)).unwrap();

    let flavor = provider.get_current_flavor("leducs-wales").await.unwrap();
    assert_eq!(flavor.name, "Butter Pecan");
}

#[tokio::test]
async fn test_leducs_falls_back_to_selectors() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        r#"<html><body><p class="todays-flavor">Black Raspberry</p></body></html>"#,
    )
    .await;
    let provider = LeducsProvider::new(&common::setup_on(&server, 2025, 6, 15)).unwrap();

    let flavor = provider.get_current_flavor("leducs-wales").await.unwrap();
    assert_eq!(flavor.name, "Black Raspberry");
}

#[tokio::test]
async fn test_leducs_upcoming_calendar() {
    let server = MockServer::start().await;
    serve(&server, "/flavor-calendar", LEDUCS_CALENDAR).await;
    let provider = LeducsProvider::new(&common::setup_on(&server, 2025, 6, 15)).unwrap();

    let upcoming = provider.get_upcoming_flavors("leducs-wales", 3).await;
    let dates: Vec<_> = upcoming.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![june(15), june(16), june(20)]);
    assert_eq!(upcoming[1].flavor.name, "Turtle");

    // Past days roll over to next year and sort last.
    let all = provider.get_upcoming_flavors("leducs-wales", 10).await;
    assert_eq!(all.len(), 4);
    assert_eq!(all[3].date, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
}
