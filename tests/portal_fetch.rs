use std::sync::Arc;

use chrono::NaiveDate;

use shift_calendar::app::LinkUseCase;
use shift_calendar::calendar::CalendarUrlBuilder;
use shift_calendar::config::PortalConfig;
use shift_calendar::infra::PortalClient;
use shift_calendar::pages::PageContext;

const HOME: &str = include_str!("fixtures/home.html");
const SHIFT_CLAIM: &str = include_str!("fixtures/shift_claim.html");

#[tokio::test]
async fn listing_enriches_from_the_portal_over_http() {
    let mut server = mockito::Server::new_async().await;
    let found = server
        .mock("GET", "/services/shift_claim/1066265/")
        .with_status(200)
        .with_body(SHIFT_CLAIM)
        .create_async()
        .await;
    let missing = server
        .mock("GET", "/services/shift_claim/1070001/")
        .with_status(502)
        .create_async()
        .await;

    let portal = PortalConfig {
        base_url: format!("{}/services", server.url()),
        ..PortalConfig::default()
    };
    let client = Arc::new(PortalClient::new(&portal).unwrap());
    let use_case = LinkUseCase::new(client, CalendarUrlBuilder::default());

    let context = PageContext::new("/services/home/", NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
    let report = use_case.link_page(HOME, &context).await.unwrap();

    found.assert_async().await;
    missing.assert_async().await;
    assert_eq!(report.links.len(), 2);
    assert_eq!(
        report.links[0].record.requirements,
        vec!["• Arrive 5 minutes early", "• Closed-toe shoes"]
    );
    assert!(report.links[1].record.requirements.is_empty());
}

#[tokio::test]
async fn shift_command_path_fetches_by_id() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/services/shift_claim/1066265/")
        .with_status(200)
        .with_body(SHIFT_CLAIM)
        .create_async()
        .await;

    let portal = PortalConfig {
        base_url: format!("{}/services", server.url()),
        ..PortalConfig::default()
    };
    let use_case = LinkUseCase::new(
        Arc::new(PortalClient::new(&portal).unwrap()),
        CalendarUrlBuilder::default(),
    );

    let link = use_case.link_shift("1066265").await.unwrap();
    assert_eq!(link.record.title_with_emoji, "Checkout 💳");
    assert!(link.url.contains("dates=20260125T130000%2F20260125T154500"));
}
