//! Integration tests for `FinnhubClient` using wiremock HTTP mocks.

use chrono::{TimeZone, Utc};
use tickdigest_core::{resolve, DateRange, FetchError, NewsSource, Period, Ticker};
use tickdigest_finnhub::{FinnhubClient, FinnhubError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> FinnhubClient {
    FinnhubClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
        .with_retry(2, 0)
}

fn last_day() -> DateRange {
    let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
    resolve(Period::LastDay, now)
}

fn aapl() -> Ticker {
    Ticker::parse("AAPL").unwrap()
}

#[tokio::test]
async fn company_news_returns_records_in_order() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        {
            "category": "company",
            "datetime": 1_710_500_000,
            "headline": "Apple unveils new chip",
            "id": 1,
            "image": "",
            "related": "AAPL",
            "source": "Reuters",
            "summary": "Apple announced a new chip on Friday.",
            "url": "https://example.com/1"
        },
        {
            "category": "company",
            "datetime": 1_710_400_000,
            "headline": "Apple shares slip",
            "id": 2,
            "related": "AAPL",
            "source": "Bloomberg",
            "summary": "",
            "url": "https://example.com/2"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("from", "2024-03-14"))
        .and(query_param("to", "2024-03-15"))
        .and(query_param("token", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .company_news(&aapl(), &last_day())
        .await
        .expect("should parse news");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].headline, "Apple unveils new chip");
    assert_eq!(records[0].body_summary, "Apple announced a new chip on Friday.");
    assert_eq!(records[1].headline, "Apple shares slip");
    assert!(records[1].body_summary.is_empty());
    assert_eq!(records[1].source.as_deref(), Some("Bloomberg"));
}

#[tokio::test]
async fn empty_array_is_no_news_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .fetch(&aapl(), &last_day())
        .await
        .expect("empty result is valid");
    assert!(records.is_empty());
}

#[tokio::test]
async fn blank_headlines_are_skipped() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "headline": "", "summary": "orphan body", "url": "https://example.com/x" },
        { "headline": "Kept", "summary": "", "url": "https://example.com/y" }
    ]);

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client.company_news(&aapl(), &last_day()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].headline, "Kept");
}

#[tokio::test]
async fn unauthorized_maps_to_fetch_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "Invalid API key." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch(&aapl(), &last_day()).await.unwrap_err();
    assert_eq!(err, FetchError::Unauthorized("Invalid API key.".to_owned()));
}

#[tokio::test]
async fn server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "headline": "Recovered", "url": "u" }])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client.company_news(&aapl(), &last_day()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].headline, "Recovered");
}

#[tokio::test]
async fn rate_limit_exhausts_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.company_news(&aapl(), &last_day()).await.unwrap_err();
    assert!(
        matches!(err, FinnhubError::RateLimited { retry_after_secs: 0 }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn error_field_in_success_body_returns_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "error": "You don't have access to this resource." }),
            ),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch(&aapl(), &last_day()).await.unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("access"),
        "expected error message to mention access, got: {msg}"
    );
}

#[tokio::test]
async fn malformed_body_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/company-news"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.fetch(&aapl(), &last_day()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn transport_error_does_not_leak_token() {
    let client = FinnhubClient::with_base_url("secret-token", 5, "http://127.0.0.1:1")
        .unwrap()
        .with_retry(0, 0);
    let err = client.fetch(&aapl(), &last_day()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
    assert!(!err.to_string().contains("secret-token"));
}
