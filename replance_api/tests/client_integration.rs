use std::time::Duration;

use replance_api::types::LeadRequest;
use replance_api::{Client, Error, Method};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_stock_data_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("stock_data.json");

    Mock::given(method("GET"))
        .and(path("/api/stock-data"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let price = client.get_stock_data().await.unwrap();
    assert_eq!(price.previous_close, "504.08");
    assert_eq!(price.market_open, "510.00");
}

#[tokio::test]
async fn get_stock_data_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stock-data"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_stock_data().await.unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn get_stock_data_cache_empty_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stock-data"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("cache_empty.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_stock_data().await.unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[tokio::test]
async fn get_events_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let err = client.get_events().await.unwrap_err();
    match err {
        Error::Parse { body, .. } => assert_eq!(body, "{not valid json}"),
        other => panic!("expected Parse, got {:?}", other),
    }
}

#[tokio::test]
async fn get_events_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("events.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let events = client.get_events().await.unwrap();
    assert_eq!(events.events.len(), 3);
}

#[tokio::test]
async fn get_events_summary_error_flag_is_not_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events-summary"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": "No event data available"})),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let resp = client.get_events_summary().await.unwrap();
    assert!(resp.has_error());
    assert_eq!(resp.into_summary(), None);
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    // Port 1 is reserved (tcpmux) and not listening on test hosts.
    let client = Client::with_base_url("http://127.0.0.1:1").unwrap();
    let err = client.get_events().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn slow_response_times_out_as_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("events.json"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_timeout(&mock_server.uri(), Duration::from_millis(200)).unwrap();
    let err = client.get_events().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn send_email_posts_json_body() {
    let mock_server = MockServer::start().await;
    let lead = LeadRequest {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        hobbies: "climbing".into(),
        artist: "Bjork".into(),
        movie: "Alien".into(),
    };

    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .and(body_json(&lead))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "generated_text": "Hi Ada, here are gigs you might like."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let resp = client.send_email(&lead).await.unwrap();
    assert!(resp.success);
    assert_eq!(
        resp.generated_text.as_deref(),
        Some("Hi Ada, here are gigs you might like.")
    );
}

#[tokio::test]
async fn fetch_json_returns_raw_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "Server is running"})),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let value: serde_json::Value = client
        .fetch_json::<_, ()>(Method::GET, "/", None)
        .await
        .unwrap();
    assert_eq!(value["message"], "Server is running");
}
