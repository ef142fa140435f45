#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const STOCK_PATH: &str = "/api/stock-data";
pub const EVENTS_PATH: &str = "/api/events";
pub const SUMMARY_PATH: &str = "/api/events-summary";

pub fn stock_json() -> Value {
    json!({
        "previousClose": "504.08",
        "marketOpen": "510.00",
        "lastUpdated": "2024-06-01T10:00:00Z"
    })
}

pub fn events_json() -> Value {
    json!({
        "events": [
            {
                "eventTitle": "SF Jazz in the Park",
                "eventDateTime": "Saturday, June 8 · 2 - 5pm PDT",
                "location": "Golden Gate Park Bandshell",
                "address": "75 Hagiwara Tea Garden Dr San Francisco, CA 94118",
                "description": "An afternoon of live jazz under the trees."
            },
            {
                "eventTitle": "AI Builders Meetup",
                "eventDateTime": "Tuesday, June 11 · 6 - 9pm PDT",
                "location": "The Commons",
                "address": "1 Market St San Francisco, CA 94105",
                "description": "Lightning talks and demos from local founders."
            }
        ],
        "lastUpdated": "2024-06-01T10:00:00Z"
    })
}

pub fn empty_events_json() -> Value {
    json!({"events": [], "lastUpdated": "2024-06-01T10:00:00Z"})
}

pub fn summary_json() -> Value {
    json!({
        "summary": "## This week\n\nJazz and an **AI meetup**.",
        "lastUpdated": "2024-06-01T10:00:05",
        "eventCount": 2
    })
}

pub async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_delayed(server: &MockServer, route: &str, body: Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
        .mount(server)
        .await;
}

/// Mounts a route that must never be hit; verified when `server` drops.
pub async fn mount_never(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(server)
        .await;
}

pub async fn hits(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|req| req.url.path() == route)
        .count()
}
