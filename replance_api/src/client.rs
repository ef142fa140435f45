//! HTTP client for the Replance backend service.

use std::time::Duration;

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    types::{EventsSnapshot, LeadRequest, LeadResponse, PriceSnapshot, SummaryResponse},
    Error,
};

/// Backend location used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Upper bound on a single request, connect through body read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Replance backend.
///
/// Every request is a single attempt: no retry and no caching. Non-2xx
/// statuses, unparseable bodies and transport failures each map to their own
/// [`Error`] variant.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to `http://localhost:8001`.
    base_api_url: String,
}

impl Client {
    /// Creates a new client pointing at the local backend.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom base URL and per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("replance/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Network(e.to_string())
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(e.to_string())
        })
    }

    /// Issues one request and decodes the JSON response as `T`.
    ///
    /// `body`, when present, is sent as a JSON payload.
    pub async fn fetch_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path)?;
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .header("accept", "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to {} {}: {}", method, path, e);
            Error::Network(describe_transport_error(&e))
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Network(describe_transport_error(&e))
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&text);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&text).map_err(|e| {
            let snippet = truncate_body(&text);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Parse {
                message: e.to_string(),
                body: snippet,
            }
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.fetch_json::<T, ()>(Method::GET, path, None).await
    }

    /// Fetches the latest stock price snapshot.
    pub async fn get_stock_data(&self) -> Result<PriceSnapshot, Error> {
        self.get("/api/stock-data").await
    }

    /// Fetches the latest list of scraped events.
    pub async fn get_events(&self) -> Result<EventsSnapshot, Error> {
        self.get("/api/events").await
    }

    /// Fetches the generated events overview. The payload may carry an
    /// error flag instead of a summary; see [`SummaryResponse::into_summary`].
    pub async fn get_events_summary(&self) -> Result<SummaryResponse, Error> {
        self.get("/api/events-summary").await
    }

    /// Posts lead-capture preferences to the email endpoint.
    pub async fn send_email(&self, lead: &LeadRequest) -> Result<LeadResponse, Error> {
        self.fetch_json(Method::POST, "/api/send-email", Some(lead))
            .await
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
