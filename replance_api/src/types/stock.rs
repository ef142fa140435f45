//! Stock price snapshot served by `/api/stock-data`.

use serde::{Deserialize, Serialize};

/// Latest scraped quote. Prices are kept as the decimal strings the backend
/// scraped; they are displayed, never computed on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    /// Previous session close, e.g. `"504.08"`.
    pub previous_close: String,
    /// Current session open, e.g. `"510.00"`.
    pub market_open: String,
    /// ISO-8601 timestamp of the scrape.
    pub last_updated: String,
}
