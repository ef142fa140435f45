//! Event listings served by `/api/events`.

use serde::{Deserialize, Serialize};

use super::null_as_empty;

/// A single scraped event. Fields are shown verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_date_time: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// All events from one scrape, in server order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventsSnapshot {
    /// May be empty.
    pub events: Vec<EventRecord>,
    pub last_updated: String,
}
