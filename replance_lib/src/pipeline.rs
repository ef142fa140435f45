//! Dependent fetch pipeline behind the demo page.
//!
//! One run fetches the stock snapshot, then the events snapshot, then (only
//! if events succeeded) the generated summary. Stock and events failures fail
//! the whole run with a generic message; a summary failure only leaves the
//! summary absent.
//!
//! State is published through a `watch` channel. The pipeline is the only
//! writer. Each run takes a fresh generation number and every write checks
//! both the generation and the cancel token first, so a superseded or
//! torn-down run never overwrites newer state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use replance_api::types::{EventsSnapshot, PriceSnapshot};
use replance_api::Client;
use serde::Serialize;
use tokio::sync::watch;

use crate::cancel::CancelToken;

/// Message shown when the stock or events fetch fails.
pub const FETCH_FAILED: &str = "Failed to fetch data";

/// Top-level phase exposed to views.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Summary phase, independent of [`Phase`].
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPhase {
    Idle,
    Loading,
    Loaded,
    Skipped,
}

/// Where the current (or last) run is.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    NotStarted,
    FetchingPrimary,
    FetchingSecondary,
    FetchingSummary,
    Done,
    Failed,
}

impl RunStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Everything a view needs, replaced wholesale at the start of every run.
///
/// Invariant: `phase == Loaded` implies `price` and `events` are both `Some`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PipelineState {
    pub generation: u64,
    pub stage: RunStage,
    pub phase: Phase,
    pub summary_phase: SummaryPhase,
    pub error: Option<String>,
    pub price: Option<PriceSnapshot>,
    pub events: Option<EventsSnapshot>,
    pub summary: Option<String>,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            generation: 0,
            stage: RunStage::NotStarted,
            phase: Phase::Idle,
            summary_phase: SummaryPhase::Idle,
            error: None,
            price: None,
            events: None,
            summary: None,
        }
    }
}

impl PipelineState {
    fn started(generation: u64) -> Self {
        Self {
            generation,
            stage: RunStage::FetchingPrimary,
            phase: Phase::Loading,
            ..Self::default()
        }
    }

    fn failed(generation: u64) -> Self {
        Self {
            generation,
            stage: RunStage::Failed,
            phase: Phase::Failed,
            error: Some(FETCH_FAILED.to_string()),
            ..Self::default()
        }
    }
}

/// How a single run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Stock and events loaded. `summary` tells whether a summary was kept.
    Loaded { summary: bool },
    /// Stock or events failed; the generic error is published.
    Failed,
    /// Cancelled or superseded by a newer run; nothing more was published.
    Cancelled,
}

/// Runs the three-stage fetch and owns the published state.
pub struct Pipeline {
    client: Client,
    state: watch::Sender<PipelineState>,
    generation: AtomicU64,
}

impl Pipeline {
    pub fn new(client: Client) -> Self {
        let (state, _) = watch::channel(PipelineState::default());
        Self {
            client,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Receiver that sees every published state change.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Performs one full run. Any earlier run still in flight is superseded.
    pub async fn run(&self, cancel: &CancelToken) -> RunOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(generation, "Starting data fetch");

        if !self.commit(generation, cancel, |s| *s = PipelineState::started(generation)) {
            return RunOutcome::Cancelled;
        }

        let price = match guarded(cancel, self.client.get_stock_data()).await {
            None => return self.abandon(generation),
            Some(Err(e)) => {
                tracing::warn!(generation, "Stock data fetch failed: {}", e);
                return self.fail(generation, cancel);
            }
            Some(Ok(price)) => price,
        };
        tracing::debug!(generation, previous_close = %price.previous_close, "Stock data received");
        if !self.commit(generation, cancel, |s| {
            s.price = Some(price);
            s.stage = RunStage::FetchingSecondary;
        }) {
            return self.abandon(generation);
        }

        let events = match guarded(cancel, self.client.get_events()).await {
            None => return self.abandon(generation),
            Some(Err(e)) => {
                tracing::warn!(generation, "Events fetch failed: {}", e);
                return self.fail(generation, cancel);
            }
            Some(Ok(events)) => events,
        };
        tracing::debug!(generation, count = events.events.len(), "Events data received");
        if !self.commit(generation, cancel, |s| {
            s.events = Some(events);
            s.phase = Phase::Loaded;
            s.stage = RunStage::FetchingSummary;
            s.summary_phase = SummaryPhase::Loading;
        }) {
            return self.abandon(generation);
        }

        // Fetched even for an empty events list; the backend decides whether
        // there is anything to summarise.
        let summary = match guarded(cancel, self.client.get_events_summary()).await {
            None => return self.abandon(generation),
            Some(Ok(resp)) => {
                if resp.has_error() {
                    tracing::info!(generation, "Summary endpoint reported an error");
                }
                resp.into_summary()
            }
            Some(Err(e)) => {
                tracing::warn!(generation, "Summary fetch failed: {}", e);
                None
            }
        };
        let has_summary = summary.is_some();
        if !self.commit(generation, cancel, |s| {
            s.summary_phase = if has_summary {
                SummaryPhase::Loaded
            } else {
                SummaryPhase::Skipped
            };
            s.summary = summary;
            s.stage = RunStage::Done;
        }) {
            return self.abandon(generation);
        }

        tracing::info!(generation, summary = has_summary, "Fetch complete");
        RunOutcome::Loaded {
            summary: has_summary,
        }
    }

    fn fail(&self, generation: u64, cancel: &CancelToken) -> RunOutcome {
        if self.commit(generation, cancel, |s| *s = PipelineState::failed(generation)) {
            RunOutcome::Failed
        } else {
            self.abandon(generation)
        }
    }

    fn abandon(&self, generation: u64) -> RunOutcome {
        tracing::debug!(generation, "Run abandoned before completion");
        RunOutcome::Cancelled
    }

    /// Applies `update` only if this run is still current and not cancelled.
    fn commit<F>(&self, generation: u64, cancel: &CancelToken, update: F) -> bool
    where
        F: FnOnce(&mut PipelineState),
    {
        self.state.send_if_modified(|state| {
            if cancel.is_cancelled() || self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            update(state);
            true
        })
    }
}

/// Races `fut` against cancellation; `None` means cancelled. Dropping the
/// request future aborts the underlying HTTP call.
async fn guarded<F: Future>(cancel: &CancelToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        out = fut => Some(out),
    }
}
