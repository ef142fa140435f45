//! Fixed-period scheduler for the demo pipeline.
//!
//! Runs the pipeline once on activation and then every `interval`. At most
//! one run is in flight: a tick that lands while a run is still going is
//! dropped and counted. `shutdown` stops the ticker, cancels the in-flight
//! run and waits for it, so no request is issued and no state is written
//! afterwards. Dropping the [`Poller`] cancels the same way without waiting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::cancel::CancelToken;
use crate::pipeline::{Pipeline, RunOutcome};

/// Shortest period the ticker accepts; smaller intervals are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Scheduler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub interval: Duration,
    /// Stop after starting this many runs. `None` polls until shutdown.
    pub max_runs: Option<u64>,
}

impl PollOptions {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_POLL_INTERVAL),
            max_runs: None,
        }
    }

    pub fn with_max_runs(mut self, max_runs: u64) -> Self {
        self.max_runs = Some(max_runs);
        self
    }
}

/// Counters maintained by the scheduler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerStats {
    pub runs_started: u64,
    pub runs_failed: u64,
    pub ticks_skipped: u64,
}

#[derive(Default)]
struct Counters {
    runs_started: AtomicU64,
    runs_failed: AtomicU64,
    ticks_skipped: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> PollerStats {
        PollerStats {
            runs_started: self.runs_started.load(Ordering::Relaxed),
            runs_failed: self.runs_failed.load(Ordering::Relaxed),
            ticks_skipped: self.ticks_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Handle to a running scheduler task. Dropping it cancels the schedule.
pub struct Poller {
    cancel: CancelToken,
    counters: Arc<Counters>,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Starts polling on the current tokio runtime.
    pub fn spawn(pipeline: Arc<Pipeline>, options: PollOptions) -> Self {
        let cancel = CancelToken::new();
        let counters = Arc::new(Counters::default());
        let handle = tokio::spawn(poll_loop(
            pipeline,
            options,
            cancel.clone(),
            Arc::clone(&counters),
        ));
        Self {
            cancel,
            counters,
            handle,
        }
    }

    pub fn stats(&self) -> PollerStats {
        self.counters.snapshot()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for a bounded poller to finish its runs.
    ///
    /// An unbounded poller never finishes on its own; use
    /// [`Poller::shutdown`] for teardown.
    pub async fn join(mut self) -> PollerStats {
        if let Err(e) = (&mut self.handle).await {
            tracing::error!("Poller task failed: {}", e);
        }
        self.counters.snapshot()
    }

    /// Cancels the schedule and any in-flight run, then waits for both.
    pub async fn shutdown(self) -> PollerStats {
        tracing::info!("Stopping poller");
        self.cancel.cancel();
        self.join().await
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop(
    pipeline: Arc<Pipeline>,
    options: PollOptions,
    cancel: CancelToken,
    counters: Arc<Counters>,
) {
    let mut ticker = tokio::time::interval(options.interval.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut in_flight: Option<JoinHandle<RunOutcome>> = None;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        if let Some(run) = &in_flight {
            if !run.is_finished() {
                counters.ticks_skipped.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Previous run still in flight, skipping tick");
                continue;
            }
        }
        if let Some(run) = in_flight.take() {
            record(&counters, run.await);
        }

        let started = counters.runs_started.fetch_add(1, Ordering::Relaxed) + 1;
        let pipeline = Arc::clone(&pipeline);
        let run_cancel = cancel.clone();
        in_flight = Some(tokio::spawn(async move {
            pipeline.run(&run_cancel).await
        }));

        if options.max_runs.is_some_and(|max| started >= max) {
            break;
        }
    }

    if let Some(run) = in_flight.take() {
        record(&counters, run.await);
    }
    tracing::debug!("Poller stopped");
}

fn record(counters: &Counters, result: Result<RunOutcome, tokio::task::JoinError>) {
    match result {
        Ok(RunOutcome::Failed) => {
            counters.runs_failed.fetch_add(1, Ordering::Relaxed);
        }
        Ok(_) => {}
        Err(e) => {
            counters.runs_failed.fetch_add(1, Ordering::Relaxed);
            tracing::error!("Pipeline run panicked: {}", e);
        }
    }
}
