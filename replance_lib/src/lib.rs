//! Library layer for Replance: configuration, the demo-page fetch pipeline
//! and its polling scheduler, view binding, and lead-form handling.
//!
//! Wraps the `replance_api` client. Everything that decides *when* to fetch
//! and *what to show* lives here; the CLI only formats and prints.

pub mod cancel;
pub mod config;
pub mod error;
pub mod lead;
pub mod markdown;
pub mod pipeline;
pub mod poller;
pub mod pricing;
pub mod validation;
pub mod view;

pub use replance_api;
pub use replance_api::types;
pub use replance_api::Client;

pub use cancel::CancelToken;
pub use config::{Config, ConfigError};
pub use error::ReplanceError;
pub use lead::{LeadForm, SubmitOutcome};
pub use pipeline::{Phase, Pipeline, PipelineState, RunOutcome, RunStage, SummaryPhase};
pub use poller::{PollOptions, Poller, PollerStats};
pub use pricing::{BillingPeriod, Plan};
pub use view::{ContentView, DemoView, SummaryView};
