//! The `demo` subcommand: poll the backend and print each completed run.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use replance_lib::{validation, Config, DemoView, Pipeline, PollOptions, Poller};

use crate::output::{print_demo, OutputFormat};

/// Arguments for the `demo` subcommand.
#[derive(Args)]
pub struct DemoArgs {
    /// Fetch once, print the result and exit
    #[arg(long)]
    pub once: bool,

    /// Seconds between refreshes (default from config, 60)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Exit after this many refreshes
    #[arg(long, conflicts_with = "once")]
    pub max_runs: Option<u64>,
}

pub async fn run(args: &DemoArgs, config: &Config, format: &OutputFormat) -> Result<()> {
    let interval = match args.interval {
        Some(secs) => Duration::from_secs(validation::validate_poll_secs(secs)?),
        None => config.poll_interval,
    };
    let max_runs = if args.once { Some(1) } else { args.max_runs };

    let pipeline = Arc::new(Pipeline::new(config.client()?));
    let mut updates = pipeline.subscribe();

    let mut options = PollOptions::every(interval);
    if let Some(max) = max_runs {
        options = options.with_max_runs(max);
    }
    let poller = Poller::spawn(Arc::clone(&pipeline), options);
    let mut printed_generation = 0;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("Interrupted, stopping refresh");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if !state.stage.is_terminal() || state.generation == printed_generation {
                    continue;
                }
                if printed_generation > 0
                    && matches!(format, OutputFormat::Table | OutputFormat::Markdown)
                {
                    println!();
                }
                printed_generation = state.generation;
                print_demo(&DemoView::from_state(&state), format);

                if max_runs.is_some_and(|max| state.generation >= max) {
                    break;
                }
            }
        }
    }

    let stats = poller.shutdown().await;
    tracing::info!(
        runs = stats.runs_started,
        failed = stats.runs_failed,
        skipped_ticks = stats.ticks_skipped,
        "Demo finished"
    );
    Ok(())
}
