mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use replance_lib::Config;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "replance")]
#[command(about = "Replance demo client: live demo feed, lead capture and pricing")]
struct Cli {
    /// Output format: table, json, markdown, or html
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file and REPLANCE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the backend and show stock, events and the generated overview
    Demo(commands::demo::DemoArgs),
    /// Submit the lead-capture form
    SendEmail(commands::send_email::SendEmailArgs),
    /// Show pricing plans
    Pricing(commands::pricing::PricingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("replance=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        "html" => OutputFormat::Html,
        _ => OutputFormat::Table,
    };

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config.validate()?;
    }
    tracing::debug!(base_url = %config.base_url, "Configuration loaded");

    match &cli.command {
        Commands::Demo(args) => commands::demo::run(args, &config, &format).await?,
        Commands::SendEmail(args) => commands::send_email::run(args, &config, &format).await?,
        Commands::Pricing(args) => commands::pricing::run(args, &format)?,
    }

    Ok(())
}
