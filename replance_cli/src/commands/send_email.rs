//! The `send-email` subcommand: submit the lead-capture form.

use anyhow::{bail, Result};
use clap::Args;
use replance_lib::lead::{self, LeadForm};
use replance_lib::Config;

use crate::output::{print_lead_outcome, OutputFormat};

/// Arguments for the `send-email` subcommand.
#[derive(Args)]
pub struct SendEmailArgs {
    /// Your name
    #[arg(long)]
    pub name: String,

    /// Address the personalised email goes to
    #[arg(long)]
    pub email: String,

    /// Favorite hobbies
    #[arg(long)]
    pub hobbies: String,

    /// Favorite musical artist
    #[arg(long)]
    pub artist: String,

    /// Favorite movie
    #[arg(long)]
    pub movie: String,
}

impl SendEmailArgs {
    fn form(&self) -> LeadForm {
        LeadForm {
            name: self.name.clone(),
            email: self.email.clone(),
            hobbies: self.hobbies.clone(),
            artist: self.artist.clone(),
            movie: self.movie.clone(),
        }
    }
}

pub async fn run(args: &SendEmailArgs, config: &Config, format: &OutputFormat) -> Result<()> {
    let request = args.form().validate()?;
    let client = config.client()?;

    eprintln!("Sending...");
    let outcome = lead::submit(&client, &request).await;
    print_lead_outcome(&outcome, format);

    if !outcome.is_success() {
        bail!(outcome.message());
    }
    Ok(())
}
