use anyhow::Result;
use clap::Args;
use replance_lib::BillingPeriod;

use crate::output::{print_pricing, OutputFormat};

#[derive(Args)]
pub struct PricingArgs {
    /// Billing period: monthly or yearly
    #[arg(long, default_value = "monthly")]
    pub billing: String,
}

pub fn run(args: &PricingArgs, format: &OutputFormat) -> Result<()> {
    let period: BillingPeriod = args.billing.parse()?;
    print_pricing(period, format);
    Ok(())
}
