//! Static pricing catalogue shown on the landing page.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ReplanceError;

/// Billing toggle. Yearly prices are ten months' worth.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl BillingPeriod {
    /// Price suffix, e.g. `$30 / mo`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Monthly => "mo",
            Self::Yearly => "yr",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BillingPeriod {
    type Err = ReplanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "mo" => Ok(Self::Monthly),
            "yearly" | "year" | "yr" | "annual" => Ok(Self::Yearly),
            _ => Err(ReplanceError::InvalidInput(format!(
                "unknown billing period '{}'. Valid values: monthly, yearly",
                s
            ))),
        }
    }
}

/// One pricing tier.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub title: &'static str,
    pub monthly_price: u32,
    pub yearly_price: u32,
    pub features: &'static [&'static str],
}

impl Plan {
    pub fn price(&self, period: BillingPeriod) -> u32 {
        match period {
            BillingPeriod::Monthly => self.monthly_price,
            BillingPeriod::Yearly => self.yearly_price,
        }
    }

    /// Display string such as `$42 / mo`.
    pub fn price_label(&self, period: BillingPeriod) -> String {
        format!("${} / {}", self.price(period), period.suffix())
    }
}

pub const SAVINGS_NOTE: &str = "Save up to 30% with yearly billing";

pub const PLANS: &[Plan] = &[
    Plan {
        title: "Freelancer",
        monthly_price: 30,
        yearly_price: 300,
        features: &[
            "1 Freelancer Profile",
            "50 Proposals / Month",
            "Email support",
            "Online Community Access",
            "60-day money-back guarantee",
        ],
    },
    Plan {
        title: "Freelancer Pro",
        monthly_price: 42,
        yearly_price: 420,
        features: &[
            "3 Freelancer Profiles",
            "250 Proposals / Month",
            "Chat & email support",
            "Online Community Access",
            "60-day money-back guarantee",
        ],
    },
    Plan {
        title: "Freelancer Agency",
        monthly_price: 100,
        yearly_price: 1000,
        features: &[
            "10 Freelancer Profiles",
            "1500 Proposals / Month",
            "One-on-one Support",
            "Online Community Access",
            "60-day money-back guarantee",
        ],
    },
];
