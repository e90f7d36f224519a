//! Subscription tiers shown on the pricing page
//!
//! Prices are integer cents. An annual plan costs ten monthly payments.

use std::fmt;

/// Months charged for a year on the annual plan
pub const ANNUAL_MONTHS_CHARGED: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillingCycle {
    #[default]
    Monthly,
    Annual,
}

impl BillingCycle {
    pub fn toggled(self) -> Self {
        match self {
            BillingCycle::Monthly => BillingCycle::Annual,
            BillingCycle::Annual => BillingCycle::Monthly,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "/mo",
            BillingCycle::Annual => "/yr",
        }
    }
}

/// Money amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cents(pub u32);

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingTier {
    pub name: &'static str,
    pub tagline: &'static str,
    pub monthly: Cents,
    pub features: &'static [&'static str],
    pub highlighted: bool,
}

impl PricingTier {
    pub fn annual(&self) -> Cents {
        Cents(self.monthly.0 * ANNUAL_MONTHS_CHARGED)
    }

    pub fn price(&self, cycle: BillingCycle) -> Cents {
        match cycle {
            BillingCycle::Monthly => self.monthly,
            BillingCycle::Annual => self.annual(),
        }
    }

    /// Twelve monthly payments minus the annual price
    pub fn annual_savings(&self) -> Cents {
        Cents(self.monthly.0 * 12 - self.annual().0)
    }

    /// e.g. "$49.90/yr"
    pub fn price_label(&self, cycle: BillingCycle) -> String {
        format!("{}{}", self.price(cycle), cycle.suffix())
    }

    /// Only shown on the annual plan
    pub fn savings_label(&self, cycle: BillingCycle) -> Option<String> {
        match cycle {
            BillingCycle::Monthly => None,
            BillingCycle::Annual => Some(format!("Save {}", self.annual_savings())),
        }
    }
}

pub const TIERS: &[PricingTier] = &[
    PricingTier {
        name: "Basic",
        tagline: "For a single squad getting started with AARs",
        monthly: Cents(499),
        features: &[
            "Up to 15 users",
            "Unlimited AARs",
            "Event scheduling",
            "Sustain / improve / action tracking",
        ],
        highlighted: false,
    },
    PricingTier {
        name: "Pro",
        tagline: "For companies running a full training calendar",
        monthly: Cents(999),
        features: &[
            "Up to 150 users",
            "Everything in Basic",
            "Unit hierarchy and referral codes",
            "AAR analytics",
        ],
        highlighted: true,
    },
    PricingTier {
        name: "Battalion",
        tagline: "For battalion staff tracking every subordinate unit",
        monthly: Cents(2499),
        features: &[
            "Unlimited users",
            "Everything in Pro",
            "Cross-unit trend reports",
            "Priority support",
        ],
        highlighted: false,
    },
];
