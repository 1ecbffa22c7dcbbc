//! Spending quotas and checking a period's spending against them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::Granularity;

/// The spending ceiling for each granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quotas {
    /// The most that should be spent in a day.
    pub daily: Decimal,
    /// The most that should be spent in a week.
    pub weekly: Decimal,
    /// The most that should be spent in a month.
    pub monthly: Decimal,
}

impl Default for Quotas {
    fn default() -> Self {
        Self {
            daily: Decimal::new(70, 0),
            weekly: Decimal::new(500, 0),
            monthly: Decimal::new(1500, 0),
        }
    }
}

impl Quotas {
    /// The quota for periods of `granularity`.
    pub fn for_granularity(&self, granularity: Granularity) -> Decimal {
        match granularity {
            Granularity::Daily => self.daily,
            Granularity::Weekly => self.weekly,
            Granularity::Monthly => self.monthly,
        }
    }
}

/// How a period's spending compares to its quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    /// The quota the spending was compared against.
    pub quota: Decimal,
    /// The quota minus the spending. Negative once the quota has been exceeded.
    pub remaining: Decimal,
    /// Whether more than the quota was spent. Spending exactly the quota is not exceeding it.
    pub exceeded: bool,
    /// How much the quota was exceeded by, rounded up to the whole dollar.
    pub exceeded_by: Option<Decimal>,
}

/// Compare `period_total` with the quota for `granularity`.
pub fn quota_status(period_total: Decimal, granularity: Granularity, quotas: &Quotas) -> QuotaStatus {
    let quota = quotas.for_granularity(granularity);
    let remaining = quota.saturating_sub(period_total);
    let exceeded = remaining < Decimal::ZERO;

    QuotaStatus {
        quota,
        remaining,
        exceeded,
        exceeded_by: exceeded.then(|| remaining.abs().ceil().normalize()),
    }
}
