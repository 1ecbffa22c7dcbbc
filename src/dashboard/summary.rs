//! The spending summary for the period being viewed on the dashboard.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::{
        CategoryTotals, Granularity, PeriodCursor, PeriodKey, QuotaStatus, Quotas, Step,
        bucket_by_period, period_label, quota_status,
    },
    receipt::Receipt,
};

/// Which period the dashboard should show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PeriodQuery {
    /// The granularity to group spending by.
    #[serde(default)]
    pub granularity: Granularity,
    /// The index of the period the client is currently showing, 0 being the most recent.
    #[serde(default)]
    pub index: usize,
    /// Move one period from `index` before building the summary.
    pub step: Option<Step>,
}

/// The spending in the period under the cursor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodView {
    pub period_key: PeriodKey,
    pub label: String,
    pub total: Decimal,
    pub category_totals: CategoryTotals,
}

/// Everything the dashboard needs to show one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub granularity: Granularity,
    /// The index of the period being shown, after any step was applied.
    pub index: usize,
    pub bucket_count: usize,
    pub has_older: bool,
    pub has_newer: bool,
    /// Set when the requested step went past the oldest or newest period.
    pub notice: Option<&'static str>,
    /// `None` when there is no spending at all for the granularity.
    pub period: Option<PeriodView>,
    pub quota: QuotaStatus,
}

/// Build the summary of the period selected by `query`.
///
/// A step that would go past either end leaves the index unchanged and sets
/// [PeriodSummary::notice].
pub fn build_period_summary(
    receipts: &[Receipt],
    query: PeriodQuery,
    quotas: &Quotas,
) -> PeriodSummary {
    let buckets = bucket_by_period(receipts, query.granularity);
    let bucket_count = buckets.len();

    let mut cursor = PeriodCursor::at(query.granularity, query.index, bucket_count);
    let notice = query
        .step
        .and_then(|step| cursor.step(step, bucket_count).err())
        .inspect(|notice| tracing::debug!("Ignoring step at index {}: {notice}", cursor.index()));

    let period = cursor.current(&buckets).map(|bucket| PeriodView {
        period_key: bucket.period_key,
        label: period_label(&bucket.period_key),
        total: bucket.total,
        category_totals: bucket.category_totals.clone(),
    });
    let period_total = period
        .as_ref()
        .map_or(Decimal::ZERO, |period| period.total);

    PeriodSummary {
        granularity: query.granularity,
        index: cursor.index(),
        bucket_count,
        has_older: cursor.has_older(bucket_count),
        has_newer: cursor.has_newer(),
        notice: notice.map(|notice| notice.message()),
        period,
        quota: quota_status(period_total, query.granularity, quotas),
    }
}
