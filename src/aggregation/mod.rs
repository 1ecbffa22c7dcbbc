//! Aggregation of receipts into spending per day, week or month.
//!
//! This module turns a flat list of [Receipt](crate::Receipt)s into:
//! - [PeriodBucket]s: spending per period, most recent first ([bucket_by_period])
//! - [CategoryTotals]: spending per category, optionally limited to one period
//!   ([category_totals])
//! - [QuotaStatus]: a period's spending compared to its quota ([quota_status])
//!
//! [PeriodCursor] defines how the viewer steps through the buckets, and [spending_chart] builds
//! the bar chart of recent periods.
//!
//! Everything here is a pure function of its input. Receipts with bad data are logged and
//! skipped (invalid dates) or counted as zero (invalid totals), so one corrupt receipt never
//! hides the rest.

mod buckets;
mod category;
mod chart;
mod cursor;
mod labels;
mod period;
mod quota;

#[cfg(test)]
mod properties;

pub use buckets::{PeriodBucket, bucket_by_period};
pub use category::{CategoryTotals, category_totals};
pub use chart::{CHART_PERIOD_COUNT, spending_chart};
pub use cursor::{NavigationNotice, PeriodCursor, Step};
pub use labels::{period_label, short_period_label};
pub use period::{Granularity, PeriodKey};
pub use quota::{QuotaStatus, Quotas, quota_status};
