//! Grouping receipts into period buckets.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    aggregation::{CategoryTotals, Granularity, PeriodKey},
    amount::{add_saturating, parse_non_negative_amount},
    database_id::ReceiptId,
    receipt::{Category, Receipt, parse_receipt_date},
};

/// The spending in one day, week or month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    /// The period the bucket covers.
    pub period_key: PeriodKey,
    /// The sum of the totals of every receipt in the period.
    pub total: Decimal,
    /// The sum of the totals in the period for each category.
    ///
    /// Receipts without a known category count towards [PeriodBucket::total] only.
    pub category_totals: CategoryTotals,
}

impl PeriodBucket {
    fn empty(period_key: PeriodKey) -> Self {
        Self {
            period_key,
            total: Decimal::ZERO,
            category_totals: CategoryTotals::default(),
        }
    }
}

/// A receipt with its date and total parsed.
pub(super) struct ValuedReceipt {
    pub date: Date,
    pub amount: Decimal,
    pub category: Option<Category>,
}

/// Parse the date, total and category of each receipt.
///
/// Receipts with a date that cannot be parsed are skipped. A missing, unparsable or negative
/// total counts as zero. Both cases are logged as warnings and never stop the remaining
/// receipts from being processed.
pub(super) fn valued_receipts(receipts: &[Receipt]) -> impl Iterator<Item = ValuedReceipt> + '_ {
    receipts.iter().filter_map(|receipt| {
        let date = match parse_receipt_date(&receipt.date) {
            Ok(date) => date,
            Err(error) => {
                tracing::warn!("Skipping receipt {}: {error}", receipt.id);
                return None;
            }
        };

        Some(ValuedReceipt {
            date,
            amount: receipt_amount(receipt.id, receipt.total.as_deref()),
            category: receipt.category(),
        })
    })
}

fn receipt_amount(id: ReceiptId, total: Option<&str>) -> Decimal {
    let Some(total) = total else {
        tracing::warn!("Receipt {id} has no total, counting it as $0");
        return Decimal::ZERO;
    };

    parse_non_negative_amount(total).unwrap_or_else(|error| {
        tracing::warn!("Receipt {id} has an invalid total, counting it as $0: {error}");
        Decimal::ZERO
    })
}

/// Group `receipts` into one bucket per period of `granularity`.
///
/// The buckets are ordered most recent first, so index 0 is the latest period with spending.
/// Only periods that contain at least one receipt get a bucket: a week with no receipts is
/// skipped, not reported as $0. Receipts with invalid dates are left out (see
/// [parse_receipt_date]).
pub fn bucket_by_period(receipts: &[Receipt], granularity: Granularity) -> Vec<PeriodBucket> {
    let mut buckets: BTreeMap<PeriodKey, PeriodBucket> = BTreeMap::new();

    for receipt in valued_receipts(receipts) {
        let period_key = PeriodKey::new(receipt.date, granularity);
        let bucket = buckets
            .entry(period_key)
            .or_insert_with(|| PeriodBucket::empty(period_key));

        bucket.total = add_saturating(bucket.total, receipt.amount);

        if let Some(category) = receipt.category {
            bucket.category_totals.add(category, receipt.amount);
        }
    }

    buckets.into_values().rev().collect()
}
