//! Spending totals per category.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    aggregation::{PeriodKey, buckets::valued_receipts},
    amount::add_saturating,
    receipt::{Category, Receipt},
};

/// The amount spent in each [Category].
///
/// Every category is always present, with zero for categories that have no spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<Category, Decimal>);

impl Default for CategoryTotals {
    fn default() -> Self {
        Self(
            Category::ALL
                .into_iter()
                .map(|category| (category, Decimal::ZERO))
                .collect(),
        )
    }
}

impl CategoryTotals {
    /// The amount spent in `category`.
    pub fn get(&self, category: Category) -> Decimal {
        self.0.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Add `amount` to the total for `category`.
    ///
    /// The total stops at [Decimal::MAX] rather than overflowing.
    pub fn add(&mut self, category: Category, amount: Decimal) {
        let total = self.0.entry(category).or_insert(Decimal::ZERO);
        *total = add_saturating(*total, amount);
    }

    /// The sum over all categories.
    pub fn sum(&self) -> Decimal {
        self.0.values().copied().fold(Decimal::ZERO, add_saturating)
    }
}

/// Sum the receipt totals for each category.
///
/// When `period` is given, only receipts dated within that period are counted, e.g.
/// `Some(PeriodKey::new(today, Granularity::Weekly))` for this week's spending.
/// Receipts with an invalid date or an unknown category are left out; a bad total counts as
/// zero.
pub fn category_totals(receipts: &[Receipt], period: Option<PeriodKey>) -> CategoryTotals {
    let mut totals = CategoryTotals::default();

    for receipt in valued_receipts(receipts) {
        if period.is_some_and(|period| !period.contains(receipt.date)) {
            continue;
        }

        if let Some(category) = receipt.category {
            totals.add(category, receipt.amount);
        }
    }

    totals
}
