//! Ordering and searching of the receipt history.

use std::cmp::Reverse;

use crate::receipt::{Receipt, parse_receipt_date};

/// Sort `receipts` so that the most recent purchase comes first.
///
/// Receipts with the same date keep their existing order. Receipts whose date cannot be parsed
/// go to the end.
pub fn sort_newest_first(receipts: &mut [Receipt]) {
    receipts.sort_by_key(|receipt| Reverse(parse_receipt_date(&receipt.date).ok()));
}

/// Keep the receipts whose store name contains `search`, ignoring case.
///
/// A blank search keeps everything.
pub fn filter_by_store_name(receipts: Vec<Receipt>, search: &str) -> Vec<Receipt> {
    let search = search.trim().to_lowercase();

    if search.is_empty() {
        return receipts;
    }

    receipts
        .into_iter()
        .filter(|receipt| receipt.store_name.to_lowercase().contains(&search))
        .collect()
}
