//! Receipt management.
//!
//! This module contains everything related to receipts:
//! - The `Receipt`, `LineItem` and `Category` models and receipt date parsing
//! - Database functions for storing, querying and deleting receipts
//! - Ordering and searching of the receipt history
//! - Route handlers for the receipt API

mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod history;

pub use core::{
    Category, LineItem, NewReceipt, Receipt, create_receipt, create_receipt_tables,
    get_all_receipts, line_items_total, parse_receipt_date,
};
pub use create_endpoint::create_receipt_endpoint;
pub use delete_endpoint::delete_receipt_endpoint;
pub use get_endpoint::{get_receipt_endpoint, get_receipts_endpoint};
