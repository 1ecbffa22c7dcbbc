//! Receipt Tracker is a small web service for keeping track of spending from scanned receipts.
//!
//! This library provides a JSON API for storing receipts and for viewing spending aggregated by
//! day, week or month and by category, checked against a spending quota for each period.
//!
//! The aggregation engine in [aggregation] is independent of the web layer and can be used on
//! any list of [Receipt]s.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

pub mod aggregation;
mod amount;
mod app_state;
mod config;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod receipt;
mod routing;
mod timezone;

pub use aggregation::{
    CategoryTotals, Granularity, NavigationNotice, PeriodBucket, PeriodCursor, PeriodKey,
    QuotaStatus, Quotas, bucket_by_period, category_totals, quota_status,
};
pub use amount::parse_amount;
pub use app_state::AppState;
pub use config::load_quotas;
pub use database_id::{DatabaseId, ReceiptId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use receipt::{
    Category, LineItem, NewReceipt, Receipt, create_receipt, line_items_total, parse_receipt_date,
};
pub use routing::build_router;
pub use timezone::get_local_offset;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A receipt date could not be parsed as a `DD/MM/YYYY` calendar date.
    #[error("\"{0}\" is not a valid date, expected DD/MM/YYYY")]
    InvalidReceiptDate(String),

    /// A money amount could not be parsed as a decimal number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// An empty string was used as the store name of a receipt.
    #[error("store name cannot be empty")]
    EmptyStoreName,

    /// A line item was given a quantity of zero.
    #[error("the line item \"{0}\" must have a quantity of at least one")]
    InvalidQuantity(String),

    /// The line items of a receipt add up to more than a decimal amount can hold.
    #[error("the line items add up to more than the largest supported amount")]
    LineItemTotalOverflow,

    /// The quota configuration file could not be read or contained invalid values.
    #[error("invalid quota configuration: {0}")]
    InvalidQuotaConfig(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a receipt that does not exist
    #[error("tried to delete a receipt that is not in the database")]
    DeleteMissingReceipt,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Error::InvalidReceiptDate(_)
            | Error::InvalidAmount(_)
            | Error::EmptyStoreName
            | Error::InvalidQuantity(_)
            | Error::LineItemTotalOverflow => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound | Error::DeleteMissingReceipt => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
