//! Defines the endpoint for saving a new receipt.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    receipt::{NewReceipt, core::create_receipt},
};

/// The state needed to create a receipt.
#[derive(Debug, Clone)]
pub struct CreateReceiptState {
    /// The database connection for managing receipts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateReceiptState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for saving a new receipt.
///
/// Responds with 201 Created and the saved receipt, or 400 Bad Request if the receipt is invalid.
pub async fn create_receipt_endpoint(
    State(state): State<CreateReceiptState>,
    Json(new_receipt): Json<NewReceipt>,
) -> Response {
    if let Err(error) = new_receipt.validate() {
        tracing::warn!("Could not save receipt: {error}");
        return error.into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_receipt(new_receipt, &connection) {
        Ok(receipt) => {
            tracing::info!("Saved receipt {} from {}", receipt.id, receipt.store_name);

            (
                StatusCode::CREATED,
                Json(json!({
                    "message": "Receipt saved successfully!",
                    "receipt": receipt,
                })),
            )
                .into_response()
        }
        Err(error) => {
            tracing::warn!("Could not save receipt: {error}");
            error.into_response()
        }
    }
}
