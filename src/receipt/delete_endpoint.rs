use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::ReceiptId, receipt::core::delete_receipt};

/// The state needed to delete a receipt.
#[derive(Debug, Clone)]
pub struct DeleteReceiptState {
    /// The database connection for managing receipts.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteReceiptState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a receipt, responds with 204 No Content on success.
pub async fn delete_receipt_endpoint(
    State(state): State<DeleteReceiptState>,
    Path(receipt_id): Path<ReceiptId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_receipt(receipt_id, &connection) {
        Ok(0) => Error::DeleteMissingReceipt.into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => {
            tracing::error!("Could not delete receipt {receipt_id}: {error}");
            error.into_response()
        }
    }
}
