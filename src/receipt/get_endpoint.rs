//! Defines the endpoints for reading the receipt history and single receipts.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::ReceiptId,
    receipt::{
        Receipt,
        core::{get_all_receipts, get_receipt},
        history::{filter_by_store_name, sort_newest_first},
    },
};

/// The state needed to read receipts.
#[derive(Debug, Clone)]
pub struct GetReceiptsState {
    /// The database connection for managing receipts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GetReceiptsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for the receipt history.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    /// Only include receipts whose store name contains this text.
    pub search: Option<String>,
}

/// A route handler for the receipt history, most recent purchase first.
pub async fn get_receipts_endpoint(
    State(state): State<GetReceiptsState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Receipt>>, Error> {
    let receipts = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_receipts(&connection)?
    };

    let mut receipts = match query.search.as_deref() {
        Some(search) => filter_by_store_name(receipts, search),
        None => receipts,
    };
    sort_newest_first(&mut receipts);

    Ok(Json(receipts))
}

/// A route handler for a single receipt, responds with 404 if the receipt does not exist.
pub async fn get_receipt_endpoint(
    State(state): State<GetReceiptsState>,
    Path(receipt_id): Path<ReceiptId>,
) -> Result<Json<Receipt>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_receipt(receipt_id, &connection).map(Json)
}
