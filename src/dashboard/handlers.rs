//! Dashboard HTTP handlers.
//!
//! This module contains:
//! - Route handlers for the period summary, the bucket series, the spending chart and the
//!   category totals
//! - The state and query types used by the handlers

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    aggregation::{
        CategoryTotals, Granularity, PeriodBucket, PeriodKey, Quotas, bucket_by_period,
        category_totals, spending_chart,
    },
    dashboard::summary::{PeriodQuery, PeriodSummary, build_period_summary},
    receipt::{Receipt, get_all_receipts},
    timezone::local_today,
};

/// The state needed for the dashboard endpoints.
///
/// Contains the database connection, the spending quotas and the timezone used to work out
/// which period "today" falls in.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading receipts.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The spending quota for each granularity.
    pub quotas: Quotas,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            quotas: state.quotas,
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Selects the granularity for the bucket and chart endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct GranularityQuery {
    #[serde(default)]
    granularity: Granularity,
}

/// Selects the period for the category totals endpoint.
///
/// Without a granularity the totals cover all time.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    granularity: Option<Granularity>,
}

fn load_receipts(db_connection: &Mutex<Connection>) -> Result<Vec<Receipt>, Error> {
    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_all_receipts(&connection)
}

/// A route handler for the spending summary of one period.
pub async fn get_dashboard_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<PeriodSummary>, Error> {
    let receipts = load_receipts(&state.db_connection)?;

    Ok(Json(build_period_summary(&receipts, query, &state.quotas)))
}

/// A route handler for every period bucket of a granularity, most recent first.
pub async fn get_buckets_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<GranularityQuery>,
) -> Result<Json<Vec<PeriodBucket>>, Error> {
    let receipts = load_receipts(&state.db_connection)?;

    Ok(Json(bucket_by_period(&receipts, query.granularity)))
}

/// A route handler for the ECharts options of the recent spending chart.
pub async fn get_chart_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<GranularityQuery>,
) -> Result<Response, Error> {
    let receipts = load_receipts(&state.db_connection)?;
    let buckets = bucket_by_period(&receipts, query.granularity);
    let quota = state.quotas.for_granularity(query.granularity);

    let options = spending_chart(&buckets, query.granularity, quota).to_string();

    Ok(([(CONTENT_TYPE, "application/json")], options).into_response())
}

/// A route handler for the spending per category.
///
/// With a granularity, only the period containing today's date in the server's timezone is
/// counted.
pub async fn get_category_totals_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<CategoryTotals>, Error> {
    let period = match query.granularity {
        Some(granularity) => Some(PeriodKey::new(
            local_today(&state.local_timezone)?,
            granularity,
        )),
        None => None,
    };

    let receipts = load_receipts(&state.db_connection)?;

    Ok(Json(category_totals(&receipts, period)))
}
