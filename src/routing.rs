//! Application router configuration.

use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::{
    AppState, Error,
    dashboard::{
        get_buckets_endpoint, get_category_totals_endpoint, get_chart_endpoint,
        get_dashboard_endpoint,
    },
    endpoints,
    receipt::{
        create_receipt_endpoint, delete_receipt_endpoint, get_receipt_endpoint,
        get_receipts_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route(
            endpoints::RECEIPTS_API,
            post(create_receipt_endpoint).get(get_receipts_endpoint),
        )
        .route(
            endpoints::RECEIPT,
            get(get_receipt_endpoint).delete(delete_receipt_endpoint),
        )
        .route(endpoints::DASHBOARD, get(get_dashboard_endpoint))
        .route(endpoints::DASHBOARD_BUCKETS, get(get_buckets_endpoint))
        .route(endpoints::DASHBOARD_CHART, get(get_chart_endpoint))
        .route(endpoints::CATEGORIES, get(get_category_totals_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard summary.
async fn get_index() -> Redirect {
    Redirect::to(endpoints::DASHBOARD)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
