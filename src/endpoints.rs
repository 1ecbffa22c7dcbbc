//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/receipts/{receipt_id}', use [format_endpoint].

/// The route to create receipts and list the receipt history.
pub const RECEIPTS_API: &str = "/api/receipts";
/// The route to access a single receipt.
pub const RECEIPT: &str = "/api/receipts/{receipt_id}";
/// The route for the spending summary of a single period.
pub const DASHBOARD: &str = "/api/dashboard";
/// The route for every period bucket of a granularity.
pub const DASHBOARD_BUCKETS: &str = "/api/dashboard/buckets";
/// The route for the chart of recent spending.
pub const DASHBOARD_CHART: &str = "/api/dashboard/chart";
/// The route for spending per category.
pub const CATEGORIES: &str = "/api/categories";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/receipts/{receipt_id}', '{receipt_id}' is the
/// parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
