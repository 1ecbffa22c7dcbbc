//! Dashboard module
//!
//! Provides the spending summary for one period at a time, the full period series, the chart
//! of recent spending and the spending per category.

mod handlers;
mod summary;

pub use handlers::{
    get_buckets_endpoint, get_category_totals_endpoint, get_chart_endpoint,
    get_dashboard_endpoint,
};
