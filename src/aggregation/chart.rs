//! Bar chart of recent spending for the dashboard.
//!
//! The chart is generated as an ECharts configuration that the client renders as-is. Only
//! string templates are used for formatting so the configuration stays plain JSON.

use charming::{
    Chart,
    component::{Axis, Grid, Title, VisualMap, VisualMapPiece},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::bar,
};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::aggregation::{Granularity, PeriodBucket, labels::short_period_label};

/// How many periods the spending chart shows.
pub const CHART_PERIOD_COUNT: usize = 7;

/// A bar chart of the most recent [CHART_PERIOD_COUNT] buckets, oldest on the left.
///
/// `buckets` must be ordered most recent first, as returned by
/// [bucket_by_period](crate::aggregation::bucket_by_period). Bars for periods that went over
/// `quota` are drawn in red.
pub fn spending_chart(buckets: &[PeriodBucket], granularity: Granularity, quota: Decimal) -> Chart {
    let (labels, values) = chart_labels_and_values(buckets);
    let quota = quota.to_f64().unwrap_or(f64::MAX);

    Chart::new()
        .title(
            Title::new()
                .text(format!("{} Spending", granularity.label()))
                .subtext("Most recent periods with spending"),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter("${value}")),
        )
        .visual_map(VisualMap::new().show(false).pieces(vec![
            VisualMapPiece::new().gt(quota).color("red"),
            VisualMapPiece::new().lte(quota).color("steelblue"),
        ]))
        .series(bar::Bar::new().name("Spending").data(values))
}

/// The axis labels and totals of the most recent buckets in chronological order.
fn chart_labels_and_values(buckets: &[PeriodBucket]) -> (Vec<String>, Vec<f64>) {
    buckets
        .iter()
        .take(CHART_PERIOD_COUNT)
        .rev()
        .map(|bucket| {
            (
                short_period_label(&bucket.period_key),
                bucket.total.to_f64().unwrap_or_default(),
            )
        })
        .unzip()
}

/// Creates an axis tooltip that shades the hovered bar.
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
