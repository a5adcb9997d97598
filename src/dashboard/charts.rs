//! Chart generation and rendering for the dashboard.
//!
//! Creates the weekly revenue trend bar chart as ECharts JSON configuration
//! plus the HTML container and initialization script that goes with it.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::revenue::{TransactionRecord, sum_by_weekday};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(crate) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(crate) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
        {
            @for chart in charts {
                div
                    id=(chart.id)
                    class="min-h-[380px] rounded dark:bg-gray-100"
                {}
            }
        }
    )
}

/// Generates the JavaScript that initializes the charts.
///
/// The script runs immediately rather than on DOMContentLoaded so that it
/// also works when htmx swaps the chart containers into an already-loaded
/// page.
pub(crate) fn charts_script(charts: &[DashboardChart]) -> Markup {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!( script { (PreEscaped(script_content)) } )
}

pub(super) fn weekday_revenue_chart(records: &[TransactionRecord]) -> Chart {
    let (labels, values) = sum_by_weekday(records);

    Chart::new()
        .title(Title::new().text("Revenue Trend").subtext("This week"))
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
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Revenue").data(values))
}

#[inline]
pub(crate) fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-PH', {
              style: 'currency',
              currency: 'PHP'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
pub(crate) fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
