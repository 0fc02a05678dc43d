//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations of the loaded transactions:
//! - **Card Type Chart**: Doughnut chart of each card type's share
//! - **City Chart**: Doughnut chart of each city's share
//! - **Risk Level Chart**: Bar chart of transaction counts per risk level
//! - **Hour Bucket Chart**: Bar chart of the percentage of transactions per six hour window
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisType, Color, ItemStyle, Label, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{DashboardSummary, Share},
    html::HeadElement,
    theme::Theme,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Creates the four dashboard charts from the summary of the loaded transactions.
pub(super) fn build_dashboard_charts(summary: &DashboardSummary, theme: Theme) -> [DashboardChart; 4] {
    [
        DashboardChart {
            id: "card-type-chart",
            options: share_doughnut_chart("Card Type", &summary.card_types, theme).to_string(),
        },
        DashboardChart {
            id: "city-chart",
            options: share_doughnut_chart("City", &summary.cities, theme).to_string(),
        },
        DashboardChart {
            id: "risk-level-chart",
            options: risk_level_chart(&summary.risk_levels, theme).to_string(),
        },
        DashboardChart {
            id: "hour-bucket-chart",
            options: hour_bucket_chart(&summary.hour_buckets, theme).to_string(),
        },
    ]
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[320px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
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

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

fn share_doughnut_chart(title: &str, shares: &[Share], theme: Theme) -> Chart {
    let data: Vec<(f64, String)> = shares
        .iter()
        .map(|share| (share.count as f64, share.label.clone()))
        .collect();

    Chart::new()
        .title(Title::new().text(title).left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Item).formatter("{b}: {c} ({d}%)"))
        .legend(Legend::new().bottom(0))
        .color(palette(theme))
        .series(
            Pie::new()
                .name(title)
                .radius(vec!["40%", "70%"])
                .label(Label::new().formatter("{d}%"))
                .data(data),
        )
}

fn risk_level_chart(shares: &[Share], theme: Theme) -> Chart {
    let labels: Vec<String> = shares.iter().map(|share| share.label.clone()).collect();
    let counts: Vec<f64> = shares.iter().map(|share| share.count as f64).collect();

    Chart::new()
        .title(Title::new().text("Risk Level").left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).name("Risk level").data(labels))
        .y_axis(Axis::new().type_(AxisType::Value).name("Transactions"))
        .series(
            Bar::new()
                .name("Transactions")
                .item_style(ItemStyle::new().color(theme.primary_colour()))
                .data(counts),
        )
}

fn hour_bucket_chart(shares: &[Share], theme: Theme) -> Chart {
    let labels: Vec<String> = shares.iter().map(|share| share.label.clone()).collect();
    let percentages: Vec<f64> = shares.iter().map(|share| share.percent).collect();

    Chart::new()
        .title(Title::new().text("Time of Day").left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
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
                .name("Percentage (%)")
                .axis_label(AxisLabel::new().formatter("{value}%")),
        )
        .series(
            Bar::new()
                .name("Percentage")
                .item_style(ItemStyle::new().color(theme.secondary_colour()))
                .data(percentages),
        )
}

fn palette(theme: Theme) -> Vec<Color> {
    theme
        .chart_palette()
        .iter()
        .map(|colour| Color::from(*colour))
        .collect()
}
