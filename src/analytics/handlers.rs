//! Route handlers for the analytics page and its charts partial.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};
use time::{Date, Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    dashboard::charts::{DashboardChart, charts_script, charts_view},
    endpoints,
    html::{FORM_TEXT_INPUT_STYLE, HeadElement, base},
    navigation::NavBar,
    store::revenue_snapshot,
    timezone::get_local_offset,
};

use super::charts::{membership_chart, revenue_chart};

/// Days covered by the six month range preset.
const SIX_MONTH_PERIOD_DAYS: i64 = 183;
/// Days covered by the twelve month range preset.
const TWELVE_MONTH_PERIOD_DAYS: i64 = 365;

/// The selectable chart ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum RangePreset {
    /// The last six months, bucketed by calendar month.
    #[default]
    SixMonths,
    /// The last twelve months, bucketed by calendar month.
    TwelveMonths,
    /// All records, bucketed by year.
    ByYear,
}

impl RangePreset {
    pub(crate) fn from_query_value(value: &str) -> Self {
        match value {
            "12months" => Self::TwelveMonths,
            "year" => Self::ByYear,
            _ => Self::SixMonths,
        }
    }

    pub(crate) fn as_query_value(self) -> &'static str {
        match self {
            Self::SixMonths => "6months",
            Self::TwelveMonths => "12months",
            Self::ByYear => "year",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::SixMonths => "Last 6 months",
            Self::TwelveMonths => "Last 12 months",
            Self::ByYear => "By year",
        }
    }

    /// The date window to fetch for this preset, if it is windowed at all.
    fn date_range(self, today: Date) -> Option<RangeInclusive<Date>> {
        match self {
            Self::SixMonths => Some(today - Duration::days(SIX_MONTH_PERIOD_DAYS)..=today),
            Self::TwelveMonths => Some(today - Duration::days(TWELVE_MONTH_PERIOD_DAYS)..=today),
            Self::ByYear => None,
        }
    }
}

/// The state needed for the analytics page.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    /// The database connection for reading payment records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The range dropdown selection as it arrives in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// The selected range preset's query value.
    #[serde(default)]
    pub range: Option<String>,
}

/// Display the analytics page.
pub async fn get_analytics_page(
    State(state): State<AnalyticsState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Response, Error> {
    let preset = RangePreset::from_query_value(query.range.as_deref().unwrap_or_default());
    let charts = build_charts(&state, preset)?;
    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW);

    Ok(analytics_view(nav_bar, preset, &charts).into_response())
}

/// Re-render the charts for the selected range.
///
/// Targeted by the range dropdown via htmx; the dropdown's `hx-sync`
/// setting aborts an in-flight request when the selection changes again,
/// so a slow older response can never overwrite a newer one.
pub async fn get_analytics_charts(
    State(state): State<AnalyticsState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Response, Error> {
    let preset = RangePreset::from_query_value(query.range.as_deref().unwrap_or_default());
    let charts = build_charts(&state, preset)?;

    Ok(charts_section(&charts).into_response())
}

/// Fetches the snapshot for `preset` and builds both chart configurations.
fn build_charts(
    state: &AnalyticsState,
    preset: RangePreset,
) -> Result<[DashboardChart; 2], Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;
    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let windowed_records = revenue_snapshot(preset.date_range(today), &connection)
        .inspect_err(|error| tracing::error!("could not get payment records: {error}"))?;

    // The pie chart always covers the full history, matching the original
    // screen where changing the range only affects the bar chart.
    let all_records = revenue_snapshot(None, &connection)
        .inspect_err(|error| tracing::error!("could not get payment records: {error}"))?;

    Ok([
        DashboardChart {
            id: "revenue-chart",
            options: revenue_chart(&windowed_records, preset).to_string(),
        },
        DashboardChart {
            id: "membership-chart",
            options: membership_chart(&all_records).to_string(),
        },
    ])
}

fn charts_section(charts: &[DashboardChart]) -> Markup {
    html!(
        section id="analytics-charts" class="w-full mx-auto mb-4" {
            (charts_view(charts))
            (charts_script(charts))
        }
    )
}

fn analytics_view(nav_bar: NavBar, preset: RangePreset, charts: &[DashboardChart]) -> Markup {
    let nav_bar = nav_bar.into_html();
    let presets = [
        RangePreset::SixMonths,
        RangePreset::TwelveMonths,
        RangePreset::ByYear,
    ];

    let content = html!(
        (nav_bar)

        div
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="flex justify-between items-center mb-4 w-full"
            {
                h2 class="text-xl font-semibold" { "Analytics" }

                form
                    hx-get=(endpoints::ANALYTICS_CHARTS)
                    hx-target="#analytics-charts"
                    hx-swap="outerHTML"
                    hx-trigger="change"
                    hx-sync="this:replace"
                {
                    select
                        name="range"
                        aria-label="Select range"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for option in presets {
                            option
                                value=(option.as_query_value())
                                selected[option == preset]
                            {
                                (option.label())
                            }
                        }
                    }
                }
            }

            (charts_section(charts))
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Analytics", &scripts, &content)
}
