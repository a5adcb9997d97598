//! Dashboard HTTP handlers and view rendering.

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use time::{Date, Duration, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    dashboard::{
        cards::{OverviewCards, overview_cards_view},
        charts::{DashboardChart, charts_script, charts_view, weekday_revenue_chart},
    },
    html::{HeadElement, base},
    navigation::NavBar,
    revenue::{TransactionRecord, count_with_status, total_amount},
    store::{data_version, member_snapshot, revenue_snapshot},
    timezone::get_local_offset,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading payment and member records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Manila".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for the summary polling endpoint.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// The data version the client rendered last.
    pub version: Option<u64>,
}

/// Holds all the data needed to render the dashboard summary.
struct DashboardData {
    cards: OverviewCards,
    chart: DashboardChart,
    version: u64,
}

/// Display a page with an overview of the gym's data.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    match build_dashboard_data(&state.local_timezone, &connection)? {
        Some(data) => Ok(dashboard_view(nav_bar, &data).into_response()),
        None => Ok(dashboard_no_data_view(nav_bar).into_response()),
    }
}

/// Re-render the dashboard summary when the data has changed.
///
/// The summary section polls this endpoint with the data version it was
/// rendered from. When the fingerprint still matches, the response is `204
/// No Content` and htmx leaves the page alone; otherwise the re-rendered
/// summary replaces the old one. This is how "something changed" reaches
/// the screen: the whole fetch+aggregate pipeline simply runs again.
pub async fn get_dashboard_summary(
    State(state): State<DashboardState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let current_version = data_version(&connection)
        .inspect_err(|error| tracing::error!("could not compute data version: {error}"))?;

    if query.version == Some(current_version) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    match build_dashboard_data(&state.local_timezone, &connection)? {
        Some(data) => Ok(summary_view(&data).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Fetches and builds all data needed for the dashboard display.
///
/// # Returns
/// All dashboard data ready for rendering, or `None` if no payment records
/// exist yet.
///
/// # Errors
/// Returns an error if database queries fail or the timezone is invalid.
fn build_dashboard_data(
    local_timezone_name: &str,
    connection: &Connection,
) -> Result<Option<DashboardData>, Error> {
    let local_timezone = get_local_offset(local_timezone_name).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", local_timezone_name);
        Error::InvalidTimezoneError(local_timezone_name.to_owned())
    })?;
    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let records = revenue_snapshot(None, connection)
        .inspect_err(|error| tracing::error!("could not get payment records: {error}"))?;

    if records.is_empty() {
        return Ok(None);
    }

    let members = member_snapshot(connection)
        .inspect_err(|error| tracing::error!("could not get member records: {error}"))?;

    let version = data_version(connection)
        .inspect_err(|error| tracing::error!("could not compute data version: {error}"))?;

    let cards = OverviewCards {
        total_revenue: total_amount(&records),
        active_members: count_with_status(&members, "Active"),
        todays_sales: records
            .iter()
            .filter(|record| record.date == Some(today))
            .count(),
    };

    let week_records = this_weeks_records(&records, today);
    let chart = DashboardChart {
        id: "weekly-revenue-chart",
        options: weekday_revenue_chart(&week_records).to_string(),
    };

    Ok(Some(DashboardData {
        cards,
        chart,
        version,
    }))
}

/// Keeps the records dated Monday through today of the current week.
fn this_weeks_records(records: &[TransactionRecord], today: Date) -> Vec<TransactionRecord> {
    let week_start = today - Duration::days(today.weekday().number_days_from_monday() as i64);

    records
        .iter()
        .filter(|record| {
            record
                .date
                .is_some_and(|date| date >= week_start && date <= today)
        })
        .cloned()
        .collect()
}

/// Renders the summary section that polls for changes.
fn summary_view(data: &DashboardData) -> Markup {
    let summary_url = format!("{}?version={}", endpoints::DASHBOARD_SUMMARY, data.version);
    let charts = [DashboardChart {
        id: data.chart.id,
        options: data.chart.options.clone(),
    }];

    html!(
        section
            id="dashboard-summary"
            class="w-full mx-auto mb-4"
            hx-get=(summary_url)
            hx-trigger="every 60s"
            hx-swap="outerHTML"
        {
            (overview_cards_view(&data.cards))
            (charts_view(&charts))
            (charts_script(&charts))
        }
    )
}

/// Renders the dashboard page when no payment records exist.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "The overview will show up here once membership payments or
                walk-ins have been recorded."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with the overview cards and trend chart.
fn dashboard_view(nav_bar: NavBar, data: &DashboardData) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-semibold mb-4 self-start" { "Quick Overview" }

            (summary_view(data))
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Dashboard", &scripts, &content)
}
