//! Route handlers for the transactions page and its table partial.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use std::sync::{Arc, Mutex};

use crate::{
    AppState, Error, endpoints,
    navigation::NavBar,
    revenue::{
        StatusFilter, TransactionRecord, count_with_status, filter_by_search, total_amount,
    },
    store::revenue_snapshot,
};

use super::view::{TransactionsSummary, transactions_table, transactions_view};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for reading payment records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The filter controls as they arrive in the query string.
///
/// Missing parameters mean "no filter", matching the initial page load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionsQuery {
    /// The status dropdown value ("All", "Paid", "Pending", ...).
    #[serde(default)]
    pub status: Option<String>,
    /// The name search query.
    #[serde(default)]
    pub search: Option<String>,
}

impl TransactionsQuery {
    pub(crate) fn status_filter(&self) -> StatusFilter {
        StatusFilter::from_query_value(self.status.as_deref().unwrap_or_default())
    }

    pub(crate) fn search_query(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

/// Render an overview of the gym's payment records.
pub async fn get_transactions_page(
    State(state): State<TransactionsState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let records = revenue_snapshot(None, &connection)
        .inspect_err(|error| tracing::error!("could not get payment records: {error}"))?;

    let summary = build_summary(&records);
    let rows = filtered_rows(&records, &query);
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);

    Ok(transactions_view(nav_bar, &summary, &rows, &query).into_response())
}

/// Re-render the transactions table for the current filter selection.
///
/// Targeted by the filter form via htmx; the form's `hx-sync` setting
/// aborts an in-flight request when the filter changes again, so a slow
/// older response can never overwrite a newer one.
pub async fn get_transactions_table(
    State(state): State<TransactionsState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let records = revenue_snapshot(None, &connection)
        .inspect_err(|error| tracing::error!("could not get payment records: {error}"))?;

    let rows = filtered_rows(&records, &query);

    Ok(transactions_table(&rows, &query).into_response())
}

/// Sorts the snapshot newest-first and applies the filter selection.
///
/// Undated records sort last so malformed rows stay visible rather than
/// disappearing.
pub(crate) fn filtered_rows(
    records: &[TransactionRecord],
    query: &TransactionsQuery,
) -> Vec<TransactionRecord> {
    let mut sorted: Vec<TransactionRecord> = records.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let status = query.status_filter();
    filter_by_search(&sorted, &status, query.search_query())
        .cloned()
        .collect()
}

fn build_summary(records: &[TransactionRecord]) -> TransactionsSummary {
    TransactionsSummary {
        total_revenue: total_amount(records),
        completed: count_with_status(records, "Paid"),
        pending: count_with_status(records, "Pending"),
    }
}
