//! CSV export of the transactions table.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    store::revenue_snapshot,
    transaction::{TransactionsQuery, TransactionsState, filtered_rows},
};

/// Download the currently-filtered payment records as a CSV attachment.
///
/// Accepts the same query parameters as the transactions table so the
/// export always matches what is on screen.
pub async fn export_transactions(
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

    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["date", "name", "plan", "amount", "status"])
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for record in &rows {
        writer
            .write_record([
                record
                    .date
                    .map(|date| date.to_string())
                    .unwrap_or_default(),
                record.name.clone(),
                record.plan.clone(),
                format!("{:.2}", record.amount),
                record.status.clone(),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        bytes,
    )
        .into_response())
}
