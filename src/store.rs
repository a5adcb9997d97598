//! Queries that read the gym's records and normalize them at the boundary.
//!
//! The membership and walk-in tables use different column names for the
//! same concepts (`id` vs `record_id`, `price` vs `walkinpayment`,
//! `created_at` vs `createdat`). Each query maps its own row shape into
//! [TransactionRecord] and the combined snapshot is deduplicated, so the
//! aggregation code never sees the source schemas.

use std::ops::RangeInclusive;

use rusqlite::{Connection, params_from_iter};
use time::Date;

use crate::{
    Error,
    revenue::{RecordId, TransactionRecord, dedupe_records},
};

/// Label substituted for the plan column that walk-in rows do not have.
const WALK_IN_PLAN: &str = "Walk-in";

/// Gets the payment records from both source tables as one deduplicated
/// snapshot, optionally limited to an inclusive date range.
///
/// The `status` field carries each row's payment status. Rows with a NULL
/// amount normalize to zero and rows with a NULL creation date get
/// `date: None`; neither is an error.
///
/// # Errors
/// Returns [Error::SqlError] if query preparation, execution or row mapping
/// fails.
pub(crate) fn revenue_snapshot(
    date_range: Option<RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<TransactionRecord>, Error> {
    let mut records = membership_rows(date_range.as_ref(), connection)?;
    records.extend(walk_in_rows(date_range.as_ref(), connection)?);

    Ok(dedupe_records(records))
}

/// Gets the membership records with the `status` field carrying the
/// membership status (e.g. "Active") instead of the payment status.
///
/// # Errors
/// Returns [Error::SqlError] if query preparation, execution or row mapping
/// fails.
pub(crate) fn member_snapshot(connection: &Connection) -> Result<Vec<TransactionRecord>, Error> {
    let records = connection
        .prepare(
            "SELECT id, full_name, price, created_at, status, gym_plan
            FROM membership ORDER BY id ASC",
        )?
        .query_map([], map_membership_row)?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    Ok(dedupe_records(records))
}

/// Computes a cheap fingerprint of the payment tables.
///
/// Used by the dashboard's change polling: when the fingerprint matches the
/// client's last-seen value, nothing is re-rendered. Row counts alone would
/// miss a delete-then-insert of the same size, so the max row ids are
/// folded in as well.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(crate) fn data_version(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row(
            "SELECT (SELECT COUNT(*) FROM membership)
                  + (SELECT COUNT(*) FROM walk_in)
                  + (SELECT COALESCE(MAX(id), 0) * 31 FROM membership)
                  + (SELECT COALESCE(MAX(record_id), 0) * 37 FROM walk_in)",
            [],
            |row| row.get::<_, i64>(0),
        )
        .map(|fingerprint| fingerprint as u64)
        .map_err(|error| error.into())
}

fn membership_rows(
    date_range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<TransactionRecord>, Error> {
    let base_query = "SELECT id, full_name, price, created_at, paymentstatus, gym_plan
        FROM membership";

    let (query, params) = match date_range {
        Some(range) => (
            format!("{base_query} WHERE created_at BETWEEN ?1 AND ?2"),
            vec![range.start().to_string(), range.end().to_string()],
        ),
        None => (base_query.to_owned(), vec![]),
    };

    connection
        .prepare(&format!("{query} ORDER BY id ASC"))?
        .query_map(params_from_iter(params), map_membership_row)?
        .collect::<Result<Vec<_>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

fn map_membership_row(row: &rusqlite::Row) -> Result<TransactionRecord, rusqlite::Error> {
    Ok(TransactionRecord {
        id: RecordId::Membership(row.get(0)?),
        name: row.get(1)?,
        amount: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
        date: row.get(3)?,
        status: row.get(4)?,
        plan: row.get(5)?,
    })
}

fn walk_in_rows(
    date_range: Option<&RangeInclusive<Date>>,
    connection: &Connection,
) -> Result<Vec<TransactionRecord>, Error> {
    let base_query = "SELECT record_id, customer_name, walkinpayment, createdat, paymentstatus
        FROM walk_in";

    let (query, params) = match date_range {
        Some(range) => (
            format!("{base_query} WHERE createdat BETWEEN ?1 AND ?2"),
            vec![range.start().to_string(), range.end().to_string()],
        ),
        None => (base_query.to_owned(), vec![]),
    };

    connection
        .prepare(&format!("{query} ORDER BY record_id ASC"))?
        .query_map(params_from_iter(params), |row| {
            Ok(TransactionRecord {
                id: RecordId::WalkIn(row.get(0)?),
                name: row.get(1)?,
                amount: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                date: row.get(3)?,
                status: row.get(4)?,
                plan: WALK_IN_PLAN.to_owned(),
            })
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{db::initialize, revenue::RecordId};

    use super::{data_version, member_snapshot, revenue_snapshot};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert_membership(
        conn: &Connection,
        name: &str,
        price: Option<f64>,
        created_at: Option<&str>,
    ) {
        conn.execute(
            "INSERT INTO membership
                (full_name, gym_plan, price, paymentstatus, status, created_at)
                VALUES (?1, 'VIP', ?2, 'Paid', 'Active', ?3)",
            (name, price, created_at),
        )
        .unwrap();
    }

    fn insert_walk_in(conn: &Connection, name: &str, payment: f64, created_at: &str) {
        conn.execute(
            "INSERT INTO walk_in (customer_name, walkinpayment, createdat, paymentstatus)
                VALUES (?1, ?2, ?3, 'Paid')",
            (name, payment, created_at),
        )
        .unwrap();
    }

    #[test]
    fn snapshot_combines_both_tables() {
        let conn = get_test_connection();
        insert_membership(&conn, "Juan Dela Cruz", Some(1500.0), Some("2025-06-02"));
        insert_walk_in(&conn, "Maria Santos", 150.0, "2025-06-03");

        let records = revenue_snapshot(None, &conn).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, RecordId::Membership(1));
        assert_eq!(records[0].plan, "VIP");
        assert_eq!(records[1].id, RecordId::WalkIn(1));
        assert_eq!(records[1].plan, "Walk-in");
    }

    #[test]
    fn snapshot_normalizes_missing_amount_and_date() {
        let conn = get_test_connection();
        insert_membership(&conn, "Juan Dela Cruz", None, None);

        let records = revenue_snapshot(None, &conn).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 0.0);
        assert_eq!(records[0].date, None);
    }

    #[test]
    fn snapshot_maps_the_differently_named_columns() {
        let conn = get_test_connection();
        insert_walk_in(&conn, "Maria Santos", 150.0, "2025-06-03");

        let records = revenue_snapshot(None, &conn).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Maria Santos");
        assert_eq!(records[0].amount, 150.0);
        assert_eq!(records[0].date, Some(date!(2025 - 06 - 03)));
        assert_eq!(records[0].status, "Paid");
    }

    #[test]
    fn snapshot_respects_the_date_range() {
        let conn = get_test_connection();
        insert_membership(&conn, "In range", Some(100.0), Some("2025-06-02"));
        insert_membership(&conn, "Too early", Some(100.0), Some("2025-05-01"));
        insert_walk_in(&conn, "Also in range", 50.0, "2025-06-10");
        insert_walk_in(&conn, "Too late", 50.0, "2025-07-01");

        let range = date!(2025 - 06 - 01)..=date!(2025 - 06 - 30);
        let records = revenue_snapshot(Some(range), &conn).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|record| record.name.contains("in range")
            || record.name.contains("In range")));
    }

    #[test]
    fn member_snapshot_uses_the_membership_status_column() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO membership
                (full_name, gym_plan, price, paymentstatus, status, created_at)
                VALUES ('Juan Dela Cruz', 'VIP', 1500.0, 'Pending', 'Active', '2025-06-02')",
            (),
        )
        .unwrap();

        let records = member_snapshot(&conn).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "Active");
    }

    #[test]
    fn data_version_changes_on_insert() {
        let conn = get_test_connection();
        let before = data_version(&conn).unwrap();

        insert_walk_in(&conn, "Maria Santos", 150.0, "2025-06-03");
        let after = data_version(&conn).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn data_version_is_stable_without_writes() {
        let conn = get_test_connection();
        insert_membership(&conn, "Juan Dela Cruz", Some(1500.0), Some("2025-06-02"));

        assert_eq!(data_version(&conn).unwrap(), data_version(&conn).unwrap());
    }
}
