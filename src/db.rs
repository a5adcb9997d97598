//! Creates the application's database tables.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, user::create_user_table};

/// Create the application's tables if they do not already exist.
///
/// The membership and walk-in tables mirror the column names used by the
/// gym's upstream booking system, inconsistencies included (`id` vs
/// `record_id`, `price` vs `walkinpayment`, `created_at` vs `createdat`).
/// The queries in [crate::store] normalize them into one record shape.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_membership_table(&transaction)?;
    create_walk_in_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

fn create_membership_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS membership (
                id INTEGER PRIMARY KEY,
                full_name TEXT NOT NULL,
                gym_plan TEXT NOT NULL,
                price REAL,
                paymentstatus TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT
                )",
        (),
    )?;

    Ok(())
}

fn create_walk_in_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS walk_in (
                record_id INTEGER PRIMARY KEY,
                customer_name TEXT NOT NULL,
                walkinpayment REAL,
                createdat TEXT,
                paymentstatus TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        conn.execute(
            "INSERT INTO membership
                (full_name, gym_plan, price, paymentstatus, status, created_at)
                VALUES ('Juan Dela Cruz', 'VIP', 1500.0, 'Paid', 'Active', '2025-06-02')",
            (),
        )
        .unwrap();
        conn.execute(
            "INSERT INTO walk_in (customer_name, walkinpayment, createdat, paymentstatus)
                VALUES ('Maria Santos', 150.0, '2025-06-02', 'Paid')",
            (),
        )
        .unwrap();
        conn.execute("INSERT INTO user (email, password) VALUES ('a@b.c', 'hash')", ())
            .unwrap();
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        initialize(&conn).unwrap();
    }
}
