//! The normalized payment record shared by every screen.
//!
//! The gym's tables name their columns inconsistently (`id` vs `record_id`,
//! `price` vs `walkinpayment`, `created_at` vs `createdat`). The queries in
//! [crate::store] map each row shape into [TransactionRecord] at the
//! boundary so the aggregation code only ever sees one schema.

use std::collections::HashMap;

use time::Date;

/// Identifies a payment record by its source table and row id.
///
/// Membership payments and walk-in payments live in separate tables with
/// independent id sequences, so a bare integer would collide across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// A row from the `membership` table.
    Membership(i64),
    /// A row from the `walk_in` table.
    WalkIn(i64),
}

/// One payment record, normalized from either source table.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// The deduplication key.
    pub id: RecordId,
    /// Display name of the member or walk-in customer.
    pub name: String,
    /// The amount paid. Rows with a NULL amount normalize to zero.
    pub amount: f64,
    /// The local calendar date the payment was recorded. `None` excludes
    /// the record from time-bucketed sums but not from counts.
    pub date: Option<Date>,
    /// Payment or membership status label, compared case-insensitively.
    pub status: String,
    /// Plan label such as "VIP", "Non-VIP" or "Walk-in".
    pub plan: String,
}

/// Removes records that share a [RecordId], keeping the last-seen instance
/// at the first-seen position.
///
/// Queries that join or union the source tables can return the same row
/// more than once, and each id must contribute to sums and counts exactly
/// once.
pub fn dedupe_records(records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    let mut position_by_id: HashMap<RecordId, usize> = HashMap::with_capacity(records.len());
    let mut deduped: Vec<TransactionRecord> = Vec::with_capacity(records.len());

    for record in records {
        match position_by_id.get(&record.id) {
            Some(&position) => deduped[position] = record,
            None => {
                position_by_id.insert(record.id, deduped.len());
                deduped.push(record);
            }
        }
    }

    deduped
}
