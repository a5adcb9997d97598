//! Pure aggregation over payment record snapshots.
//!
//! Provides the sums and counts behind the dashboard cards and charts:
//! revenue bucketed by weekday, month or year, status counts, and the
//! membership plan breakdown. Records without a date are skipped by the
//! time-bucketed sums; records without an amount were already normalized
//! to zero, so no function here can fail on a bad row.

use std::collections::BTreeMap;

use crate::revenue::record::TransactionRecord;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Sums amounts into the seven weekday buckets.
///
/// # Returns
/// Labels and values in fixed Mon..Sun order, regardless of input order.
/// Weekdays with no records sum to zero.
pub fn sum_by_weekday(records: &[TransactionRecord]) -> (Vec<String>, Vec<f64>) {
    let mut sums = [0.0; 7];

    for record in records {
        if let Some(date) = record.date {
            sums[date.weekday().number_days_from_monday() as usize] += record.amount;
        }
    }

    (
        WEEKDAY_LABELS.iter().map(|&label| label.to_owned()).collect(),
        sums.to_vec(),
    )
}

/// Sums amounts into the twelve calendar month buckets.
///
/// # Returns
/// Labels and values in fixed Jan..Dec order. Months with no records sum to
/// zero.
pub fn sum_by_month(records: &[TransactionRecord]) -> (Vec<String>, Vec<f64>) {
    let mut sums = [0.0; 12];

    for record in records {
        if let Some(date) = record.date {
            sums[date.month() as usize - 1] += record.amount;
        }
    }

    (
        MONTH_LABELS.iter().map(|&label| label.to_owned()).collect(),
        sums.to_vec(),
    )
}

/// Sums amounts into one bucket per distinct year observed in the input.
///
/// # Returns
/// Labels are the observed years in ascending order; an empty snapshot
/// yields empty labels and values.
pub fn sum_by_year(records: &[TransactionRecord]) -> (Vec<String>, Vec<f64>) {
    let mut sums: BTreeMap<i32, f64> = BTreeMap::new();

    for record in records {
        if let Some(date) = record.date {
            *sums.entry(date.year()).or_insert(0.0) += record.amount;
        }
    }

    let labels = sums.keys().map(|year| year.to_string()).collect();
    let values = sums.into_values().collect();

    (labels, values)
}

/// Counts records whose status equals `status`, ignoring case.
///
/// Exact equality rather than substring containment: "Paid" matches "paid"
/// but not "unpaid".
pub fn count_with_status(records: &[TransactionRecord], status: &str) -> usize {
    records
        .iter()
        .filter(|record| record.status.trim().eq_ignore_ascii_case(status.trim()))
        .count()
}

/// Membership plan counts for the distribution pie chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanBreakdown {
    /// Records on a VIP plan.
    pub vip: usize,
    /// Records on a Non-VIP plan.
    pub non_vip: usize,
    /// Walk-in records.
    pub walk_in: usize,
}

/// Classifies each record's plan label into [PlanBreakdown] buckets.
///
/// A record lands in at most one bucket; labels matching none of the known
/// plan words are left out entirely.
pub fn classify_plans(records: &[TransactionRecord]) -> PlanBreakdown {
    let mut breakdown = PlanBreakdown::default();

    for record in records {
        let plan = record.plan.trim().to_lowercase();

        // "non-vip" also contains "vip", so the "non" check must come first.
        if plan.contains("non") {
            breakdown.non_vip += 1;
        } else if plan.contains("vip") {
            breakdown.vip += 1;
        } else if plan.contains("walk") {
            breakdown.walk_in += 1;
        }
    }

    breakdown
}

/// Sums every amount in the snapshot.
pub fn total_amount(records: &[TransactionRecord]) -> f64 {
    records.iter().map(|record| record.amount).sum()
}
