//! The pure revenue aggregation core.
//!
//! Every screen follows the same shape: fetch a snapshot of payment records,
//! reduce it in memory, hand the result to a chart or table. This module is
//! the reduce step. It has no database or HTTP dependency and every function
//! is a pure function of its input snapshot.

mod aggregation;
mod record;
mod search;

pub use aggregation::{
    PlanBreakdown, classify_plans, count_with_status, sum_by_month, sum_by_weekday, sum_by_year,
    total_amount,
};
pub use record::{RecordId, TransactionRecord, dedupe_records};
pub use search::{StatusFilter, filter_by_search};
