//! Transactions module
//!
//! Provides the page listing every payment record with summary counters, a
//! status filter and name search, plus the htmx partial that re-renders the
//! table when the filter changes.

mod handlers;
mod view;

pub use handlers::{
    TransactionsQuery, TransactionsState, get_transactions_page, get_transactions_table,
};
pub(crate) use handlers::filtered_rows;
