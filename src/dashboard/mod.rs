//! Dashboard module
//!
//! Provides the overview page showing revenue and membership summaries and
//! the weekly revenue trend chart, plus the polling endpoint that refreshes
//! the summary when the underlying data changes.

mod cards;
pub(crate) mod charts;
mod handlers;

pub use handlers::{get_dashboard_page, get_dashboard_summary};
