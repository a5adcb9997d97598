//! Analytics module
//!
//! Provides the analytics page with a revenue bar chart over a selectable
//! range (last 6 months, last 12 months, or by year) and the membership
//! distribution pie chart.

mod charts;
mod handlers;

pub use handlers::{get_analytics_charts, get_analytics_page};
