//! The application's endpoint URIs.

/// The root route which redirects to the dashboard or log in page.
pub const ROOT: &str = "/";
/// The landing page for the logged in owner.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page listing payment records with filter and search controls.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page with the revenue and membership charts.
pub const ANALYTICS_VIEW: &str = "/analytics";
/// The page with member counts and plan breakdown.
pub const MEMBERS_VIEW: &str = "/members";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in the owner.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route returning the re-rendered dashboard summary when the data
/// version has changed.
pub const DASHBOARD_SUMMARY: &str = "/api/dashboard/summary";
/// The route returning the filtered transactions table partial.
pub const TRANSACTIONS_TABLE: &str = "/api/transactions/table";
/// The route returning the filtered transactions as a CSV download.
pub const TRANSACTIONS_EXPORT: &str = "/api/transactions/export";
/// The route returning the analytics charts partial for a selected range.
pub const ANALYTICS_CHARTS: &str = "/api/analytics/charts";
