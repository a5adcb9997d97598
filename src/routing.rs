//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    analytics::{get_analytics_charts, get_analytics_page},
    auth::middleware::{auth_guard, auth_guard_hx},
    dashboard::{get_dashboard_page, get_dashboard_summary},
    endpoints,
    export::export_transactions,
    internal_server_error::get_internal_server_error_page,
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    member::get_members_page,
    not_found::get_404_not_found,
    transaction::{get_transactions_page, get_transactions_table},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::ANALYTICS_VIEW, get(get_analytics_page))
        .route(endpoints::MEMBERS_VIEW, get(get_members_page))
        // The export link is a plain navigation, so it belongs with the
        // page routes rather than the htmx partials.
        .route(endpoints::TRANSACTIONS_EXPORT, get(export_transactions))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These partial routes need to use the HX-Redirect header for auth redirects to work properly for htmx requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::DASHBOARD_SUMMARY, get(get_dashboard_summary))
            .route(endpoints::TRANSACTIONS_TABLE, get(get_transactions_table))
            .route(endpoints::ANALYTICS_CHARTS, get(get_analytics_charts))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
