//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::{get_dashboard_page, get_transactions_json, update_risk_endpoint},
    endpoints,
    error_page::{get_404_not_found, get_internal_server_error_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_API, get(get_transactions_json))
        .route(endpoints::RISK_UPDATE_API, post(update_risk_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use std::time::Duration;

    use axum::{http::StatusCode, response::IntoResponse};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, build_router, endpoints, routing::get_index_page, theme::Theme};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            Duration::from_secs(600),
            Theme::Classic,
        )
        .unwrap();
        let server = TestServer::new(build_router(state));

        let response = server.get("/does-not-exist").await;

        response.assert_status_not_found();
        assert!(response.text().contains("Back to Dashboard"));
    }
}
