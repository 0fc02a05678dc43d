//! Full-page responses for requests the dashboard cannot serve.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// An error page with the status code as its headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPage<'a> {
    status: StatusCode,
    title: &'a str,
    description: &'a str,
    fix: &'a str,
}

impl<'a> ErrorPage<'a> {
    /// A 500 page explaining what failed and what the analyst can do about it.
    pub fn internal_server_error(description: &'a str, fix: &'a str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            title: "Internal Server Error",
            description,
            fix,
        }
    }

    /// A 404 page for routes and resources that do not exist.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            title: "Not Found",
            description: "Something's missing.",
            fix: "Sorry, we can't find that page. \
                Head back to the dashboard to keep reviewing transactions.",
        }
    }
}

impl Default for ErrorPage<'_> {
    fn default() -> Self {
        Self::internal_server_error(
            "Sorry, something went wrong.",
            "Try again later or check the server logs",
        )
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let page = error_view(self.title, self.status.as_str(), self.description, self.fix);

        (self.status, Html(page.into_string())).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    ErrorPage::default().into_response()
}

pub async fn get_404_not_found() -> Response {
    ErrorPage::not_found().into_response()
}
