//! Alert system for displaying success and error messages to users.
//!
//! Error alerts are rendered into the page's `#alert-container` by HTMX when
//! a request fails. Success alerts are rendered inline on the page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message with a short summary and longer details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Create a new success alert
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    pub fn into_html(self) -> Markup {
        let (container_style, role, message, details) = match self {
            Alert::Success { message, details } => (
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400",
                "status",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
                "alert",
                message,
                details,
            ),
        };

        html!(
            div class=(container_style) role=(role)
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    " " (details)
                }
            }
        )
    }
}

/// Render `alert` as an HTML fragment with `status_code`.
pub fn render_alert(status_code: StatusCode, alert: Alert) -> Response {
    (status_code, alert.into_html()).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::test_utils::parse_html_fragment;

    use super::{Alert, render_alert};

    #[tokio::test]
    async fn error_alert_has_alert_role() {
        let response = render_alert(
            StatusCode::BAD_REQUEST,
            Alert::error("Could not update transaction", "Try again."),
        );

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let selector = scraper::Selector::parse("div[role='alert']").unwrap();
        let alert = html.select(&selector).next().expect("no alert found");
        let text = alert.text().collect::<String>();
        assert!(text.contains("Could not update transaction"), "{text}");
        assert!(text.contains("Try again."), "{text}");
    }

    #[test]
    fn success_alert_without_details() {
        let markup = Alert::success("Saved", "").into_html().into_string();

        assert!(markup.contains("role=\"status\""), "{markup}");
        assert!(markup.contains("Saved"), "{markup}");
    }
}
