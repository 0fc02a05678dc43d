//! Fraud Desk is a web app for reviewing card transactions flagged for fraud.
//!
//! An analyst filters transactions by fraud-risk level, sees how the selection
//! breaks down by card type, city, risk level and time of day, and labels a
//! transaction with a new risk level and comment.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod cache;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod error_page;
mod html;
mod logging;
mod risk;
mod routing;
mod theme;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use cache::{DEFAULT_CACHE_TTL, TransactionCache};
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use risk::{RiskChoice, RiskFilter, RiskLevel};
pub use routing::build_router;
pub use theme::Theme;
pub use transaction::{
    Transaction, TransactionBuilder, create_transaction, get_transaction, get_transactions,
};

use crate::{
    alert::{Alert, render_alert},
    error_page::ErrorPage,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    ///
    /// The message of the wrapped error is shown to the analyst as-is.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// The transaction chosen for an update is not one of the rows loaded for
    /// the active filter.
    #[error("transaction {0} is not in the current view")]
    TransactionNotInView(TransactionId),

    /// A transaction with the given ID already exists.
    #[error("a transaction with the ID {0} already exists")]
    DuplicateTransactionId(TransactionId),

    /// A stored or submitted risk level is not one of the known labels.
    #[error("\"{0}\" is not a valid risk level")]
    InvalidRiskLevel(String),

    /// A submitted risk filter is not one of the known filters.
    #[error("\"{0}\" is not a valid risk filter")]
    InvalidRiskFilter(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => ErrorPage::not_found().into_response(),
            Error::SqlError(error) => {
                let fix = error.to_string();

                ErrorPage::internal_server_error("Could not load transactions", &fix).into_response()
            }
            Error::DatabaseLockError => ErrorPage::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::UpdateMissingTransaction => render_alert(
                StatusCode::NOT_FOUND,
                Alert::error(
                    "Could not update transaction",
                    "The transaction could not be found.",
                ),
            ),
            Error::TransactionNotInView(transaction_id) => render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Could not update transaction",
                    &format!(
                        "Transaction {transaction_id} is not in the current view. \
                        Refresh the page and pick one of the listed transactions."
                    ),
                ),
            ),
            Error::InvalidRiskLevel(risk_level) => render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid risk level",
                    &format!("\"{risk_level}\" is not a valid risk level."),
                ),
            ),
            Error::InvalidRiskFilter(filter) => render_alert(
                StatusCode::BAD_REQUEST,
                Alert::error(
                    "Invalid risk filter",
                    &format!("\"{filter}\" is not a valid risk filter."),
                ),
            ),
            Error::SqlError(error) => render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error("Could not update transaction", &error.to_string()),
            ),
            _ => render_alert(
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        }
    }
}
