//! A JSON view of the dashboard for scripts and other tools.

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    Error,
    dashboard::{
        aggregation::{DashboardSummary, summarize},
        handlers::{DashboardQuery, DashboardState, load_transactions},
    },
    risk::RiskFilter,
    transaction::Transaction,
};

#[derive(Debug, Serialize)]
struct TransactionsResponse<'a> {
    filter: RiskFilter,
    transactions: &'a [Transaction],
    summary: DashboardSummary,
}

/// Get the transactions for the risk filter and their summary as JSON.
pub async fn get_transactions_json(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        load_transactions(query.risk, &state.transaction_cache, &connection)?
    };

    let body = serde_json::to_string(&TransactionsResponse {
        filter: query.risk,
        transactions: &transactions,
        summary: summarize(&transactions),
    })
    .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
