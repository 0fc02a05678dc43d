//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state and query types used by the dashboard handlers

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::Alert,
    cache::TransactionCache,
    dashboard::{
        aggregation::summarize,
        charts::{DashboardChart, build_dashboard_charts, charts_script, charts_view},
        forms::{risk_filter_form, risk_update_form},
        tables::transactions_table,
    },
    database_id::TransactionId,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    risk::RiskFilter,
    theme::Theme,
    transaction::{Transaction, get_transactions},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for loading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The transactions loaded for each risk filter.
    pub transaction_cache: Arc<TransactionCache>,
    /// The colour scheme for the page and charts.
    pub theme: Theme,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            transaction_cache: state.transaction_cache.clone(),
            theme: state.theme,
        }
    }
}

/// The query parameters for the dashboard page.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// Which transactions to show.
    #[serde(default)]
    pub risk: RiskFilter,
    /// The transaction that was just updated, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<TransactionId>,
}

/// Load the transactions for `filter` through `cache`.
///
/// The caller must hold the database lock for as long as it relies on the
/// result being consistent with the cache.
pub(super) fn load_transactions(
    filter: RiskFilter,
    cache: &TransactionCache,
    connection: &Connection,
) -> Result<Arc<[Transaction]>, Error> {
    cache
        .get_or_load(filter, |filter| get_transactions(filter, connection))
        .inspect_err(|error| {
            tracing::error!("Could not load transactions for filter \"{filter}\": {error}")
        })
}

/// Display the transactions matching the risk filter with their charts and
/// the form for labelling a transaction.
pub async fn get_dashboard_page(
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

    let alert = query.updated.map(|transaction_id| {
        Alert::success(
            "Transaction updated",
            &format!("Saved the risk level and comment for transaction {transaction_id}."),
        )
    });

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(query.risk, alert, state.theme).into_response());
    }

    let summary = summarize(&transactions);
    let charts = build_dashboard_charts(&summary, state.theme);

    Ok(dashboard_view(
        &transactions,
        &charts,
        query.risk,
        query.updated,
        alert,
        state.theme,
    )
    .into_response())
}

fn theme_head_elements(theme: Theme) -> Vec<HeadElement> {
    theme.stylesheet().into_iter().collect()
}

/// Renders the dashboard page when no transactions match the filter.
fn dashboard_no_data_view(filter: RiskFilter, alert: Option<Alert>, theme: Theme) -> Markup {
    let content = html!(
        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold mb-6" { "Fraud Risk Dashboard" }

            @if let Some(alert) = alert {
                (alert.into_html())
            }

            (risk_filter_form(filter))

            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "No transactions match the \"" (filter.label()) "\" risk filter.
                Pick another filter to keep reviewing transactions."
            }
        }
    );

    base("Dashboard", &theme_head_elements(theme), &content)
}

/// Renders the main dashboard page with the filter, charts, table and update form.
fn dashboard_view(
    transactions: &[Transaction],
    charts: &[DashboardChart],
    filter: RiskFilter,
    updated: Option<TransactionId>,
    alert: Option<Alert>,
    theme: Theme,
) -> Markup {
    let content = html!(
        div id="dashboard-content" class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold mb-6" { "Fraud Risk Dashboard" }

            @if let Some(alert) = alert {
                (alert.into_html())
            }

            (risk_filter_form(filter))

            p class="w-full mb-4 text-sm text-gray-600 dark:text-gray-400"
            {
                "Showing " (transactions.len()) " transactions."
            }

            (charts_view(charts))
            (transactions_table(transactions, updated))
            (risk_update_form(transactions, filter))
        }
    );

    let mut head_elements = vec![
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];
    head_elements.extend(theme_head_elements(theme));

    base("Dashboard", &head_elements, &content)
}
