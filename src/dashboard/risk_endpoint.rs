//! The endpoint for labelling a transaction with a risk level and comment.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    cache::TransactionCache,
    dashboard::handlers::{DashboardQuery, load_transactions},
    database_id::TransactionId,
    endpoints,
    risk::{RiskChoice, RiskFilter},
    transaction::{normalize_comment, update_risk_assessment},
};

/// The state needed to update the risk level of a transaction.
#[derive(Debug, Clone)]
pub struct RiskUpdateState {
    /// The database connection for updating transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The loaded transactions, invalidated after every update.
    pub transaction_cache: Arc<TransactionCache>,
}

impl FromRef<AppState> for RiskUpdateState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            transaction_cache: state.transaction_cache.clone(),
        }
    }
}

/// The fields submitted by the risk update form.
///
/// `risk_level` and `filter` are parsed by the handler so invalid values are
/// reported as alerts.
#[derive(Debug, Deserialize)]
pub struct RiskUpdateForm {
    transaction_id: TransactionId,
    risk_level: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    filter: String,
}

/// Set the risk level and comment of one of the transactions shown for the
/// submitted filter, then redirect back to the dashboard.
///
/// An empty choice or blank comment is stored as `NULL`.
pub async fn update_risk_endpoint(
    State(state): State<RiskUpdateState>,
    Form(form): Form<RiskUpdateForm>,
) -> Response {
    let risk_choice = match form.risk_level.parse::<RiskChoice>() {
        Ok(choice) => choice,
        Err(error) => {
            tracing::warn!("Rejected risk update for transaction {}: {error}", form.transaction_id);
            return error.into_alert_response();
        }
    };

    let filter = match form.filter.parse::<RiskFilter>() {
        Ok(filter) => filter,
        Err(error) => {
            tracing::warn!("Rejected risk update for transaction {}: {error}", form.transaction_id);
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let transactions =
        match load_transactions(filter, &state.transaction_cache, &connection) {
            Ok(transactions) => transactions,
            Err(error) => return error.into_alert_response(),
        };

    if !transactions
        .iter()
        .any(|transaction| transaction.id == form.transaction_id)
    {
        tracing::warn!(
            "Transaction {} is not in the view for filter \"{filter}\"",
            form.transaction_id,
        );
        return Error::TransactionNotInView(form.transaction_id).into_alert_response();
    }

    let comment = normalize_comment(&form.comment);

    match update_risk_assessment(
        form.transaction_id,
        risk_choice.risk_level(),
        comment,
        &connection,
    ) {
        Ok(0) => {
            tracing::error!(
                "Could not update transaction {}: update returned zero rows affected",
                form.transaction_id
            );
            return Error::UpdateMissingTransaction.into_alert_response();
        }
        Ok(_) => {}
        Err(error) => {
            tracing::error!("Could not update transaction {}: {error}", form.transaction_id);
            return error.into_alert_response();
        }
    }

    state.transaction_cache.invalidate();
    drop(connection);

    tracing::info!(
        "Set risk level of transaction {} to {:?}",
        form.transaction_id,
        risk_choice.risk_level()
    );

    let redirect_url = dashboard_redirect_url(filter, form.transaction_id);

    (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
}

fn dashboard_redirect_url(filter: RiskFilter, transaction_id: TransactionId) -> String {
    let query = DashboardQuery {
        risk: filter,
        updated: Some(transaction_id),
    };

    match serde_urlencoded::to_string(&query) {
        Ok(query_string) => format!("{}?{query_string}", endpoints::DASHBOARD_VIEW),
        Err(error) => {
            tracing::error!("Could not encode dashboard query {query:?}: {error}");
            endpoints::DASHBOARD_VIEW.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{
        extract::State,
        http::{HeaderValue, StatusCode},
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;

    use crate::{
        cache::TransactionCache,
        initialize_db,
        risk::{RiskFilter, RiskLevel},
        test_utils::{parse_html_fragment, text_of},
        transaction::{get_transaction, get_transactions, test_utils::insert_fixture},
    };

    use super::{RiskUpdateForm, RiskUpdateState, dashboard_redirect_url, update_risk_endpoint};

    fn must_create_test_state() -> RiskUpdateState {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize_db(&connection).expect("could not initialize test DB");
        insert_fixture(&connection);

        RiskUpdateState {
            db_connection: Arc::new(Mutex::new(connection)),
            transaction_cache: Arc::new(TransactionCache::new(Duration::from_secs(600))),
        }
    }

    fn form(transaction_id: i64, risk_level: &str, comment: &str, filter: RiskFilter) -> RiskUpdateForm {
        RiskUpdateForm {
            transaction_id,
            risk_level: risk_level.to_owned(),
            comment: comment.to_owned(),
            filter: filter.as_query_value().to_owned(),
        }
    }

    #[tokio::test]
    async fn can_update_risk_level_and_comment() {
        let state = must_create_test_state();

        let response = update_risk_endpoint(
            State(state.clone()),
            Form(form(5, "low", "flagged", RiskFilter::All)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_static("/dashboard?risk=all&updated=5"))
        );
        let got = get_transaction(5, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(got.risk_level, Some(RiskLevel::Low));
        assert_eq!(got.comment.as_deref(), Some("flagged"));
    }

    #[tokio::test]
    async fn empty_choice_and_blank_comment_store_null() {
        let state = must_create_test_state();

        let response = update_risk_endpoint(
            State(state.clone()),
            Form(form(1, "empty", "   ", RiskFilter::High)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let connection = state.db_connection.lock().unwrap();
        let (risk_level, comment): (Option<String>, Option<String>) = connection
            .query_row(
                "SELECT risk_level, comment FROM card_transaction WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(risk_level, None);
        assert_eq!(comment, None);
    }

    #[tokio::test]
    async fn update_invalidates_cached_transactions() {
        let state = must_create_test_state();
        let cached = state
            .transaction_cache
            .get_or_load(RiskFilter::High, |filter| {
                get_transactions(filter, &state.db_connection.lock().unwrap())
            })
            .unwrap();
        assert!(!cached.iter().any(|transaction| transaction.id == 5));

        update_risk_endpoint(
            State(state.clone()),
            Form(form(5, "high", "test", RiskFilter::All)),
        )
        .await;

        let reloaded = state
            .transaction_cache
            .get_or_load(RiskFilter::High, |filter| {
                get_transactions(filter, &state.db_connection.lock().unwrap())
            })
            .unwrap();
        let updated = reloaded
            .iter()
            .find(|transaction| transaction.id == 5)
            .expect("updated transaction should be in the high risk view");
        assert_eq!(updated.comment.as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn rejects_transaction_outside_current_view() {
        let state = must_create_test_state();

        // Transaction 4 has no risk level, so it is not shown for the high filter.
        let response = update_risk_endpoint(
            State(state.clone()),
            Form(form(4, "medium", "", RiskFilter::High)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let got = get_transaction(4, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(got.risk_level, None);
    }

    #[tokio::test]
    async fn rejects_unknown_transaction() {
        let state = must_create_test_state();

        let response = update_risk_endpoint(
            State(state),
            Form(form(999, "low", "", RiskFilter::All)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_invalid_risk_level() {
        let state = must_create_test_state();

        let response = update_risk_endpoint(
            State(state.clone()),
            Form(form(5, "critical", "", RiskFilter::All)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let text = text_of(&html);
        assert!(text.contains("\"critical\" is not a valid risk level"), "{text}");
        let got = get_transaction(5, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(got.risk_level, None);
    }

    #[tokio::test]
    async fn rejects_invalid_filter_with_alert() {
        let state = must_create_test_state();
        let mut submitted = form(5, "low", "", RiskFilter::All);
        submitted.filter = "urgent".to_owned();

        let response = update_risk_endpoint(State(state.clone()), Form(submitted)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let text = text_of(&html);
        assert!(text.contains("\"urgent\" is not a valid risk filter"), "{text}");
        let got = get_transaction(5, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(got.risk_level, None);
    }

    #[tokio::test]
    async fn missing_transaction_is_reported_as_not_found() {
        let state = must_create_test_state();
        state
            .transaction_cache
            .get_or_load(RiskFilter::All, |filter| {
                get_transactions(filter, &state.db_connection.lock().unwrap())
            })
            .unwrap();
        // Deleted after the view was loaded, so it passes the view check.
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DELETE FROM card_transaction WHERE id = 5", [])
            .unwrap();

        let response = update_risk_endpoint(
            State(state.clone()),
            Form(form(5, "low", "flagged", RiskFilter::All)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_fragment(response).await;
        let text = text_of(&html);
        assert!(text.contains("The transaction could not be found."), "{text}");
    }

    #[tokio::test]
    async fn write_failure_shows_store_error_and_keeps_cache() {
        let state = must_create_test_state();
        let cached = state
            .transaction_cache
            .get_or_load(RiskFilter::All, |filter| {
                get_transactions(filter, &state.db_connection.lock().unwrap())
            })
            .unwrap();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_updates BEFORE UPDATE ON card_transaction
                BEGIN
                    SELECT RAISE(ABORT, 'store rejected');
                END;",
            )
            .unwrap();

        let response = update_risk_endpoint(
            State(state.clone()),
            Form(form(5, "high", "test", RiskFilter::All)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_fragment(response).await;
        let text = text_of(&html);
        assert!(text.contains("store rejected"), "{text}");
        let still_cached = state
            .transaction_cache
            .get_or_load(RiskFilter::All, |_| panic!("cache should not have been invalidated"))
            .unwrap();
        assert!(Arc::ptr_eq(&cached, &still_cached));
        let got = get_transaction(5, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(got.risk_level, None);
    }

    #[test]
    fn redirect_url_keeps_filter() {
        assert_eq!(
            dashboard_redirect_url(RiskFilter::Empty, 7),
            "/dashboard?risk=empty&updated=7"
        );
    }

    #[test]
    fn form_defaults_missing_comment_and_filter() {
        let form: RiskUpdateForm =
            serde_html_form::from_str("transaction_id=3&risk_level=high").unwrap();

        assert_eq!(form.transaction_id, 3);
        assert_eq!(form.risk_level, "high");
        assert_eq!(form.comment, "");
        assert_eq!(form.filter, "");
    }
}
