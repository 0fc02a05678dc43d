use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::Value;
use time::macros::datetime;

use fraud_desk::{
    AppState, RiskLevel, Theme, Transaction, build_router, create_transaction, get_transaction,
};

fn must_create_seeded_state() -> AppState {
    let state = AppState::new(
        Connection::open_in_memory().expect("could not create in-memory SQLite database"),
        Duration::from_secs(600),
        Theme::Classic,
    )
    .expect("could not create app state");

    let connection = state.db_connection.lock().unwrap();
    let risk_levels = [
        Some(RiskLevel::High),
        Some(RiskLevel::Low),
        Some(RiskLevel::Medium),
        None,
        None,
        Some(RiskLevel::High),
        None,
        Some(RiskLevel::Low),
        Some(RiskLevel::Medium),
        None,
    ];

    // Insert in reverse so the loader has to sort by ID.
    for (index, risk_level) in risk_levels.into_iter().enumerate().rev() {
        let id = index as i64 + 1;
        create_transaction(
            Transaction::build(id, datetime!(2024-05-01 00:00) + time::Duration::hours(id * 5), id as f64 * 10.0)
                .card_type(if id % 2 == 0 { "VISA" } else { "AMEX" })
                .city(if id % 3 == 0 { "Quito" } else { "Cuenca" })
                .risk_level(risk_level),
            &connection,
        )
        .expect("could not create test transaction");
    }
    drop(connection);

    state
}

fn must_create_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state))
}

async fn get_ids(server: &TestServer, risk: &str) -> Vec<i64> {
    let json: Value = server
        .get("/api/transactions")
        .add_query_param("risk", risk)
        .await
        .json();

    json["transactions"]
        .as_array()
        .expect("transactions should be an array")
        .iter()
        .map(|transaction| transaction["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn update_moves_transaction_between_filters() {
    let state = must_create_seeded_state();
    let server = must_create_server(state.clone());

    assert_eq!(get_ids(&server, "all").await, (1..=10).collect::<Vec<_>>());
    assert_eq!(get_ids(&server, "empty").await, vec![4, 5, 7, 10]);
    assert_eq!(get_ids(&server, "low").await, vec![2, 8]);

    let response = server
        .post("/api/transactions/risk")
        .form(&[
            ("transaction_id", "5"),
            ("risk_level", "low"),
            ("comment", "flagged"),
            ("filter", "all"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("hx-redirect"),
        "/dashboard?risk=all&updated=5"
    );
    assert_eq!(get_ids(&server, "low").await, vec![2, 5, 8]);
    assert_eq!(get_ids(&server, "empty").await, vec![4, 7, 10]);

    let json: Value = server
        .get("/api/transactions")
        .add_query_param("risk", "low")
        .await
        .json();
    let updated = json["transactions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|transaction| transaction["id"] == 5)
        .expect("transaction 5 should be in the low risk view");
    assert_eq!(updated["comment"], "flagged");

    let stored = get_transaction(5, &state.db_connection.lock().unwrap()).unwrap();
    assert_eq!(stored.risk_level, Some(RiskLevel::Low));
    assert_eq!(stored.comment.as_deref(), Some("flagged"));
}

#[tokio::test]
async fn cached_view_shows_update_on_next_load() {
    let server = must_create_server(must_create_seeded_state());
    assert_eq!(get_ids(&server, "high").await, vec![1, 6]);

    server
        .post("/api/transactions/risk")
        .form(&[
            ("transaction_id", "5"),
            ("risk_level", "high"),
            ("comment", "test"),
            ("filter", "all"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    assert_eq!(get_ids(&server, "high").await, vec![1, 5, 6]);
}

#[tokio::test]
async fn empty_choice_and_comment_persist_as_null() {
    let state = must_create_seeded_state();
    let server = must_create_server(state.clone());

    server
        .post("/api/transactions/risk")
        .form(&[
            ("transaction_id", "1"),
            ("risk_level", "empty"),
            ("comment", ""),
            ("filter", "high"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let (risk_level, comment): (Option<String>, Option<String>) = state
        .db_connection
        .lock()
        .unwrap()
        .query_row(
            "SELECT risk_level, comment FROM card_transaction WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(risk_level, None);
    assert_eq!(comment, None);
    assert_eq!(get_ids(&server, "empty").await, vec![1, 4, 5, 7, 10]);
}

#[tokio::test]
async fn dashboard_page_renders_filtered_rows() {
    let server = must_create_server(must_create_seeded_state());

    let response = server
        .get("/dashboard")
        .add_query_param("risk", "medium")
        .await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("data-transaction-id=\"3\""), "{text}");
    assert!(text.contains("data-transaction-id=\"9\""), "{text}");
    assert!(!text.contains("data-transaction-id=\"1\""), "{text}");
}

#[tokio::test]
async fn root_redirects_to_dashboard() {
    let server = must_create_server(must_create_seeded_state());

    let response = server.get("/").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard");
}
