use rusqlite::Connection;
use time::macros::datetime;

use crate::{
    risk::RiskLevel,
    transaction::{Transaction, TransactionBuilder, create_transaction},
};

/// Ten transactions with IDs 1 to 10, inserted out of order by ID.
pub(crate) fn fixture() -> Vec<TransactionBuilder> {
    vec![
        Transaction::build(4, datetime!(2024-05-02 07:30), 15.99)
            .card_type("MASTERCARD")
            .city("Quito"),
        Transaction::build(1, datetime!(2024-05-01 02:15), 950.00)
            .card_type("VISA")
            .city("Guayaquil")
            .risk_level(Some(RiskLevel::High))
            .comment(Some("Card used abroad an hour earlier")),
        Transaction::build(2, datetime!(2024-05-01 09:05), 42.50)
            .card_type("VISA")
            .city("Quito")
            .risk_level(Some(RiskLevel::Low)),
        Transaction::build(3, datetime!(2024-05-01 12:00), 310.00)
            .card_type("AMEX")
            .city("Cuenca")
            .risk_level(Some(RiskLevel::Medium)),
        Transaction::build(5, datetime!(2024-05-02 18:00), 75.25)
            .card_type("VISA")
            .city("Quito"),
        Transaction::build(6, datetime!(2024-05-02 23:59), 1200.00)
            .card_type("MASTERCARD")
            .city("Guayaquil")
            .risk_level(Some(RiskLevel::High)),
        Transaction::build(7, datetime!(2024-05-03 05:59), 8.00)
            .card_type("VISA")
            .city("Cuenca"),
        Transaction::build(8, datetime!(2024-05-03 06:00), 64.10)
            .card_type("AMEX")
            .city("Quito")
            .risk_level(Some(RiskLevel::Low)),
        Transaction::build(9, datetime!(2024-05-03 17:59), 220.00)
            .card_type("VISA")
            .city("Loja")
            .risk_level(Some(RiskLevel::Medium)),
        Transaction::build(10, datetime!(2024-05-04 20:45), 33.33)
            .card_type("MASTERCARD")
            .city("Quito"),
    ]
}

#[track_caller]
pub(crate) fn insert_fixture(connection: &Connection) {
    for builder in fixture() {
        create_transaction(builder, connection).expect("could not create test transaction");
    }
}
