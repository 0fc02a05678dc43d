//! Defines the core data model and database queries for card transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{Error, database_id::TransactionId, risk::RiskLevel};

// ============================================================================
// MODELS
// ============================================================================

/// A card payment that may be reviewed for fraud.
///
/// Transactions are recorded by an external system. The dashboard only ever
/// changes [Transaction::risk_level] and [Transaction::comment].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the payment was made.
    pub occurred_at: PrimitiveDateTime,
    /// The amount of money paid.
    pub amount: f64,
    /// The kind of card used, e.g. "VISA" or "MASTERCARD".
    pub card_type: String,
    /// The city the payment was made in.
    pub city: String,
    /// The fraud-risk label, `None` if the transaction has not been labelled.
    pub risk_level: Option<RiskLevel>,
    /// A note left by the analyst.
    pub comment: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(id: TransactionId, occurred_at: PrimitiveDateTime, amount: f64) -> TransactionBuilder {
        TransactionBuilder {
            id,
            occurred_at,
            amount,
            card_type: String::new(),
            city: String::new(),
            risk_level: None,
            comment: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Used for seeding databases and tests, since the dashboard itself does not
/// create transactions.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The ID assigned by the system that recorded the transaction.
    pub id: TransactionId,
    /// When the payment was made.
    pub occurred_at: PrimitiveDateTime,
    /// The amount of money paid.
    pub amount: f64,
    /// The kind of card used.
    pub card_type: String,
    /// The city the payment was made in.
    pub city: String,
    /// The initial fraud-risk label.
    pub risk_level: Option<RiskLevel>,
    /// The initial analyst note.
    pub comment: Option<String>,
}

impl TransactionBuilder {
    /// Set the card type for the transaction.
    pub fn card_type(mut self, card_type: &str) -> Self {
        self.card_type = card_type.to_owned();
        self
    }

    /// Set the city for the transaction.
    pub fn city(mut self, city: &str) -> Self {
        self.city = city.to_owned();
        self
    }

    /// Set the risk level for the transaction.
    pub fn risk_level(mut self, risk_level: Option<RiskLevel>) -> Self {
        self.risk_level = risk_level;
        self
    }

    /// Set the comment for the transaction.
    pub fn comment(mut self, comment: Option<&str>) -> Self {
        self.comment = comment.map(ToOwned::to_owned);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns of the transaction table in the order [map_transaction_row] expects.
pub(super) const TRANSACTION_COLUMNS: &str =
    "id, occurred_at, amount, card_type, city, risk_level, comment";

/// Create the transaction table.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS card_transaction (
                id INTEGER PRIMARY KEY,
                occurred_at TEXT NOT NULL,
                amount REAL NOT NULL,
                card_type TEXT NOT NULL,
                city TEXT NOT NULL,
                risk_level TEXT CHECK (risk_level IN ('HIGH', 'MEDIUM', 'LOW')),
                comment TEXT
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_card_transaction_risk_level
        ON card_transaction(risk_level)",
        (),
    )?;

    Ok(())
}

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateTransactionId] if a transaction with the same ID already exists,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "INSERT INTO card_transaction ({TRANSACTION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                builder.id,
                builder.occurred_at,
                builder.amount,
                &builder.card_type,
                &builder.city,
                builder.risk_level,
                &builder.comment,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY,
                },
                _,
            ) => Error::DuplicateTransactionId(builder.id),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a transaction in the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not belong to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM card_transaction WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Map a database row to a [Transaction].
///
/// The row must contain the columns listed in [TRANSACTION_COLUMNS], in order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        occurred_at: row.get(1)?,
        amount: row.get(2)?,
        card_type: row.get(3)?,
        city: row.get(4)?,
        risk_level: row.get(5)?,
        comment: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        risk::RiskLevel,
        transaction::{Transaction, create_transaction, get_transaction},
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn create_and_get_transaction() {
        let conn = get_test_connection();
        let builder = Transaction::build(7, datetime!(2024-03-01 13:45), 120.5)
            .card_type("VISA")
            .city("Quito")
            .risk_level(Some(RiskLevel::Medium))
            .comment(Some("Unusual merchant"));

        let created = create_transaction(builder, &conn).unwrap();
        let got = get_transaction(7, &conn).unwrap();

        assert_eq!(created, got);
        assert_eq!(got.occurred_at, datetime!(2024-03-01 13:45));
        assert_eq!(got.risk_level, Some(RiskLevel::Medium));
        assert_eq!(got.comment.as_deref(), Some("Unusual merchant"));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let conn = get_test_connection();
        let builder = Transaction::build(1, datetime!(2024-03-01 09:00), 10.0)
            .card_type("VISA")
            .city("Quito");
        create_transaction(builder.clone(), &conn).unwrap();

        let result = create_transaction(builder, &conn);

        assert_eq!(result, Err(Error::DuplicateTransactionId(1)));
    }

    #[test]
    fn get_missing_transaction_is_not_found() {
        let conn = get_test_connection();

        assert_eq!(get_transaction(404, &conn), Err(Error::NotFound));
    }

    #[test]
    fn unknown_risk_level_violates_check_constraint() {
        let conn = get_test_connection();

        let result = conn.execute(
            "INSERT INTO card_transaction (id, occurred_at, amount, card_type, city, risk_level)
            VALUES (1, '2024-03-01 09:00:00', 1.0, 'VISA', 'Quito', 'Vacío')",
            (),
        );

        assert!(result.is_err());
    }
}
