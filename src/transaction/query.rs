//! Loads the transactions shown on the dashboard.

use rusqlite::{Connection, params_from_iter};

use crate::{
    Error,
    risk::{RiskFilter, RiskLevel},
};

use super::core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row};

/// Get the transactions that pass `filter`, sorted by ID in ascending order.
///
/// [RiskFilter::All] returns every transaction and [RiskFilter::Empty]
/// returns the transactions without a risk level.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - a stored risk level is not a known label
pub fn get_transactions(filter: RiskFilter, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let (where_clause, params) = filter_clause(filter);
    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM card_transaction {where_clause} ORDER BY id ASC"
    );

    let mut stmt = connection.prepare(&query)?;
    stmt.query_map(params_from_iter(params), map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// The WHERE clause and its bound parameters for `filter`.
fn filter_clause(filter: RiskFilter) -> (&'static str, Vec<RiskLevel>) {
    match filter {
        RiskFilter::All => ("", vec![]),
        RiskFilter::Empty => ("WHERE risk_level IS NULL", vec![]),
        RiskFilter::High => ("WHERE risk_level = ?1", vec![RiskLevel::High]),
        RiskFilter::Medium => ("WHERE risk_level = ?1", vec![RiskLevel::Medium]),
        RiskFilter::Low => ("WHERE risk_level = ?1", vec![RiskLevel::Low]),
    }
}
