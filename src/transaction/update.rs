//! Updates the fraud-risk label and comment of a single transaction.

use rusqlite::{Connection, params};

use crate::{Error, database_id::TransactionId, risk::RiskLevel};

/// The number of rows changed by an update.
pub type RowsAffected = usize;

/// Set the risk level and comment of the transaction with `id`.
///
/// `None` for either value is stored as `NULL`. The update is committed
/// immediately. A transaction that does not exist results in zero rows
/// affected rather than an error.
///
/// # Errors
/// Returns [Error::SqlError] if the update fails.
pub fn update_risk_assessment(
    id: TransactionId,
    risk_level: Option<RiskLevel>,
    comment: Option<&str>,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE card_transaction \
            SET \
                risk_level = ?1, \
                comment = ?2 \
            WHERE id = ?3;",
            params![risk_level, comment, id],
        )
        .map_err(Error::from)
}

/// Trim `comment`, treating a blank comment as no comment.
pub fn normalize_comment(comment: &str) -> Option<&str> {
    let comment = comment.trim();

    if comment.is_empty() {
        None
    } else {
        Some(comment)
    }
}
