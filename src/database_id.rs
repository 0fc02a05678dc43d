//! Database ID type definition.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The primary key of a card transaction.
///
/// IDs are assigned by the system that records transactions, not by this app.
pub type TransactionId = DatabaseId;
