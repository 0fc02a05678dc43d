//! Card transactions reviewed on the dashboard.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for seeding transactions
//! - The filtered loader used by the dashboard
//! - The single-row update of a transaction's risk level and comment

mod core;
mod query;
mod update;

#[cfg(test)]
pub(crate) mod test_utils;

pub use core::{
    Transaction, TransactionBuilder, create_transaction, create_transaction_table,
    get_transaction,
};
pub use query::get_transactions;
pub use update::{normalize_comment, update_risk_assessment};
