//! Implements a struct that holds the state of the REST server.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::Connection;

use crate::{Error, cache::TransactionCache, db::initialize, theme::Theme};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The transactions loaded for each risk filter, shared by every request.
    pub transaction_cache: Arc<TransactionCache>,

    /// The colour scheme for the dashboard.
    pub theme: Theme,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the transaction table
    /// if it does not exist. Loaded transactions are reused for `cache_ttl`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, cache_ttl: Duration, theme: Theme) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            transaction_cache: Arc::new(TransactionCache::new(cache_ttl)),
            theme,
        })
    }
}
