//! Time-bounded memoization of loaded transactions, keyed by risk filter.
//!
//! The cache is the only shared mutable state besides the database
//! connection. Callers hold the database lock while loading through the cache
//! and while invalidating it after a write, so a read that started before a
//! write can never be stored after the write's invalidation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use crate::{Error, risk::RiskFilter, transaction::Transaction};

/// How long loaded transactions are reused when no other value is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct CacheEntry {
    loaded_at: Instant,
    transactions: Arc<[Transaction]>,
}

/// Remembers the transactions loaded for each [RiskFilter] for a fixed time.
#[derive(Debug)]
pub struct TransactionCache {
    ttl: Duration,
    entries: Mutex<HashMap<RiskFilter, CacheEntry>>,
}

impl TransactionCache {
    /// Create an empty cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// How long an entry is reused after it was loaded.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the transactions for `filter`, calling `load` only if there is no
    /// entry for `filter` or the entry is older than the TTL.
    ///
    /// # Errors
    /// Returns the error from `load`. Failed loads are not cached.
    pub fn get_or_load<F>(&self, filter: RiskFilter, load: F) -> Result<Arc<[Transaction]>, Error>
    where
        F: FnOnce(RiskFilter) -> Result<Vec<Transaction>, Error>,
    {
        self.get_or_load_at(filter, Instant::now(), load)
    }

    fn get_or_load_at<F>(
        &self,
        filter: RiskFilter,
        now: Instant,
        load: F,
    ) -> Result<Arc<[Transaction]>, Error>
    where
        F: FnOnce(RiskFilter) -> Result<Vec<Transaction>, Error>,
    {
        if let Some(transactions) = self.get_fresh(filter, now) {
            tracing::debug!("Using cached transactions for filter \"{filter}\"");
            return Ok(transactions);
        }

        let transactions: Arc<[Transaction]> = load(filter)?.into();
        tracing::debug!(
            "Loaded {} transactions for filter \"{filter}\"",
            transactions.len()
        );

        self.lock().insert(
            filter,
            CacheEntry {
                loaded_at: now,
                transactions: transactions.clone(),
            },
        );

        Ok(transactions)
    }

    fn get_fresh(&self, filter: RiskFilter, now: Instant) -> Option<Arc<[Transaction]>> {
        self.lock()
            .get(&filter)
            .filter(|entry| now.saturating_duration_since(entry.loaded_at) < self.ttl)
            .map(|entry| entry.transactions.clone())
    }

    /// Drop every entry so the next load for any filter queries the database.
    pub fn invalidate(&self) {
        self.lock().clear();
        tracing::debug!("Invalidated transaction cache");
    }

    // Entries are plain data, so a panic while the lock was held cannot leave them half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<RiskFilter, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TransactionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
