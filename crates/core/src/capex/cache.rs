//! Time-bounded memo of the source snapshot.
//!
//! The cache holds at most one entry. A lookup within the validity window
//! returns it; otherwise the source is fetched while the lock is held, so
//! concurrent callers wait on a single fetch instead of stampeding the store.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::source::{CapexSource, SourceError};
use super::types::SourceTables;

/// Default validity window (5 minutes).
pub const DEFAULT_TTL_SECS: u64 = 300;

/// Time source for cache expiry.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A source snapshot as handed out by the cache.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Shared source tables.
    pub tables: Arc<SourceTables>,
    /// When the tables were fetched.
    pub fetched_at: DateTime<Utc>,
    /// Whether this came from the cache rather than a fresh fetch.
    pub cached: bool,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    tables: Arc<SourceTables>,
    fetched_at: DateTime<Utc>,
}

/// Single-entry snapshot cache.
pub struct SnapshotCache {
    entry: Mutex<Option<CacheEntry>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl SnapshotCache {
    /// Creates a cache on the wall clock.
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        Self::with_clock(ttl_secs, Arc::new(SystemClock))
    }

    /// Creates a cache on the given clock.
    #[must_use]
    pub fn with_clock(ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX);

        Self {
            entry: Mutex::new(None),
            ttl,
            clock,
        }
    }

    /// Returns the cached snapshot, fetching from `source` when it is
    /// missing or expired.
    ///
    /// # Errors
    ///
    /// Returns the source error when a fetch fails. The previous entry, if
    /// any, is kept.
    pub async fn get_or_fetch(&self, source: &dyn CapexSource) -> Result<Snapshot, SourceError> {
        let mut entry = self.entry.lock().await;
        let now = self.clock.now();

        if let Some(current) = entry
            .as_ref()
            .filter(|e| now - e.fetched_at < self.ttl)
        {
            debug!(fetched_at = %current.fetched_at, "Snapshot cache hit");
            return Ok(Snapshot {
                tables: Arc::clone(&current.tables),
                fetched_at: current.fetched_at,
                cached: true,
            });
        }

        let tables = Arc::new(source.fetch_tables().await?);
        info!(
            capex_items = tables.capex_items.len(),
            po_lines = tables.po_lines.len(),
            "Fetched source snapshot"
        );

        *entry = Some(CacheEntry {
            tables: Arc::clone(&tables),
            fetched_at: now,
        });

        Ok(Snapshot {
            tables,
            fetched_at: now,
            cached: false,
        })
    }

    /// Drops the cached entry; the next lookup fetches.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}
