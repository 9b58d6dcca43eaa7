//! TTL cache with a background sweep task
//!
//! Every entry is stamped with the time it was added. A tokio task wakes once
//! per interval and removes entries older than the interval, so an entry lives
//! longer than one interval and less than two (plus scheduler jitter).
//!
//! `get` never looks at an entry's age: data that has outlived the interval is
//! still served until the next sweep removes it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Errors that can occur when constructing a cache
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The sweep interval was zero
    #[error("cache interval must be greater than zero")]
    ZeroInterval,

    /// No tokio runtime was available to run the sweeper
    #[error("cache sweeper requires a running tokio runtime")]
    NoRuntime,
}

/// A single cached value and the time it was stored
#[derive(Debug)]
struct CacheEntry {
    created_at: Instant,
    value: Vec<u8>,
}

type EntryMap = HashMap<String, CacheEntry>;
type Entries = Arc<Mutex<EntryMap>>;

/// Thread-safe map from key to bytes with periodic expiry
///
/// All access goes through one exclusive lock, shared with the sweeper.
/// Dropping the cache stops the sweeper; `shutdown` does the same and waits
/// for the task to finish.
#[derive(Debug)]
pub struct Cache {
    entries: Entries,
    shutdown_tx: Option<oneshot::Sender<()>>,
    sweeper: Option<JoinHandle<()>>,
}

impl Cache {
    /// Creates an empty cache and starts its sweeper on the current runtime.
    ///
    /// # Arguments
    /// * `interval` - Maximum entry age, also the period between sweeps
    ///
    /// # Returns
    /// * `Ok(Cache)` with the sweeper running
    /// * `Err(CacheError::ZeroInterval)` if `interval` is zero
    /// * `Err(CacheError::NoRuntime)` if called outside a tokio runtime
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        if interval.is_zero() {
            return Err(CacheError::ZeroInterval);
        }
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let entries: Entries = Arc::default();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let sweeper = runtime.spawn(sweep_loop(Arc::clone(&entries), interval, shutdown_rx));
        debug!(?interval, "cache sweeper started");

        Ok(Self {
            entries,
            shutdown_tx: Some(shutdown_tx),
            sweeper: Some(sweeper),
        })
    }

    /// Inserts or overwrites the value for `key`, stamped with the current time.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let entry = CacheEntry {
            created_at: Instant::now(),
            value: value.into(),
        };
        lock(&self.entries).insert(key.into(), entry);
    }

    /// Returns a copy of the value stored for `key`, whatever its age.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        lock(&self.entries).get(key).map(|entry| entry.value.clone())
    }

    /// Number of entries currently held, including any awaiting a sweep
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops the sweeper and waits for it to exit.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.sweeper.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "cache sweeper did not exit cleanly");
            }
        }
    }
}

fn lock(entries: &Mutex<EntryMap>) -> MutexGuard<'_, EntryMap> {
    // Entries are independent; a panic mid-insert cannot leave the map inconsistent
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Removes entries older than `interval` as of `now`, returning how many were removed.
fn reap(entries: &Mutex<EntryMap>, interval: Duration, now: Instant) -> usize {
    let mut map = lock(entries);
    let before = map.len();
    map.retain(|_, entry| now.saturating_duration_since(entry.created_at) <= interval);
    before - map.len()
}

/// Sweeps once per interval until a shutdown is signalled or the sender is dropped.
async fn sweep_loop(entries: Entries, interval: Duration, mut shutdown_rx: oneshot::Receiver<()>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Skip the first tick (immediate)
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = reap(&entries, interval, Instant::now());
                if removed > 0 {
                    debug!(removed, "swept expired cache entries");
                }
            }
            _ = &mut shutdown_rx => {
                break;
            }
        }
    }

    debug!("cache sweeper stopped");
}
