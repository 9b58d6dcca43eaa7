//! In-memory response cache
//!
//! Stores raw response bodies keyed by request URL. A background task sweeps
//! entries once they are older than the cache interval, so repeated requests
//! within a session are served without touching the network.

mod ttl;

pub use ttl::{Cache, CacheError};
