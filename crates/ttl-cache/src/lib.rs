//! In-memory key/value cache with TTL expiration
//!
//! Entries are stamped with the time they were stored and are only served
//! while younger than the configured TTL. Expiry is evaluated lazily: an
//! entry found to be expired during a read is removed on the spot. Time is
//! read through a [`Clock`] so expiry can be driven deterministically.

mod cache;
mod clock;
mod types;

pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use types::{CacheEntry, CacheStats};
