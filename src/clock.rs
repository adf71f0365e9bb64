//! Time sources used to stamp and check deadlines.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A monotonic source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Reads [`Instant::now`]. The default clock of every map.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to the map:
///
/// ```
/// use std::time::Duration;
/// use ttl_map::{ManualClock, Ttl, TtlMap, TtlMapError};
///
/// let clock = ManualClock::new();
/// let map: TtlMap<&str, i32, _> = TtlMap::with_clock(clock.clone());
///
/// map.insert("session", 7, Ttl::After(Duration::from_secs(30))).unwrap();
/// clock.advance(Duration::from_secs(30));
/// assert_eq!(map.get(&"session"), Ok(7));
///
/// clock.advance(Duration::from_nanos(1));
/// assert_eq!(map.get(&"session"), Err(TtlMapError::ItemIsExpired));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Starts at the current system instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves time forward. Ignores an advance that would overflow.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        if let Some(next) = now.checked_add(by) {
            *now = next;
        }
    }

    /// Jumps to an arbitrary instant, backwards included.
    pub fn set(&self, to: Instant) {
        *self.now.lock() = to;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
