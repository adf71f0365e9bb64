use std::time::{Duration, Instant};

use crate::error::{Result, TtlMapError};
use crate::ttl::{Deadline, Ttl};

/// A stored value together with its expiration deadline.
#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    pub(crate) value: V,
    pub(crate) deadline: Deadline,
}

impl<V> Entry<V> {
    /// Creates an entry written at `now` that lives for `ttl`.
    pub(crate) fn new(value: V, ttl: Ttl, now: Instant) -> Self {
        Self {
            value,
            deadline: ttl.deadline_from(now),
        }
    }

    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        self.deadline.is_expired_at(now)
    }

    /// Hands out the value if the entry is still live at `now`.
    pub(crate) fn live_at(&self, now: Instant) -> Result<&V> {
        if self.is_expired_at(now) {
            return Err(TtlMapError::ItemIsExpired);
        }
        Ok(&self.value)
    }

    /// Remaining lifetime at `now`; `None` when the entry never expires.
    pub(crate) fn remaining_at(&self, now: Instant) -> Option<Duration> {
        match self.deadline {
            Deadline::Never => None,
            Deadline::At(at) => Some(at.saturating_duration_since(now)),
            Deadline::Passed => Some(Duration::ZERO),
        }
    }
}
