use std::time::{Duration, Instant};

/// Sentinel time-to-live for entries that never expire.
///
/// Distinct from a zero ttl, which expires right after insertion.
pub const NEVER: Ttl = Ttl::Never;

/// How long an entry stays valid after it is written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ttl {
    /// The entry never expires.
    #[default]
    Never,
    /// The entry expires once the given duration has passed.
    After(Duration),
    /// The deadline lies the given duration in the past, so the entry is
    /// written already expired. This is the negative ttl.
    Elapsed(Duration),
}

impl Ttl {
    /// Builds a ttl from signed seconds; negative values become [`Ttl::Elapsed`].
    pub fn from_secs_signed(secs: i64) -> Self {
        let magnitude = Duration::from_secs(secs.unsigned_abs());
        if secs < 0 {
            Ttl::Elapsed(magnitude)
        } else {
            Ttl::After(magnitude)
        }
    }

    /// Computes the deadline of an entry written at `now`.
    pub(crate) fn deadline_from(self, now: Instant) -> Deadline {
        match self {
            Ttl::Never => Deadline::Never,
            Ttl::After(ttl) => match now.checked_add(ttl) {
                Some(at) => Deadline::At(at),
                // Past the end of Instant's range; nothing will ever reach it.
                None => Deadline::Never,
            },
            Ttl::Elapsed(ttl) => match now.checked_sub(ttl) {
                Some(at) => Deadline::At(at),
                None => Deadline::Passed,
            },
        }
    }
}

impl From<Duration> for Ttl {
    fn from(ttl: Duration) -> Self {
        Ttl::After(ttl)
    }
}

impl From<Option<Duration>> for Ttl {
    fn from(ttl: Option<Duration>) -> Self {
        ttl.map_or(Ttl::Never, Ttl::After)
    }
}

/// Absolute expiration point of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deadline {
    Never,
    At(Instant),
    /// Earlier than any representable instant.
    Passed,
}

impl Deadline {
    /// An entry is expired strictly after its deadline; the deadline itself is live.
    pub(crate) fn is_expired_at(self, now: Instant) -> bool {
        match self {
            Deadline::Never => false,
            Deadline::At(at) => now > at,
            Deadline::Passed => true,
        }
    }

    pub(crate) fn instant(self) -> Option<Instant> {
        match self {
            Deadline::At(at) => Some(at),
            Deadline::Never | Deadline::Passed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_has_no_deadline() {
        let now = Instant::now();
        let deadline = NEVER.deadline_from(now);
        assert_eq!(deadline, Deadline::Never);
        assert!(!deadline.is_expired_at(now + Duration::from_secs(365 * 24 * 3600)));
    }

    #[test]
    fn test_deadline_is_inclusive() {
        let now = Instant::now();
        let deadline = Ttl::After(Duration::from_secs(1)).deadline_from(now);

        assert!(!deadline.is_expired_at(now));
        assert!(!deadline.is_expired_at(now + Duration::from_secs(1)));
        assert!(deadline.is_expired_at(now + Duration::from_secs(1) + Duration::from_nanos(1)));
    }

    #[test]
    fn test_zero_ttl_expires_on_next_instant() {
        let now = Instant::now();
        let deadline = Ttl::After(Duration::ZERO).deadline_from(now);

        assert!(!deadline.is_expired_at(now));
        assert!(deadline.is_expired_at(now + Duration::from_nanos(1)));
    }

    #[test]
    fn test_elapsed_ttl_is_born_expired() {
        let now = Instant::now() + Duration::from_secs(10);
        let deadline = Ttl::Elapsed(Duration::from_secs(1)).deadline_from(now);

        assert_eq!(deadline.instant(), Some(now - Duration::from_secs(1)));
        assert!(deadline.is_expired_at(now));
    }

    #[test]
    fn test_passed_deadline_is_always_expired() {
        assert!(Deadline::Passed.is_expired_at(Instant::now()));
        assert_eq!(Deadline::Passed.instant(), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Ttl::from(Duration::from_millis(5)), Ttl::After(Duration::from_millis(5)));
        assert_eq!(Ttl::from(None::<Duration>), Ttl::Never);
        assert_eq!(Ttl::from(Some(Duration::from_secs(2))), Ttl::After(Duration::from_secs(2)));
        assert_eq!(Ttl::default(), NEVER);
    }

    #[test]
    fn test_from_secs_signed() {
        assert_eq!(Ttl::from_secs_signed(-1), Ttl::Elapsed(Duration::from_secs(1)));
        assert_eq!(Ttl::from_secs_signed(0), Ttl::After(Duration::ZERO));
        assert_eq!(Ttl::from_secs_signed(30), Ttl::After(Duration::from_secs(30)));
        assert_eq!(
            Ttl::from_secs_signed(i64::MIN),
            Ttl::Elapsed(Duration::from_secs(i64::MIN.unsigned_abs()))
        );
    }
}
