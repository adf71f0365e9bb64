use std::collections::HashMap;
use std::collections::hash_map::Entry as Slot;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::entry::Entry;
use crate::error::{Result, TtlMapError};
use crate::ttl::Ttl;

/// A thread-safe map whose entries may expire.
///
/// Expiration is lazy: an expired entry stays in the map, still visible to
/// [`has`](Self::has) and still blocking [`insert`](Self::insert), until it
/// is [`remove`](Self::remove)d or [`update`](Self::update)d. Lookups only
/// report it as [`TtlMapError::ItemIsExpired`].
///
/// The nil key is `None`. Mutating calls reject it with
/// [`TtlMapError::NilKey`]; read-only calls treat it as a key that is never
/// bound, so `has(None)` is `false` and `get(None)` is `ItemNotFound`.
pub struct TtlMap<K, V, C = SystemClock> {
    map: RwLock<HashMap<K, Entry<V>>>,
    clock: C,
}

impl<K, V> TtlMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty map on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates an empty map with room for `capacity` entries before it
    /// reallocates. This is not a size limit.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_clock(capacity, SystemClock)
    }
}

impl<K, V> Default for TtlMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TtlMap<K, V, C>
where
    K: Eq + Hash,
    C: Clock,
{
    /// Creates an empty map that reads time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub fn with_capacity_and_clock(capacity: usize, clock: C) -> Self {
        Self {
            map: RwLock::new(HashMap::with_capacity(capacity)),
            clock,
        }
    }

    /// Binds `key` to `value` for `ttl`.
    ///
    /// Fails with `KeyAlreadyExists` if the key is bound, even when that
    /// binding has expired.
    pub fn insert(&self, key: impl Into<Option<K>>, value: V, ttl: impl Into<Ttl>) -> Result<()> {
        let key = key.into().ok_or_else(|| rejected("insert", TtlMapError::NilKey))?;
        let entry = Entry::new(value, ttl.into(), self.clock.now());

        let inserted = match self.map.write().entry(key) {
            Slot::Occupied(_) => false,
            Slot::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        };
        if !inserted {
            return Err(rejected("insert", TtlMapError::KeyAlreadyExists));
        }
        trace!("inserted entry");
        Ok(())
    }

    /// Replaces the value and the deadline of an existing binding.
    ///
    /// Expired bindings still count as existing.
    pub fn update(&self, key: impl Into<Option<K>>, value: V, ttl: impl Into<Ttl>) -> Result<()> {
        let key = key.into().ok_or_else(|| rejected("update", TtlMapError::NilKey))?;
        let entry = Entry::new(value, ttl.into(), self.clock.now());

        // `replaced` outlives the guard, so the old value drops unlocked.
        let replaced = self
            .map
            .write()
            .get_mut(&key)
            .map(|slot| std::mem::replace(slot, entry));
        if replaced.is_none() {
            return Err(rejected("update", TtlMapError::ItemNotFound));
        }
        trace!("updated entry");
        Ok(())
    }

    /// Reports whether `key` is bound at all, expired or not.
    pub fn has<'k>(&self, key: impl Into<Option<&'k K>>) -> bool
    where
        K: 'k,
    {
        key.into().is_some_and(|key| self.map.read().contains_key(key))
    }

    /// Deletes the binding for `key`. Removing an unbound key is not an error.
    pub fn remove<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<()>
    where
        K: 'k,
    {
        let key = key.into().ok_or_else(|| rejected("remove", TtlMapError::NilKey))?;
        let removed = self.map.write().remove(key);
        if removed.is_some() {
            trace!("removed entry");
        }
        Ok(())
    }

    /// Reads the value bound to `key`.
    ///
    /// Fails with `ItemNotFound` if the key is unbound and with
    /// `ItemIsExpired` once the deadline has passed. Expired entries are left
    /// in place.
    pub fn get<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<V>
    where
        K: 'k,
        V: Clone,
    {
        self.lookup("get", key.into(), |entry, now| entry.live_at(now).cloned())
    }

    /// Reads the value bound to `key` along with its deadline, `None` meaning
    /// it never expires.
    pub fn get_with_expiry<'k>(
        &self,
        key: impl Into<Option<&'k K>>,
    ) -> Result<(V, Option<Instant>)>
    where
        K: 'k,
        V: Clone,
    {
        self.lookup("get_with_expiry", key.into(), |entry, now| {
            let value = entry.live_at(now)?.clone();
            Ok((value, entry.deadline.instant()))
        })
    }

    /// How long `key` has left before it expires; `None` if it never does.
    pub fn time_to_live<'k>(&self, key: impl Into<Option<&'k K>>) -> Result<Option<Duration>>
    where
        K: 'k,
    {
        self.lookup("time_to_live", key.into(), |entry, now| {
            entry.live_at(now)?;
            Ok(entry.remaining_at(now))
        })
    }

    fn lookup<T>(
        &self,
        op: &'static str,
        key: Option<&K>,
        read: impl FnOnce(&Entry<V>, Instant) -> Result<T>,
    ) -> Result<T> {
        let now = self.clock.now();
        let result = match key {
            Some(key) => match self.map.read().get(key) {
                Some(entry) => read(entry, now),
                None => Err(TtlMapError::ItemNotFound),
            },
            None => Err(TtlMapError::ItemNotFound),
        };
        result.map_err(|err| rejected(op, err))
    }
}

fn rejected(op: &'static str, err: TtlMapError) -> TtlMapError {
    debug!(op, error = %err, "operation rejected");
    err
}
