//! ChainedMap: open-addressing table with linear probing, tombstones and
//! cumulative values per key.

use crate::error::KeyError;
use crate::hash::hash_str;
use crate::value::{self, Value};
use core::fmt;
use core::mem;
use tracing::{debug, trace, warn};

/// Capacity used by [`ChainedMap::new`].
pub const DEFAULT_CAPACITY: usize = 8;

/// Highest `(live + tombstoned + pending) / capacity` a `set` may reach
/// before the table grows.
pub const MAX_LOAD_RATIO: f64 = 0.5;

/// Capacity multiplier applied on every resize.
pub const SIZE_RATIO: usize = 3;

#[derive(Clone, Debug)]
struct Entry<V> {
    key: String,
    value: Value<V>,
}

#[derive(Clone, Debug)]
enum Slot<V> {
    Empty,
    Live(Entry<V>),
    // Keeps probe sequences that ran past this position intact.
    Tombstone,
}

impl<V> Slot<V> {
    fn entry(&self) -> Option<&Entry<V>> {
        match self {
            Slot::Live(e) => Some(e),
            _ => None,
        }
    }

    fn entry_mut(&mut self) -> Option<&mut Entry<V>> {
        match self {
            Slot::Live(e) => Some(e),
            _ => None,
        }
    }

    /// Replace a live slot with a tombstone, handing back its entry.
    /// Other states are left untouched.
    fn bury(&mut self) -> Option<Entry<V>> {
        match mem::replace(self, Slot::Tombstone) {
            Slot::Live(e) => Some(e),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// Where a probe for a key stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Probe {
    /// First never-used slot on the key's probe path; the key is absent.
    Vacant(usize),
    /// Slot currently holding the key.
    Live(usize),
}

/// Hash table keyed by strings where every `set` accumulates.
///
/// The first value set for a key is stored as [`Value::Single`]; the second
/// turns it into a [`Value::Chain`] holding both, and later values append
/// to that chain. Deleting a key leaves a tombstone in its slot that only a
/// resize reclaims.
#[derive(Clone)]
pub struct ChainedMap<V> {
    slots: Vec<Slot<V>>,
    len: usize,
    deleted: usize,
}

impl<V> ChainedMap<V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a table with `capacity` slots. A capacity of zero is raised
    /// to one so every key has a home index.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity.max(1)),
            len: 0,
            deleted: 0,
        }
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of tombstones waiting for the next resize.
    pub fn deleted_count(&self) -> usize {
        self.deleted
    }

    /// Fraction of slots that are live or tombstoned.
    pub fn load_ratio(&self) -> f64 {
        (self.len + self.deleted) as f64 / self.capacity() as f64
    }

    /// Probe from the key's home index for at most `capacity` steps.
    ///
    /// Stops at the first empty slot or the live slot holding `key`;
    /// tombstones are stepped over. `None` means every slot was visited
    /// without a stop, which `set`'s load check keeps out of reach.
    fn find_slot(&self, key: &str) -> Option<Probe> {
        let capacity = self.capacity();
        let start = hash_str(key) as usize % capacity;
        let probe = (0..capacity)
            .map(|step| (start + step) % capacity)
            .find_map(|i| match &self.slots[i] {
                Slot::Empty => Some(Probe::Vacant(i)),
                Slot::Live(e) if e.key == key => Some(Probe::Live(i)),
                _ => None,
            });
        if probe.is_none() {
            warn!(
                key,
                capacity,
                len = self.len,
                deleted = self.deleted,
                "Probe exhausted without finding a free or matching slot."
            );
        }
        probe
    }

    /// Look up everything set for `key`. `None` when the key is absent.
    pub fn get(&self, key: &str) -> Option<&Value<V>> {
        match self.find_slot(key)? {
            Probe::Live(i) => self.slots[i].entry().map(|e| &e.value),
            Probe::Vacant(_) => None,
        }
    }

    /// Mutable access to the values stored under `key`, oldest first.
    ///
    /// Only the values are exposed; whether the key holds a single value
    /// or a chain is decided by how many times it was set.
    pub fn values_mut(&mut self, key: &str) -> Option<value::IterMut<'_, V>> {
        match self.find_slot(key)? {
            Probe::Live(i) => self.slots[i].entry_mut().map(|e| e.value.iter_mut()),
            Probe::Vacant(_) => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.find_slot(key), Some(Probe::Live(_)))
    }

    /// Add `value` under `key`, keeping whatever was set before.
    ///
    /// The load check counts the incoming value even when the key is
    /// already present, so repeated sets of one key can still grow the
    /// table. Growth happens before probing.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let pending = (self.len + self.deleted + 1) as f64 / self.capacity() as f64;
        if pending > MAX_LOAD_RATIO {
            self.resize(self.capacity() * SIZE_RATIO);
        }

        let probe = loop {
            if let Some(p) = self.find_slot(&key) {
                break p;
            }
            self.resize(self.capacity() * SIZE_RATIO);
        };

        match probe {
            Probe::Vacant(i) => {
                self.slots[i] = Slot::Live(Entry {
                    key,
                    value: Value::Single(value),
                });
                self.len += 1;
            }
            Probe::Live(i) => {
                if let Some(e) = self.slots[i].entry_mut() {
                    if e.value.push(value) {
                        trace!(key = %e.key, "Promoted value to chain.");
                    }
                }
            }
        }
    }

    /// Remove `key` and return everything accumulated under it.
    ///
    /// The slot becomes a tombstone and keeps counting toward the load
    /// ratio until the next resize.
    pub fn delete(&mut self, key: &str) -> Result<Value<V>, KeyError> {
        let Some(Probe::Live(i)) = self.find_slot(key) else {
            return Err(KeyError::not_found(key));
        };
        let entry = self.slots[i]
            .bury()
            .ok_or_else(|| KeyError::not_found(key))?;
        self.len -= 1;
        self.deleted += 1;
        trace!(key, index = i, deleted = self.deleted, "Tombstoned slot.");
        Ok(entry.value)
    }

    /// Rebuild the table with `capacity` slots. Live entries are placed
    /// again with their accumulated values; tombstones are dropped.
    fn resize(&mut self, capacity: usize) {
        let old_capacity = self.capacity();
        let dropped = self.deleted;
        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        self.len = 0;
        self.deleted = 0;
        for slot in old {
            if let Slot::Live(entry) = slot {
                self.place(entry);
            }
        }
        debug!(
            old_capacity,
            capacity = self.capacity(),
            live = self.len,
            dropped_tombstones = dropped,
            "Resized table."
        );
    }

    /// Put an entry into the table being rebuilt.
    ///
    /// A rebuilt table has no tombstones and unique keys, so the probe
    /// normally stops at a free slot. A matching live key has its values
    /// merged, and a full probe grows the table again before retrying.
    fn place(&mut self, entry: Entry<V>) {
        loop {
            match self.find_slot(&entry.key) {
                Some(Probe::Vacant(i)) => {
                    self.slots[i] = Slot::Live(entry);
                    self.len += 1;
                    return;
                }
                Some(Probe::Live(i)) => {
                    warn!(key = %entry.key, "Duplicate key while rebuilding; merging values.");
                    if let Some(e) = self.slots[i].entry_mut() {
                        e.value.absorb(entry.value);
                    }
                    return;
                }
                None => self.resize(self.capacity() * SIZE_RATIO),
            }
        }
    }

    /// Live entries in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }
}

#[cfg(test)]
impl<V> ChainedMap<V> {
    /// Structural checks shared by unit and property tests: counters match
    /// slot tags, live keys are unique, and each is found by probing at
    /// the slot it occupies.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        let mut live = 0;
        let mut tombstones = 0;
        let mut seen = std::collections::HashSet::new();
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => {}
                Slot::Tombstone => tombstones += 1,
                Slot::Live(e) => {
                    live += 1;
                    if !seen.insert(e.key.as_str()) {
                        return Err(format!("duplicate live key {:?}", e.key));
                    }
                    if self.find_slot(&e.key) != Some(Probe::Live(i)) {
                        return Err(format!("key {:?} at {} unreachable by probing", e.key, i));
                    }
                }
            }
        }
        if live != self.len {
            return Err(format!("len {} but {} live slots", self.len, live));
        }
        if tombstones != self.deleted {
            return Err(format!(
                "deleted {} but {} tombstones",
                self.deleted, tombstones
            ));
        }
        Ok(())
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entries<'a, V>(&'a ChainedMap<V>);
        impl<V: fmt::Debug> fmt::Debug for Entries<'_, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map().entries(self.0.iter()).finish()
            }
        }

        f.debug_struct("ChainedMap")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("deleted", &self.deleted)
            .field("entries", &Entries(self))
            .finish()
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for ChainedMap<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ChainedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = ChainedMap::new();
        m.extend(iter);
        m
    }
}

/// Iterator over live `(key, value)` pairs of a `ChainedMap`.
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a Value<V>);
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some((e.key.as_str(), &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a ChainedMap<V> {
    type Item = (&'a str, &'a Value<V>);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
