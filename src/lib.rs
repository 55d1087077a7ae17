//! chained-map: a single-threaded, string-keyed hash table where setting a
//! key never overwrites; values set for the same key accumulate in order.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small open-addressing table whose probing, merging, deletion
//!   and growth rules are explicit and individually testable.
//! - Layers:
//!   - `hash_str`: djb2 over UTF-16 code units with wrapping 32-bit
//!     arithmetic, so slot positions are reproducible across platforms.
//!   - `Chain<V>`: append-only `Vec` of values; editable in place, never
//!     shortened or reordered.
//!   - `Value<V>`: `Single(V)` for a key set once, `Chain` once it has
//!     been set again.
//!   - `ChainedMap<V>`: slot array with linear probing, tombstones and a
//!     load-factor-triggered grower.
//!
//! Slot states
//! - `Empty`: never used since the last resize; ends every probe.
//! - `Live`: holds one key and its `Value`; at most one live slot per key.
//! - `Tombstone`: a deleted key's position. Probes step over it and it is
//!   never reused for another key; only a resize reclaims it.
//!
//! Growth
//! - Before each `set`, if `(len + deleted + 1) / capacity` exceeds
//!   `MAX_LOAD_RATIO` (0.5) the table is rebuilt with
//!   `capacity * SIZE_RATIO` (3) slots. The pending value is counted even
//!   when the key already exists.
//! - A rebuild reinserts live entries with their accumulated values as-is
//!   and drops every tombstone, resetting `deleted` to zero.
//!
//! Probe exhaustion
//! - The load check keeps at least half the slots empty after any `set`,
//!   and `delete` never changes `len + deleted`, so a probe always meets an
//!   empty slot in practice. If it ever visits every slot without stopping,
//!   `get` reports absence, `delete` returns `KeyError::NotFound`, and `set`
//!   grows the table and probes again.
//!
//! Notes and non-goals
//! - Single-threaded; mutation needs `&mut self`.
//! - Keys are `String`; values are any `V`.
//! - No shrinking: deleting keys never lowers capacity.
//! - No persistence.

mod chain;
mod chained_map;
mod chained_map_proptest;
mod error;
mod hash;
mod value;

// Public surface
pub use chain::Chain;
pub use chained_map::{ChainedMap, Iter, DEFAULT_CAPACITY, MAX_LOAD_RATIO, SIZE_RATIO};
pub use error::KeyError;
pub use hash::hash_str;
pub use value::Value;

/// Iterators over chains and values.
pub mod iter {
    pub use crate::chain::{IntoIter as ChainIntoIter, Iter as ChainIter, IterMut as ChainIterMut};
    pub use crate::value::{Iter as ValueIter, IterMut as ValueIterMut};
}
