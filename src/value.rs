//! Value: what a live key holds, either its lone first value or the chain
//! of everything set for it.

use crate::chain::{self, Chain};
use core::mem;

/// Accumulated values for one key.
///
/// A key set once holds `Single`; the second `set` promotes it to a
/// `Chain` seeded with the first value, and later sets append to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value<V> {
    Single(V),
    Chain(Chain<V>),
}

impl<V> Value<V> {
    /// Number of values accumulated under the key.
    pub fn len(&self) -> usize {
        match self {
            Value::Single(_) => 1,
            Value::Chain(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_single(&self) -> Option<&V> {
        match self {
            Value::Single(v) => Some(v),
            Value::Chain(_) => None,
        }
    }

    pub fn as_chain(&self) -> Option<&Chain<V>> {
        match self {
            Value::Single(_) => None,
            Value::Chain(c) => Some(c),
        }
    }

    /// The first value ever set for the key.
    pub fn first(&self) -> Option<&V> {
        match self {
            Value::Single(v) => Some(v),
            Value::Chain(c) => c.front(),
        }
    }

    /// All values in the order they were set.
    pub fn iter(&self) -> Iter<'_, V> {
        match self {
            Value::Single(v) => Iter::Single(Some(v)),
            Value::Chain(c) => Iter::Chain(c.iter()),
        }
    }

    /// All values in the order they were set, mutably. The variant cannot
    /// be changed through this.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        match self {
            Value::Single(v) => IterMut::Single(Some(v)),
            Value::Chain(c) => IterMut::Chain(c.iter_mut()),
        }
    }

    /// Accumulate `value`. Returns true when this promoted a single value
    /// into a chain.
    pub(crate) fn push(&mut self, value: V) -> bool {
        match self {
            Value::Chain(c) => {
                c.push_back(value);
                false
            }
            Value::Single(_) => {
                if let Value::Single(first) = mem::replace(self, Value::Chain(Chain::new())) {
                    *self = Value::Chain([first, value].into_iter().collect());
                }
                true
            }
        }
    }

    /// Accumulate every value of `other` after the ones already held.
    pub(crate) fn absorb(&mut self, other: Value<V>) {
        match other {
            Value::Single(v) => {
                self.push(v);
            }
            Value::Chain(c) => {
                for v in c {
                    self.push(v);
                }
            }
        }
    }
}

impl<V> From<V> for Value<V> {
    fn from(v: V) -> Self {
        Value::Single(v)
    }
}

/// Iterator over a `Value`'s contents in insertion order.
pub enum Iter<'a, V> {
    Single(Option<&'a V>),
    Chain(chain::Iter<'a, V>),
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Single(v) => v.take(),
            Iter::Chain(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Single(v) => {
                let n = usize::from(v.is_some());
                (n, Some(n))
            }
            Iter::Chain(it) => it.size_hint(),
        }
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Mutable iterator over a `Value`'s contents in insertion order.
pub enum IterMut<'a, V> {
    Single(Option<&'a mut V>),
    Chain(chain::IterMut<'a, V>),
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            IterMut::Single(v) => v.take(),
            IterMut::Chain(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            IterMut::Single(v) => {
                let n = usize::from(v.is_some());
                (n, Some(n))
            }
            IterMut::Chain(it) => it.size_hint(),
        }
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<'a, V> IntoIterator for &'a Value<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
