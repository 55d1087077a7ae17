//! Chain: append-only, insertion-ordered values accumulated under one key.

use core::fmt;

/// Borrowing iterator over a `Chain`, oldest value first.
pub type Iter<'a, V> = core::slice::Iter<'a, V>;
/// Mutable iterator over a `Chain`, oldest value first.
pub type IterMut<'a, V> = core::slice::IterMut<'a, V>;
/// Owning iterator over a `Chain`, oldest value first.
pub type IntoIter<V> = std::vec::IntoIter<V>;

/// Ordered sequence of values that a key accumulates once it has been set
/// more than once.
///
/// Values can be appended and edited in place but never removed or
/// reordered.
#[derive(Clone, PartialEq, Eq)]
pub struct Chain<V> {
    values: Vec<V>,
}

impl<V> Chain<V> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append `value` after every value already in the chain.
    pub fn push_back(&mut self, value: V) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Oldest value in the chain.
    pub fn front(&self) -> Option<&V> {
        self.values.first()
    }

    /// Most recently appended value.
    pub fn back(&self) -> Option<&V> {
        self.values.last()
    }

    /// Values in insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        self.values.iter_mut()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.values
    }
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V> FromIterator<V> for Chain<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<V> Extend<V> for Chain<V> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;
    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;

    /// Invariant: iteration order equals append order.
    #[test]
    fn preserves_insertion_order() {
        let mut c = Chain::new();
        for v in ["Bilbo", "Frodo", "Sam", "Merry"] {
            c.push_back(v);
        }
        assert_eq!(c.as_slice(), &["Bilbo", "Frodo", "Sam", "Merry"]);
        assert_eq!(c.len(), 4);
        assert_eq!(c.front(), Some(&"Bilbo"));
        assert_eq!(c.back(), Some(&"Merry"));
    }

    /// Invariant: an empty chain has no ends and yields nothing.
    #[test]
    fn empty_chain() {
        let c: Chain<i32> = Chain::default();
        assert!(c.is_empty());
        assert_eq!(c.front(), None);
        assert_eq!(c.back(), None);
        assert_eq!(c.iter().next(), None);
        assert_eq!(c.into_iter().next(), None);
    }

    /// Invariant: equality compares element sequences.
    #[test]
    fn equality_by_elements() {
        let a: Chain<i32> = (1..=3).collect();
        let mut b = Chain::new();
        b.push_back(1);
        b.extend([2, 3]);
        assert_eq!(a, b);

        let c: Chain<i32> = [1, 3, 2].into_iter().collect();
        assert_ne!(a, c);
        let d: Chain<i32> = (1..=2).collect();
        assert_ne!(a, d);
    }

    /// Invariant: in-place edits keep length and order.
    #[test]
    fn iter_mut_edits_in_place() {
        let mut c: Chain<i32> = (1..=3).collect();
        for v in c.iter_mut() {
            *v *= 10;
        }
        assert_eq!(c.as_slice(), &[10, 20, 30]);
    }

    /// Invariant: owning iteration hands values back oldest first.
    #[test]
    fn owning_iteration() {
        let c: Chain<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        assert_eq!(c.iter().len(), 3);
        let owned: Vec<String> = c.into_iter().collect();
        assert_eq!(owned, vec!["x", "y", "z"]);
    }

    /// Invariant: Debug renders like a list in insertion order.
    #[test]
    fn debug_as_list() {
        let c: Chain<&str> = ["The Necromancer", "Sauron"].into_iter().collect();
        assert_eq!(format!("{:?}", c), r#"["The Necromancer", "Sauron"]"#);
    }
}
