//! Persistent (immutable) ordered map based on a red-black tree.
//!
//! This module provides [`PersistentTreeMap`], an immutable ordered map
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! - O(log N) `get`, `insert`, `remove`
//! - O(log N) `first_key_value`/`last_key_value` and `pop_first`/`pop_last`
//! - O(1) `len`, `is_empty` and `clone`
//! - O(N) `fold`, `map`, `mapi` and in-order iteration
//!
//! Every update returns a new map. Only the nodes on the path to the changed
//! key are rebuilt; the rest of the tree is shared with the original.
//!
//! Keys are ordered by an injected [`Compare`] implementation, which defaults
//! to [`Natural`] (the key type's own `Ord`).
//!
//! # Examples
//!
//! ```rust
//! use persistent_rbtree::persistent::PersistentTreeMap;
//!
//! let map = PersistentTreeMap::new()
//!     .insert(3, "three")
//!     .insert(1, "one")
//!     .insert(2, "two");
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // The original survives every update
//! let smaller = map.remove(&2);
//! assert_eq!(map.len(), 3);
//! assert_eq!(smaller.len(), 2);
//! ```

use compare::{Compare, Natural, natural};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};

use super::InvariantViolation;
use super::rbtree::{self, Link};

// =============================================================================
// PersistentTreeMap Definition
// =============================================================================

/// A persistent (immutable) ordered map based on a red-black tree.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `get`          | O(log N)   |
/// | `insert`       | O(log N)   |
/// | `remove`       | O(log N)   |
/// | `contains_key` | O(log N)   |
/// | `first_key_value`/`last_key_value` | O(log N) |
/// | `len`          | O(1)       |
/// | `clone`        | O(1)       |
///
/// # Examples
///
/// ```rust
/// use persistent_rbtree::persistent::PersistentTreeMap;
///
/// let map = PersistentTreeMap::singleton(42, "answer");
/// assert_eq!(map.get(&42), Some(&"answer"));
///
/// // A custom comparator orders keys from largest to smallest
/// let descending = PersistentTreeMap::with_comparator(|left: &i32, right: &i32| right.cmp(left))
///     .insert(1, "one")
///     .insert(3, "three")
///     .insert(2, "two");
/// let keys: Vec<&i32> = descending.keys().collect();
/// assert_eq!(keys, vec![&3, &2, &1]);
/// ```
pub struct PersistentTreeMap<K, V, C = Natural<K>> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
    comparator: C,
}

impl<K: Ord, V> PersistentTreeMap<K, V> {
    /// Creates a new empty map ordered by the keys' natural order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map: PersistentTreeMap<i32, String> = PersistentTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }

    /// Creates a map containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::singleton(42, "answer");
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&42), Some(&"answer"));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self::new().insert(key, value)
    }
}

impl<K, V, C> PersistentTreeMap<K, V, C> {
    /// Creates a new empty map ordered by `comparator`.
    ///
    /// The comparator must be a strict total order over the keys that will be
    /// inserted. A comparator that violates this never causes a panic, but
    /// lookups may then miss bindings that are present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use compare::{Compare, natural};
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::with_comparator(natural::<i32>().rev())
    ///     .insert(1, 'a')
    ///     .insert(2, 'b');
    /// assert_eq!(map.first_key_value(), Some((&2, &'b')));
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            length: 0,
            comparator,
        }
    }

    /// Returns the comparator that orders this map's keys.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new()
    ///     .insert(1, "one")
    ///     .insert(2, "two");
    /// assert_eq!(map.len(), 2);
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let empty: PersistentTreeMap<i32, String> = PersistentTreeMap::new();
    /// assert!(empty.is_empty());
    ///
    /// let non_empty = empty.insert(1, "one".to_string());
    /// assert!(!non_empty.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of nodes on the longest path from the root.
    ///
    /// Never exceeds `2 * log2(len + 1)`.
    #[must_use]
    pub fn height(&self) -> usize {
        rbtree::height(&self.root)
    }

    /// Returns a reference to the value bound to `key`.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new().insert(1, "one");
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        rbtree::find(&self.root, &self.comparator, key).map(|node| &node.value)
    }

    /// Returns the stored key and its value for `key`.
    ///
    /// Useful with comparators that treat distinct keys as equal, where the
    /// stored key may differ from the probe.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        rbtree::find(&self.root, &self.comparator, key).map(|node| (&node.key, &node.value))
    }

    /// Returns `true` if the map contains a value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new().insert(1, "one");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new()
    ///     .insert(3, "three")
    ///     .insert(1, "one");
    /// assert_eq!(map.first_key_value(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        rbtree::first(&self.root).map(|node| (&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        rbtree::last(&self.root).map(|node| (&node.key, &node.value))
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// The iterator is lazy and double-ended: it walks the tree with an
    /// explicit stack instead of collecting the entries up front.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new()
    ///     .insert(3, "three")
    ///     .insert(1, "one")
    ///     .insert(2, "two");
    ///
    /// let entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"one"), (&2, &"two"), (&3, &"three")]);
    /// assert_eq!(map.iter().next_back(), Some((&3, &"three")));
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentTreeMapIterator<'_, K, V> {
        PersistentTreeMapIterator {
            inner: rbtree::Iter::new(&self.root, self.length),
        }
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new()
    ///     .insert(1, 10)
    ///     .insert(2, 20)
    ///     .insert(3, 30);
    ///
    /// let sum: i32 = map.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }

    /// Folds every entry into an accumulator, visiting keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map: PersistentTreeMap<i32, i32> =
    ///     [(5, 0), (3, 0), (8, 0), (1, 0)].into_iter().collect();
    /// let keys = map.fold(Vec::new(), |mut keys, key, _| {
    ///     keys.push(*key);
    ///     keys
    /// });
    /// assert_eq!(keys, vec![1, 3, 5, 8]);
    /// ```
    pub fn fold<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(B, &K, &V) -> B,
    {
        self.iter()
            .fold(init, |accumulator, (key, value)| function(accumulator, key, value))
    }

    /// Calls `function` on every entry in ascending key order.
    pub fn for_each<F>(&self, mut function: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self {
            function(key, value);
        }
    }

    /// Returns `true` if `predicate` holds for at least one entry.
    ///
    /// Stops at the first entry that satisfies the predicate.
    pub fn exists<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter().any(|(key, value)| predicate(key, value))
    }

    /// Returns `true` if `predicate` holds for every entry.
    ///
    /// An empty map satisfies every predicate.
    pub fn for_all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter().all(|(key, value)| predicate(key, value))
    }

    /// Applies a function to all values, keeping keys unchanged.
    ///
    /// The resulting map has exactly the same shape and node colors as this
    /// one; no keys are compared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new()
    ///     .insert(1, 10)
    ///     .insert(2, 20);
    ///
    /// let doubled = map.map(|value| value * 2);
    /// assert_eq!(doubled.get(&1), Some(&20));
    /// assert_eq!(doubled.get(&2), Some(&40));
    /// ```
    #[must_use]
    pub fn map<W, F>(&self, mut transform: F) -> PersistentTreeMap<K, W, C>
    where
        K: Clone,
        C: Clone,
        F: FnMut(&V) -> W,
    {
        self.mapi(|_, value| transform(value))
    }

    /// Like [`map`](Self::map), but the function also receives the key.
    ///
    /// Values are produced in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new()
    ///     .insert(1, "a")
    ///     .insert(2, "b");
    ///
    /// let labelled = map.mapi(|key, value| format!("{key}{value}"));
    /// assert_eq!(labelled.get(&2), Some(&"2b".to_string()));
    /// ```
    #[must_use]
    pub fn mapi<W, F>(&self, mut transform: F) -> PersistentTreeMap<K, W, C>
    where
        K: Clone,
        C: Clone,
        F: FnMut(&K, &V) -> W,
    {
        PersistentTreeMap {
            root: rbtree::map_values(&self.root, &mut transform),
            length: self.length,
            comparator: self.comparator.clone(),
        }
    }

    /// Compares two maps entry by entry in ascending key order.
    ///
    /// Keys are compared with this map's comparator and values with
    /// `compare_values`. The first difference decides; if one map runs out
    /// first it is the smaller. The result depends only on the bindings, not
    /// on how either tree happens to be shaped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    /// use std::cmp::Ordering;
    ///
    /// let small = PersistentTreeMap::new().insert(1, 1).insert(2, 2);
    /// let large = PersistentTreeMap::new().insert(1, 1).insert(2, 3);
    /// assert_eq!(small.compare_by(&large, |left, right| left.cmp(right)), Ordering::Less);
    /// assert_eq!(small.compare_by(&large, |_, _| Ordering::Equal), Ordering::Equal);
    /// ```
    pub fn compare_by<F>(&self, other: &Self, mut compare_values: F) -> Ordering
    where
        C: Compare<K>,
        F: FnMut(&V, &V) -> Ordering,
    {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some((left_key, left_value)), Some((right_key, right_value))) => {
                    let ordering = self
                        .comparator
                        .compare(left_key, right_key)
                        .then_with(|| compare_values(left_value, right_value));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
            }
        }
    }

    /// Returns `true` if both maps hold the same keys bound to values that
    /// `equal_values` accepts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let left = PersistentTreeMap::new().insert(1, "one").insert(2, "two");
    /// let right = PersistentTreeMap::new().insert(2, "TWO").insert(1, "ONE");
    /// assert!(left.equal_by(&right, |a, b| a.eq_ignore_ascii_case(b)));
    /// assert!(!left.equal_by(&right, |a, b| a == b));
    /// ```
    pub fn equal_by<F>(&self, other: &Self, mut equal_values: F) -> bool
    where
        C: Compare<K>,
        F: FnMut(&V, &V) -> bool,
    {
        self.length == other.length
            && self.iter().zip(other.iter()).all(
                |((left_key, left_value), (right_key, right_value))| {
                    self.comparator.compares_eq(left_key, right_key)
                        && equal_values(left_value, right_value)
                },
            )
    }

    /// Checks the tree against the red-black and ordering invariants.
    ///
    /// Returns the black-height of the root on success. Every map built
    /// through this API with a lawful comparator validates.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<usize, InvariantViolation>
    where
        C: Compare<K>,
    {
        let black_height = rbtree::validate(&self.root, &self.comparator)?;
        let actual = rbtree::count(&self.root);
        if actual != self.length {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.length,
                actual,
            });
        }
        Ok(black_height)
    }
}

impl<K, V, C> PersistentTreeMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Compare<K> + Clone,
{
    fn with_root(&self, root: Link<K, V>, length: usize) -> Self {
        Self {
            root,
            length,
            comparator: self.comparator.clone(),
        }
    }

    fn empty_like(&self) -> Self {
        Self::with_comparator(self.comparator.clone())
    }

    /// Inserts a key-value pair, returning a new map.
    ///
    /// If the key already exists, its value is replaced. The original map is
    /// unchanged.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map1 = PersistentTreeMap::new().insert(1, "one");
    /// let map2 = map1.insert(1, "ONE");
    ///
    /// assert_eq!(map1.get(&1), Some(&"one")); // Original unchanged
    /// assert_eq!(map2.get(&1), Some(&"ONE")); // New version
    /// ```
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let (root, added) = rbtree::insert(&self.root, &self.comparator, key, value);
        self.with_root(root, self.length + usize::from(added))
    }

    /// Removes a key, returning a new map.
    ///
    /// If the key does not exist, returns a clone of the original map that
    /// shares its whole tree.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new()
    ///     .insert(1, "one")
    ///     .insert(2, "two");
    /// let removed = map.remove(&1);
    ///
    /// assert_eq!(map.len(), 2);     // Original unchanged
    /// assert_eq!(removed.len(), 1); // New version
    /// assert_eq!(removed.get(&1), None);
    /// ```
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        rbtree::remove(&self.root, &self.comparator, key).map_or_else(
            || self.clone(),
            |root| self.with_root(root, self.length.saturating_sub(1)),
        )
    }

    /// Removes the entry with the smallest key.
    ///
    /// Returns the new map together with the removed entry, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map = PersistentTreeMap::new().insert(2, "two").insert(1, "one");
    /// let (rest, key, value) = map.pop_first().unwrap();
    /// assert_eq!((key, value), (1, "one"));
    /// assert_eq!(rest.len(), 1);
    /// ```
    #[must_use]
    pub fn pop_first(&self) -> Option<(Self, K, V)> {
        let (root, key, value) = rbtree::remove_first(&self.root)?;
        Some((self.with_root(root, self.length.saturating_sub(1)), key, value))
    }

    /// Removes the entry with the largest key.
    #[must_use]
    pub fn pop_last(&self) -> Option<(Self, K, V)> {
        let (root, key, value) = rbtree::remove_last(&self.root)?;
        Some((self.with_root(root, self.length.saturating_sub(1)), key, value))
    }

    /// Returns a new map containing only the entries that satisfy `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map: PersistentTreeMap<i32, i32> = (1..=6).map(|key| (key, key * key)).collect();
    /// let even = map.filter(|key, _| key % 2 == 0);
    /// assert_eq!(even.keys().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter()
            .filter(|(key, value)| predicate(key, value))
            .fold(self.empty_like(), |kept, (key, value)| {
                kept.insert(key.clone(), value.clone())
            })
    }

    /// Splits the map into the entries that satisfy `predicate` and those
    /// that do not.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeMap;
    ///
    /// let map: PersistentTreeMap<i32, ()> = (1..=5).map(|key| (key, ())).collect();
    /// let (small, large) = map.partition(|key, _| *key <= 2);
    /// assert_eq!(small.len(), 2);
    /// assert_eq!(large.len(), 3);
    /// ```
    #[must_use]
    pub fn partition<F>(&self, mut predicate: F) -> (Self, Self)
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.iter().fold(
            (self.empty_like(), self.empty_like()),
            |(matching, rest), (key, value)| {
                if predicate(key, value) {
                    (matching.insert(key.clone(), value.clone()), rest)
                } else {
                    (matching, rest.insert(key.clone(), value.clone()))
                }
            },
        )
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over key-value pairs of a [`PersistentTreeMap`].
pub struct PersistentTreeMapIterator<'a, K, V> {
    inner: rbtree::Iter<'a, K, V>,
}

impl<K, V> Clone for PersistentTreeMapIterator<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for PersistentTreeMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for PersistentTreeMapIterator<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for PersistentTreeMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for PersistentTreeMapIterator<'_, K, V> {}

/// An owning iterator over key-value pairs of a [`PersistentTreeMap`].
///
/// Yields clones of the stored entries; nodes still shared with other maps
/// are left in place.
pub struct PersistentTreeMapIntoIterator<K, V> {
    inner: rbtree::IntoIter<K, V>,
}

impl<K: Clone, V: Clone> Iterator for PersistentTreeMapIntoIterator<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Clone, V: Clone> DoubleEndedIterator for PersistentTreeMapIntoIterator<K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for PersistentTreeMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: Clone, V: Clone> FusedIterator for PersistentTreeMapIntoIterator<K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Clone> Clone for PersistentTreeMap<K, V, C> {
    /// Shares the whole tree with the original.
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            length: self.length,
            comparator: self.comparator.clone(),
        }
    }
}

impl<K, V, C: Default> Default for PersistentTreeMap<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> FromIterator<(K, V)> for PersistentTreeMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Compare<K> + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |map, (key, value)| map.insert(key, value))
    }
}

impl<K: Clone, V: Clone, C> IntoIterator for PersistentTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = PersistentTreeMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentTreeMapIntoIterator {
            inner: rbtree::IntoIter::new(self.root, self.length),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a PersistentTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = PersistentTreeMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V: PartialEq, C: Compare<K>> PartialEq for PersistentTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.equal_by(other, |left, right| left == right)
    }
}

impl<K, V: Eq, C: Compare<K>> Eq for PersistentTreeMap<K, V, C> {}

impl<K, V: PartialOrd, C: Compare<K>> PartialOrd for PersistentTreeMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Some(Ordering::Equal),
                (None, Some(_)) => return Some(Ordering::Less),
                (Some(_), None) => return Some(Ordering::Greater),
                (Some((left_key, left_value)), Some((right_key, right_value))) => {
                    match self.comparator.compare(left_key, right_key) {
                        Ordering::Equal => match left_value.partial_cmp(right_value) {
                            Some(Ordering::Equal) => {}
                            unequal => return unequal,
                        },
                        unequal => return Some(unequal),
                    }
                }
            }
        }
    }
}

impl<K, V: Ord, C: Compare<K>> Ord for PersistentTreeMap<K, V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_by(other, Ord::cmp)
    }
}

/// Hashes the length followed by every entry in ascending key order, so
/// equal maps hash equally regardless of tree shape.
///
/// Only maps ordered by [`Natural`] are hashable. A custom comparator may
/// equate keys that hash differently, which would let two equal maps hash
/// apart.
///
/// # Examples
///
/// ```rust
/// use persistent_rbtree::persistent::PersistentTreeMap;
/// use std::collections::HashMap;
///
/// let mut outer: HashMap<PersistentTreeMap<i32, String>, &str> = HashMap::new();
/// let key = PersistentTreeMap::new()
///     .insert(1, "one".to_string())
///     .insert(2, "two".to_string());
/// outer.insert(key.clone(), "value");
/// assert_eq!(outer.get(&key), Some(&"value"));
/// ```
impl<K: Hash + Ord, V: Hash> Hash for PersistentTreeMap<K, V, Natural<K>> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for PersistentTreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for PersistentTreeMap<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, C> serde::Serialize for PersistentTreeMap<K, V, C>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentTreeMapVisitor<K, V, C> {
    marker: std::marker::PhantomData<fn() -> PersistentTreeMap<K, V, C>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::de::Visitor<'de> for PersistentTreeMapVisitor<K, V, C>
where
    K: serde::Deserialize<'de> + Clone,
    V: serde::Deserialize<'de> + Clone,
    C: Compare<K> + Clone + Default,
{
    type Value = PersistentTreeMap<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = PersistentTreeMap::default();
        while let Some((key, value)) = access.next_entry()? {
            map = map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, C> serde::Deserialize<'de> for PersistentTreeMap<K, V, C>
where
    K: serde::Deserialize<'de> + Clone,
    V: serde::Deserialize<'de> + Clone,
    C: Compare<K> + Clone + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(PersistentTreeMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
