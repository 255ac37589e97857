//! Persistent (immutable) ordered set.
//!
//! [`PersistentTreeSet`] is a [`PersistentTreeMap`] whose values are `()`.
//! It shares the map's red-black tree engine, so every balancing guarantee
//! and complexity bound carries over unchanged.
//!
//! # Examples
//!
//! ```rust
//! use persistent_rbtree::persistent::PersistentTreeSet;
//!
//! let set: PersistentTreeSet<i32> = [5, 3, 8, 1].into_iter().collect();
//! let other: PersistentTreeSet<i32> = [3, 4, 5].into_iter().collect();
//!
//! let union = set.union(&other);
//! let intersection = set.intersection(&other);
//!
//! assert_eq!(union.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8]);
//! assert_eq!(intersection.len(), 2); // {3, 5}
//! ```

use compare::{Compare, Natural};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{FromIterator, FusedIterator};

use super::InvariantViolation;
use super::treemap::{
    PersistentTreeMap, PersistentTreeMapIntoIterator, PersistentTreeMapIterator,
};

/// A persistent (immutable) ordered set based on a red-black tree.
///
/// # Examples
///
/// ```rust
/// use persistent_rbtree::persistent::PersistentTreeSet;
///
/// let set = PersistentTreeSet::new().insert(2).insert(1).insert(3);
/// let smaller = set.remove(&2);
///
/// assert!(set.contains(&2));       // Original unchanged
/// assert!(!smaller.contains(&2));  // New version
/// assert_eq!(smaller.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub struct PersistentTreeSet<T, C = Natural<T>> {
    map: PersistentTreeMap<T, (), C>,
}

impl<T: Ord> PersistentTreeSet<T> {
    /// Creates a new empty set ordered by the elements' natural order.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: PersistentTreeMap::new(),
        }
    }

    /// Creates a set containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self
    where
        T: Clone,
    {
        Self::new().insert(element)
    }
}

impl<T, C> PersistentTreeSet<T, C> {
    /// Creates a new empty set ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeSet;
    ///
    /// let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
    /// let set = PersistentTreeSet::with_comparator(by_length)
    ///     .insert("ccc")
    ///     .insert("a")
    ///     .insert("bb")
    ///     .insert("zz"); // same length as "bb": replaces it
    ///
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["a", "zz", "ccc"]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            map: PersistentTreeMap::with_comparator(comparator),
        }
    }

    /// Returns the comparator that orders this set's elements.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.map.comparator()
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root.
    #[must_use]
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns `true` if the set contains `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeSet;
    ///
    /// let set = PersistentTreeSet::singleton(7);
    /// assert!(set.contains(&7));
    /// assert!(!set.contains(&8));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        self.map.contains_key(element)
    }

    /// Returns the stored element that compares equal to `element`.
    #[must_use]
    pub fn get<Q>(&self, element: &Q) -> Option<&T>
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        self.map.get_key_value(element).map(|(stored, ())| stored)
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(element, ())| element)
    }

    /// Returns the largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(element, ())| element)
    }

    /// Returns an iterator over the elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> PersistentTreeSetIterator<'_, T> {
        PersistentTreeSetIterator {
            inner: self.map.iter(),
        }
    }

    /// Folds every element into an accumulator in ascending order.
    pub fn fold<B, F>(&self, init: B, mut function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.map
            .fold(init, |accumulator, element, ()| function(accumulator, element))
    }

    /// Calls `function` on every element in ascending order.
    pub fn for_each<F>(&self, mut function: F)
    where
        F: FnMut(&T),
    {
        self.map.for_each(|element, ()| function(element));
    }

    /// Returns `true` if `predicate` holds for at least one element.
    pub fn exists<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.map.exists(|element, ()| predicate(element))
    }

    /// Returns `true` if `predicate` holds for every element.
    pub fn for_all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.map.for_all(|element, ()| predicate(element))
    }

    /// Returns `true` if every element of `self` is also in `other`.
    ///
    /// Membership is decided by `other`'s comparator.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool
    where
        C: Compare<T>,
    {
        self.len() <= other.len() && self.for_all(|element| other.contains(element))
    }

    /// Returns `true` if `self` and `other` have no element in common.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool
    where
        C: Compare<T>,
    {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        !smaller.exists(|element| larger.contains(element))
    }

    /// Checks the underlying tree against the red-black and ordering
    /// invariants, returning its black-height.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<usize, InvariantViolation>
    where
        C: Compare<T>,
    {
        self.map.validate()
    }
}

impl<T, C> PersistentTreeSet<T, C>
where
    T: Clone,
    C: Compare<T> + Clone,
{
    const fn from_map(map: PersistentTreeMap<T, (), C>) -> Self {
        Self { map }
    }

    /// Inserts an element, returning a new set.
    ///
    /// An element that compares equal to an existing one replaces it.
    #[must_use]
    pub fn insert(&self, element: T) -> Self {
        Self::from_map(self.map.insert(element, ()))
    }

    /// Removes an element, returning a new set.
    ///
    /// Removing an absent element returns a set sharing the original tree.
    #[must_use]
    pub fn remove<Q>(&self, element: &Q) -> Self
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        Self::from_map(self.map.remove(element))
    }

    /// Removes the smallest element.
    #[must_use]
    pub fn pop_first(&self) -> Option<(Self, T)> {
        self.map
            .pop_first()
            .map(|(map, element, ())| (Self::from_map(map), element))
    }

    /// Removes the largest element.
    #[must_use]
    pub fn pop_last(&self) -> Option<(Self, T)> {
        self.map
            .pop_last()
            .map(|(map, element, ())| (Self::from_map(map), element))
    }

    /// Returns a new set containing only the elements that satisfy
    /// `predicate`.
    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        Self::from_map(self.map.filter(|element, ()| predicate(element)))
    }

    /// Splits the set into the elements that satisfy `predicate` and those
    /// that do not.
    #[must_use]
    pub fn partition<F>(&self, mut predicate: F) -> (Self, Self)
    where
        F: FnMut(&T) -> bool,
    {
        let (matching, rest) = self.map.partition(|element, ()| predicate(element));
        (Self::from_map(matching), Self::from_map(rest))
    }

    /// Returns the union of two sets.
    ///
    /// Elements of `other` are inserted into `self`, so on ties the element
    /// from `other` is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeSet;
    ///
    /// let left: PersistentTreeSet<i32> = [1, 2].into_iter().collect();
    /// let right: PersistentTreeSet<i32> = [2, 3].into_iter().collect();
    /// assert_eq!(left.union(&right).len(), 3);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        other
            .iter()
            .fold(self.clone(), |union, element| union.insert(element.clone()))
    }

    /// Returns the elements of `self` that are also in `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.filter(|element| other.contains(element))
    }

    /// Returns the elements of `self` that are not in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_rbtree::persistent::PersistentTreeSet;
    ///
    /// let left: PersistentTreeSet<i32> = [1, 2, 3].into_iter().collect();
    /// let right: PersistentTreeSet<i32> = [2].into_iter().collect();
    /// let difference = left.difference(&right);
    /// assert_eq!(difference.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    /// ```
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        other
            .iter()
            .fold(self.clone(), |difference, element| difference.remove(element))
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the elements of a [`PersistentTreeSet`].
pub struct PersistentTreeSetIterator<'a, T> {
    inner: PersistentTreeMapIterator<'a, T, ()>,
}

impl<T> Clone for PersistentTreeSetIterator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for PersistentTreeSetIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for PersistentTreeSetIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(element, ())| element)
    }
}

impl<T> ExactSizeIterator for PersistentTreeSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for PersistentTreeSetIterator<'_, T> {}

/// An owning iterator over the elements of a [`PersistentTreeSet`].
pub struct PersistentTreeSetIntoIterator<T> {
    inner: PersistentTreeMapIntoIterator<T, ()>,
}

impl<T: Clone> Iterator for PersistentTreeSetIntoIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T: Clone> DoubleEndedIterator for PersistentTreeSetIntoIterator<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(element, ())| element)
    }
}

impl<T: Clone> ExactSizeIterator for PersistentTreeSetIntoIterator<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T: Clone> FusedIterator for PersistentTreeSetIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Clone> Clone for PersistentTreeSet<T, C> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<T, C: Default> Default for PersistentTreeSet<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> FromIterator<T> for PersistentTreeSet<T, C>
where
    T: Clone,
    C: Compare<T> + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|element| (element, ())).collect(),
        }
    }
}

impl<T: Clone, C> IntoIterator for PersistentTreeSet<T, C> {
    type Item = T;
    type IntoIter = PersistentTreeSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        PersistentTreeSetIntoIterator {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a PersistentTreeSet<T, C> {
    type Item = &'a T;
    type IntoIter = PersistentTreeSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C: Compare<T>> PartialEq for PersistentTreeSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, C: Compare<T>> Eq for PersistentTreeSet<T, C> {}

impl<T, C: Compare<T>> PartialOrd for PersistentTreeSet<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, C: Compare<T>> Ord for PersistentTreeSet<T, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.map.cmp(&other.map)
    }
}

/// Only sets ordered by [`Natural`] are hashable, for the same reason as
/// maps.
impl<T: Hash + Ord> Hash for PersistentTreeSet<T, Natural<T>> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PersistentTreeSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for PersistentTreeSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for PersistentTreeSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct PersistentTreeSetVisitor<T, C> {
    marker: std::marker::PhantomData<fn() -> PersistentTreeSet<T, C>>,
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::de::Visitor<'de> for PersistentTreeSetVisitor<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Compare<T> + Clone + Default,
{
    type Value = PersistentTreeSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = PersistentTreeSet::default();
        while let Some(element) = access.next_element()? {
            set = set.insert(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for PersistentTreeSet<T, C>
where
    T: serde::Deserialize<'de> + Clone,
    C: Compare<T> + Clone + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentTreeSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn set_of(elements: impl IntoIterator<Item = i32>) -> PersistentTreeSet<i32> {
        elements.into_iter().collect()
    }

    #[rstest]
    fn test_display_and_debug() {
        let set = set_of([3, 1, 2]);
        assert_eq!(format!("{set}"), "{1, 2, 3}");
        assert_eq!(format!("{set:?}"), "{1, 2, 3}");
        assert_eq!(format!("{}", PersistentTreeSet::<i32>::new()), "{}");
    }

    #[rstest]
    #[case(vec![1, 2], vec![1, 2, 3], true)]
    #[case(vec![], vec![1], true)]
    #[case(vec![1, 4], vec![1, 2, 3], false)]
    #[case(vec![1, 2, 3], vec![1, 2], false)]
    fn test_is_subset(#[case] left: Vec<i32>, #[case] right: Vec<i32>, #[case] expected: bool) {
        assert_eq!(set_of(left).is_subset(&set_of(right)), expected);
    }

    #[rstest]
    fn test_set_algebra() {
        let left = set_of(1..=6);
        let right = set_of(4..=9);
        assert_eq!(left.union(&right), set_of(1..=9));
        assert_eq!(left.intersection(&right), set_of(4..=6));
        assert_eq!(left.difference(&right), set_of(1..=3));
        assert!(left.difference(&right).is_disjoint(&right));
        assert!(!left.is_disjoint(&right));
        for result in [
            left.union(&right),
            left.intersection(&right),
            left.difference(&right),
        ] {
            assert!(result.validate().is_ok());
        }
    }

    #[rstest]
    fn test_pop_first_drains_in_order() {
        let mut set = set_of([4, 2, 9, 7]);
        let mut drained = Vec::new();
        while let Some((rest, element)) = set.pop_first() {
            drained.push(element);
            set = rest;
        }
        assert_eq!(drained, vec![2, 4, 7, 9]);
        assert!(set.is_empty());
    }

    #[rstest]
    fn test_into_iter_is_double_ended() {
        let mut elements = set_of(1..=5).into_iter();
        assert_eq!(elements.next_back(), Some(5));
        assert_eq!(elements.next(), Some(1));
        assert_eq!(elements.len(), 3);
    }

    #[rstest]
    fn test_get_returns_stored_element() {
        let by_tens = |left: &i32, right: &i32| (left / 10).cmp(&(right / 10));
        let set = PersistentTreeSet::with_comparator(by_tens).insert(12);
        assert_eq!(set.get(&15), Some(&12));
        assert_eq!(set.get(&25), None);
    }
}
