//! In-order cursors over a tree.
//!
//! Both cursors keep one stack per end. The stacks hold the path to the next
//! unvisited node, so a balanced tree never needs more than `2 * log2(n + 1)`
//! entries; 32 inline slots cover trees of up to 65535 bindings before a
//! stack spills to the heap. A shared `remaining` count stops the two ends
//! from crossing.

use smallvec::SmallVec;
use std::iter::FusedIterator;

use super::node::{Link, Node};
use crate::persistent::ReferenceCounter;

const INLINE_DEPTH: usize = 32;

// =============================================================================
// Borrowing Cursor
// =============================================================================

/// Borrowing in-order cursor yielding `(&K, &V)`.
pub(crate) struct Iter<'a, K, V> {
    front: SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>,
    back: SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// `len` must be the number of nodes reachable from `root`.
    pub(crate) fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter.descend_right(root);
        iter
    }

    fn descend_left(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link.as_deref() {
            self.front.push(node);
            link = &node.left;
        }
    }

    fn descend_right(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link.as_deref() {
            self.back.push(node);
            link = &node.right;
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        self.descend_left(&node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        self.descend_right(&node.left);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

// =============================================================================
// Owning Cursor
// =============================================================================

/// Owning in-order cursor yielding cloned `(K, V)` pairs.
///
/// Holds counted references to the nodes on its paths, so the snapshot it
/// was created from may be dropped while iteration continues.
pub(crate) struct IntoIter<K, V> {
    front: SmallVec<[ReferenceCounter<Node<K, V>>; INLINE_DEPTH]>,
    back: SmallVec<[ReferenceCounter<Node<K, V>>; INLINE_DEPTH]>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: len,
        };
        iter.descend_left(root.clone());
        iter.descend_right(root);
        iter
    }

    fn descend_left(&mut self, mut link: Link<K, V>) {
        while let Some(node) = link {
            link = node.left.clone();
            self.front.push(node);
        }
    }

    fn descend_right(&mut self, mut link: Link<K, V>) {
        while let Some(node) = link {
            link = node.right.clone();
            self.back.push(node);
        }
    }
}

impl<K: Clone, V: Clone> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front.pop()?;
        self.descend_left(node.right.clone());
        self.remaining -= 1;
        Some((node.key.clone(), node.value.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Clone, V: Clone> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back.pop()?;
        self.descend_right(node.left.clone());
        self.remaining -= 1;
        Some((node.key.clone(), node.value.clone()))
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K: Clone, V: Clone> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use super::super::insert::insert;
    use super::*;
    use compare::natural;
    use rstest::rstest;

    fn build(keys: impl IntoIterator<Item = i32>) -> (Link<i32, i32>, usize) {
        keys.into_iter().fold((None, 0), |(root, len), key| {
            let (root, added) = insert(&root, &natural(), key, -key);
            (root, len + usize::from(added))
        })
    }

    #[rstest]
    fn test_iter_on_empty_tree_is_exhausted() {
        let root: Link<i32, i32> = None;
        let mut iter = Iter::new(&root, 0);
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(17)]
    #[case(500)]
    fn test_iter_yields_ascending_keys(#[case] size: i32) {
        let (root, len) = build((1..=size).rev());
        let keys: Vec<i32> = Iter::new(&root, len).map(|(key, _)| *key).collect();
        assert_eq!(keys, (1..=size).collect::<Vec<_>>());
        let backwards: Vec<i32> = Iter::new(&root, len).rev().map(|(key, _)| *key).collect();
        assert_eq!(backwards, (1..=size).rev().collect::<Vec<_>>());
    }

    #[rstest]
    fn test_iter_ends_meet_without_crossing() {
        let (root, len) = build(1..=9);
        let mut iter = Iter::new(&root, len);
        let mut seen = Vec::new();
        loop {
            match (iter.next(), iter.next_back()) {
                (Some(front), Some(back)) => seen.extend([*front.0, *back.0]),
                (Some(front), None) => seen.push(*front.0),
                (None, _) => break,
            }
            assert_eq!(iter.len() + seen.len(), 9);
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=9).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_into_iter_outlives_root() {
        let (root, len) = build([4, 2, 6, 1, 3, 5, 7]);
        let mut iter = IntoIter::new(root, len);
        assert_eq!(iter.next(), Some((1, -1)));
        assert_eq!(iter.next_back(), Some((7, -7)));
        assert_eq!(iter.len(), 5);
        let rest: Vec<(i32, i32)> = iter.collect();
        assert_eq!(rest, vec![(2, -2), (3, -3), (4, -4), (5, -5), (6, -6)]);
    }
}
