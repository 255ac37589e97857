//! Node representation and invariant bookkeeping.
//!
//! A subtree is a [`Link`]: `None` is the empty (black) leaf, `Some` is a
//! bound node. Nodes are never mutated once they are reachable from a
//! snapshot; every constructor here produces a fresh node and shares the
//! children it is given.

use compare::Compare;
use std::cmp::Ordering;

use crate::persistent::InvariantViolation;
use crate::persistent::ReferenceCounter;

// =============================================================================
// Color and Node
// =============================================================================

/// The color of a red-black tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A shared, possibly empty subtree.
pub(crate) type Link<K, V> = Option<ReferenceCounter<Node<K, V>>>;

/// A bound node of the tree.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) color: Color,
    pub(crate) left: Link<K, V>,
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) const fn new(
        color: Color,
        left: Link<K, V>,
        key: K,
        value: V,
        right: Link<K, V>,
    ) -> Self {
        Self {
            color,
            left,
            key,
            value,
            right,
        }
    }

    pub(crate) const fn red(left: Link<K, V>, key: K, value: V, right: Link<K, V>) -> Self {
        Self::new(Color::Red, left, key, value, right)
    }

    pub(crate) const fn black(left: Link<K, V>, key: K, value: V, right: Link<K, V>) -> Self {
        Self::new(Color::Black, left, key, value, right)
    }

    /// Wraps the node so it can be linked into a tree.
    pub(crate) fn into_link(self) -> Link<K, V> {
        Some(ReferenceCounter::new(self))
    }

    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Copies this node with a different color, sharing both children.
    pub(crate) fn with_color(&self, color: Color) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self::new(
            color,
            self.left.clone(),
            self.key.clone(),
            self.value.clone(),
            self.right.clone(),
        )
    }
}

/// Takes a node out of its reference counter, cloning only when it is shared.
pub(crate) fn unshare<K: Clone, V: Clone>(node: ReferenceCounter<Node<K, V>>) -> Node<K, V> {
    ReferenceCounter::unwrap_or_clone(node)
}

/// Returns `true` if the subtree is a red node. Empty subtrees are black.
pub(crate) fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|node| node.is_red())
}

/// Takes ownership of a red subtree root, or hands the link back untouched.
pub(crate) fn split_red<K, V>(link: Link<K, V>) -> Result<Node<K, V>, Link<K, V>>
where
    K: Clone,
    V: Clone,
{
    match link {
        Some(node) if node.is_red() => Ok(unshare(node)),
        other => Err(other),
    }
}

/// Recolors the root of a subtree black, reusing it when it already is.
pub(crate) fn blacken<K: Clone, V: Clone>(link: Link<K, V>) -> Link<K, V> {
    match link {
        Some(node) if node.is_red() => node.with_color(Color::Black).into_link(),
        other => other,
    }
}

// =============================================================================
// Queries
// =============================================================================

/// Finds the node bound to `key`.
pub(crate) fn find<'a, K, V, C, Q>(
    link: &'a Link<K, V>,
    cmp: &C,
    key: &Q,
) -> Option<&'a Node<K, V>>
where
    C: Compare<Q, K>,
    Q: ?Sized,
{
    let mut current = link;
    while let Some(node) = current {
        match cmp.compare(key, &node.key) {
            Ordering::Less => current = &node.left,
            Ordering::Greater => current = &node.right,
            Ordering::Equal => return Some(node),
        }
    }
    None
}

/// Returns the leftmost node of a subtree.
pub(crate) fn first<K, V>(link: &Link<K, V>) -> Option<&Node<K, V>> {
    let mut node = link.as_deref()?;
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    Some(node)
}

/// Returns the rightmost node of a subtree.
pub(crate) fn last<K, V>(link: &Link<K, V>) -> Option<&Node<K, V>> {
    let mut node = link.as_deref()?;
    while let Some(right) = node.right.as_deref() {
        node = right;
    }
    Some(node)
}

/// Number of nodes on the longest root-to-leaf path.
pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref()
        .map_or(0, |node| 1 + height(&node.left).max(height(&node.right)))
}

/// Number of bound nodes in a subtree.
pub(crate) fn count<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref()
        .map_or(0, |node| 1 + count(&node.left) + count(&node.right))
}

// =============================================================================
// Structural Maps
// =============================================================================

/// Rebuilds a subtree with transformed values, keeping every color and the
/// exact shape. `transform` sees the bindings in ascending key order.
pub(crate) fn map_values<K, V, W, F>(link: &Link<K, V>, transform: &mut F) -> Link<K, W>
where
    K: Clone,
    F: FnMut(&K, &V) -> W,
{
    link.as_ref().and_then(|node| {
        let left = map_values(&node.left, transform);
        let value = transform(&node.key, &node.value);
        let right = map_values(&node.right, transform);
        Node::new(node.color, left, node.key.clone(), value, right).into_link()
    })
}

// =============================================================================
// Validation
// =============================================================================

/// Checks all four tree invariants and returns the black-height of the root.
pub(crate) fn validate<K, V, C>(
    root: &Link<K, V>,
    cmp: &C,
) -> Result<usize, InvariantViolation>
where
    C: Compare<K>,
{
    if is_red(root) {
        return Err(InvariantViolation::RedRoot);
    }
    validate_subtree(root, cmp, None, None)
}

fn validate_subtree<'a, K, V, C>(
    link: &'a Link<K, V>,
    cmp: &C,
    lower: Option<&'a K>,
    upper: Option<&'a K>,
) -> Result<usize, InvariantViolation>
where
    C: Compare<K>,
{
    let Some(node) = link else {
        return Ok(0);
    };

    let above_lower = lower.is_none_or(|lower| cmp.compares_lt(lower, &node.key));
    let below_upper = upper.is_none_or(|upper| cmp.compares_lt(&node.key, upper));
    if !(above_lower && below_upper) {
        return Err(InvariantViolation::OrderViolation);
    }

    if node.is_red() && (is_red(&node.left) || is_red(&node.right)) {
        return Err(InvariantViolation::RedRedViolation);
    }

    let left = validate_subtree(&node.left, cmp, lower, Some(&node.key))?;
    let right = validate_subtree(&node.right, cmp, Some(&node.key), upper)?;
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch { left, right });
    }

    Ok(left + usize::from(!node.is_red()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use compare::natural;
    use rstest::rstest;

    fn leaf(color: Color, key: i32) -> Link<i32, ()> {
        Node::new(color, None, key, (), None).into_link()
    }

    #[rstest]
    fn test_empty_is_valid_with_zero_black_height() {
        let root: Link<i32, ()> = None;
        assert_eq!(validate(&root, &natural()), Ok(0));
    }

    #[rstest]
    fn test_red_root_is_rejected() {
        assert_eq!(
            validate(&leaf(Color::Red, 1), &natural()),
            Err(InvariantViolation::RedRoot)
        );
    }

    #[rstest]
    fn test_red_red_is_rejected() {
        let red = Node::red(leaf(Color::Red, 1), 2, (), None).into_link();
        let root = Node::black(red, 3, (), leaf(Color::Black, 4)).into_link();
        assert_eq!(
            validate(&root, &natural()),
            Err(InvariantViolation::RedRedViolation)
        );
    }

    #[rstest]
    fn test_unequal_black_heights_are_rejected() {
        let root = Node::black(leaf(Color::Black, 1), 2, (), None).into_link();
        assert_eq!(
            validate(&root, &natural()),
            Err(InvariantViolation::BlackHeightMismatch { left: 1, right: 0 })
        );
    }

    #[rstest]
    fn test_out_of_order_grandchild_is_rejected() {
        // 4 sits in the left subtree of 3 even though 4 > 3.
        let left = Node::black(None, 1, (), leaf(Color::Red, 4)).into_link();
        let root = Node::black(left, 3, (), leaf(Color::Black, 5)).into_link();
        assert_eq!(
            validate(&root, &natural()),
            Err(InvariantViolation::OrderViolation)
        );
    }

    #[rstest]
    fn test_well_formed_tree_reports_black_height() {
        let root = Node::black(leaf(Color::Black, 1), 2, (), leaf(Color::Black, 3)).into_link();
        assert_eq!(validate(&root, &natural()), Ok(2));
        assert_eq!(height(&root), 2);
        assert_eq!(count(&root), 3);
        assert_eq!(first(&root).map(|node| node.key), Some(1));
        assert_eq!(last(&root).map(|node| node.key), Some(3));
    }

    #[rstest]
    fn test_blacken_reuses_black_node() {
        let root = leaf(Color::Black, 1);
        let blackened = blacken(root.clone());
        assert!(match (&root, &blackened) {
            (Some(before), Some(after)) => ReferenceCounter::ptr_eq(before, after),
            _ => false,
        });
    }

    #[rstest]
    fn test_map_values_keeps_shape_and_colors() {
        let root = Node::black(leaf(Color::Red, 1), 2, (), leaf(Color::Red, 3)).into_link();
        let mut visited = Vec::new();
        let mapped = map_values(&root, &mut |key: &i32, _value: &()| {
            visited.push(*key);
            key * 10
        });
        assert_eq!(visited, vec![1, 2, 3]);
        let mapped_root = mapped.as_deref().map(|node| (node.color, node.value));
        assert_eq!(mapped_root, Some((Color::Black, 20)));
        assert!(is_red(&mapped.as_ref().and_then(|node| node.left.clone())));
    }
}
